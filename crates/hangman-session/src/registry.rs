//! Session registry for coordinating many games.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use hangman_core::{Error, GameStatus, Guess, Result, SessionId};

use crate::rules::GameRules;
use crate::session::{GameState, Session, SessionSummary};
use crate::word::{RandomWordPicker, WordPicker};

/// Configuration for the session registry.
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    /// Maximum number of concurrent sessions (`None` = unlimited)
    pub max_sessions: Option<usize>,
}

/// In-memory registry owning every active session.
///
/// The map lock is only held to insert, look up or remove an entry. Each
/// session sits behind its own mutex, so work on different IDs does not
/// contend and work on one ID is serialized.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
    rules: Arc<GameRules>,
    words: Vec<String>,
    picker: Arc<dyn WordPicker>,
    config: RegistryConfig,
}

impl SessionRegistry {
    /// Create a registry drawing secret words uniformly from `words`.
    pub fn new(rules: Arc<GameRules>, words: Vec<String>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            rules,
            words,
            picker: Arc::new(RandomWordPicker),
            config: RegistryConfig::default(),
        }
    }

    /// Replace the secret word picker.
    pub fn with_picker(mut self, picker: impl WordPicker + 'static) -> Self {
        self.picker = Arc::new(picker);
        self
    }

    /// Replace the registry configuration.
    pub fn with_config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Rules shared by every session.
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Create a new session under `id`.
    pub fn create_session(&self, id: SessionId) -> Result<SessionSummary> {
        let mut sessions = self.sessions.write();

        if sessions.contains_key(&id) {
            return Err(Error::DuplicateSession(id));
        }

        if let Some(max) = self.config.max_sessions {
            if sessions.len() >= max {
                return Err(Error::SessionLimitReached(max));
            }
        }

        let session = Session::new(id, Arc::clone(&self.rules), &self.words, self.picker.as_ref())?;
        let summary = session.summary();
        sessions.insert(id, Arc::new(Mutex::new(session)));

        info!(
            "Session registered: id={}, active_sessions={}",
            id,
            sessions.len()
        );
        Ok(summary)
    }

    /// Get a session by ID.
    pub fn get_session(&self, id: SessionId) -> Result<Arc<Mutex<Session>>> {
        let sessions = self.sessions.read();
        sessions.get(&id).cloned().ok_or_else(|| {
            debug!("Could not find running session with id: {}", id);
            Error::SessionNotFound(id)
        })
    }

    fn with_session<T>(&self, id: SessionId, f: impl FnOnce(&Session) -> T) -> Result<T> {
        let session = self.get_session(id)?;
        let session = session.lock();
        Ok(f(&session))
    }

    /// Remove a session. Deleting an unknown ID is an error.
    pub fn delete_session(&self, id: SessionId) -> Result<()> {
        let mut sessions = self.sessions.write();
        if sessions.remove(&id).is_none() {
            return Err(Error::SessionNotFound(id));
        }

        info!(
            "Session deleted: id={}, active_sessions={}",
            id,
            sessions.len()
        );
        Ok(())
    }

    /// Whether the session ran out of moves.
    pub fn is_session_lost(&self, id: SessionId) -> Result<bool> {
        self.with_session(id, Session::is_lost)
    }

    /// Whether the session's word is fully revealed.
    pub fn is_session_won(&self, id: SessionId) -> Result<bool> {
        self.with_session(id, Session::is_won)
    }

    /// Whether the session is won or lost.
    pub fn is_session_over(&self, id: SessionId) -> Result<bool> {
        self.with_session(id, Session::is_over)
    }

    /// Lifecycle state of the session.
    pub fn session_status(&self, id: SessionId) -> Result<GameStatus> {
        self.with_session(id, Session::status)
    }

    /// Player-facing state of the session.
    pub fn get_session_state(&self, id: SessionId) -> Result<GameState> {
        self.with_session(id, Session::state)
    }

    /// Apply a guess to a session.
    ///
    /// Finished sessions reject the move with [`Error::GameOver`]; rule
    /// violations surface as [`Error::IllegalMove`]. The terminality check
    /// and the move happen under one lock, so a failure changes nothing.
    pub fn evaluate_move(&self, id: SessionId, guess: &Guess) -> Result<()> {
        self.evaluate_move_with_state(id, guess).map(|_| ())
    }

    /// Apply a guess and read the resulting state and status.
    ///
    /// Same checks as [`evaluate_move`](Self::evaluate_move). The state is
    /// read under the lock that applied the move, so a concurrent delete
    /// cannot split an accepted move from its result.
    pub fn evaluate_move_with_state(
        &self,
        id: SessionId,
        guess: &Guess,
    ) -> Result<(GameState, GameStatus)> {
        let session = self.get_session(id)?;
        let mut session = session.lock();

        if session.is_over() {
            debug!(
                "Move '{}' rejected: session {} is {}",
                guess.character,
                id,
                session.status()
            );
            return Err(Error::GameOver(id));
        }

        session.evaluate_move(guess)?;
        Ok((session.state(), session.status()))
    }

    /// List all active sessions, ordered by ID.
    pub fn list_sessions(&self) -> Vec<SessionInfo> {
        let handles: Vec<Arc<Mutex<Session>>> = {
            let sessions = self.sessions.read();
            sessions.values().cloned().collect()
        };

        let mut infos: Vec<SessionInfo> = handles
            .iter()
            .map(|handle| {
                let session = handle.lock();
                SessionInfo {
                    session_id: *session.id(),
                    status: session.status(),
                    moves_left: session.moves_left(),
                    created_at: session.created_at(),
                }
            })
            .collect();
        infos.sort_by_key(|info| info.session_id);
        infos
    }

    /// Get the number of active sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}

/// Information about a session.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    /// Session ID
    pub session_id: SessionId,

    /// Lifecycle state
    pub status: GameStatus,

    /// Misses left
    pub moves_left: u32,

    /// Creation time
    pub created_at: SystemTime,
}
