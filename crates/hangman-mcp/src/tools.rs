//! MCP Tool Types
//!
//! Parameter and response types for every hangman tool. Responses never
//! carry the secret word.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use hangman_core::{GameStatus, SessionId};
use hangman_session::{GameState, SessionInfo};

// =============================================================================
// Session Management Tools
// =============================================================================

/// Parameters for start_new_game
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StartGameParams {}

/// Response for start_new_game
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StartGameResponse {
    /// Identifier to pass to every other tool
    pub session_id: SessionId,

    /// Misses allowed before the game is lost
    pub moves_left: u32,

    /// Number of characters in the secret word
    pub secret_word_length: usize,
}

/// Parameters for delete_game
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeleteGameParams {
    /// Game to delete
    pub session_id: SessionId,
}

/// Response for delete_game
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeleteGameResponse {
    /// Game that was deleted
    pub session_id: SessionId,

    /// Success message
    pub message: String,
}

/// Parameters for list_games
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListGamesParams {}

/// Response for list_games
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListGamesResponse {
    /// Active games
    pub games: Vec<GameInfo>,

    /// Total count
    pub count: usize,
}

/// Information about a game
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GameInfo {
    /// Game identifier
    pub session_id: SessionId,

    /// Lifecycle state
    pub status: GameStatus,

    /// Misses left
    pub moves_left: u32,

    /// Game age in seconds
    pub age_seconds: u64,
}

impl From<SessionInfo> for GameInfo {
    fn from(info: SessionInfo) -> Self {
        Self {
            session_id: info.session_id,
            status: info.status,
            moves_left: info.moves_left,
            age_seconds: info
                .created_at
                .elapsed()
                .map(|age| age.as_secs())
                .unwrap_or_default(),
        }
    }
}

// =============================================================================
// Gameplay Tools
// =============================================================================

/// Parameters for make_guess
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MakeGuessParams {
    /// Game to guess in
    pub session_id: SessionId,

    /// A single character
    pub character: String,
}

/// Parameters for get_game_state
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GameStateParams {
    /// Game to inspect
    pub session_id: SessionId,
}

/// Response for get_game_state and make_guess
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GameStateResponse {
    /// Game identifier
    pub session_id: SessionId,

    /// Misses left before the game is lost
    pub moves_left: u32,

    /// Every distinct character tried so far, in guess order
    pub guessed_characters: String,

    /// Secret word with unrevealed positions as null
    pub solved_word: Vec<Option<char>>,

    /// Lifecycle state
    pub status: GameStatus,

    /// Result message (only for make_guess)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GameStateResponse {
    /// Build a response from a state projection.
    pub fn new(session_id: SessionId, state: GameState, status: GameStatus) -> Self {
        Self {
            session_id,
            moves_left: state.moves_left,
            guessed_characters: state.guessed_characters,
            solved_word: state.solved_word,
            status,
            message: None,
        }
    }

    /// Attach a result message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_guess_params_from_json() {
        let params: MakeGuessParams =
            serde_json::from_value(serde_json::json!({"session_id": 3, "character": "a"})).unwrap();
        assert_eq!(params.session_id, SessionId::new(3));
        assert_eq!(params.character, "a");
    }

    #[test]
    fn test_game_state_response_json() {
        let state = GameState {
            moves_left: 4,
            guessed_characters: "ct".to_string(),
            solved_word: vec![Some('c'), None, Some('t')],
        };
        let response = GameStateResponse::new(SessionId::new(1), state, GameStatus::Active)
            .with_message("move accepted");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["session_id"], 1);
        assert_eq!(json["solved_word"], serde_json::json!(["c", null, "t"]));
        assert_eq!(json["status"], "active");
        assert_eq!(json["message"], "move accepted");
    }

    #[test]
    fn test_game_state_response_without_message() {
        let state = GameState {
            moves_left: 10,
            guessed_characters: String::new(),
            solved_word: vec![None],
        };
        let response = GameStateResponse::new(SessionId::new(1), state, GameStatus::Active);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("message").is_none());
    }
}
