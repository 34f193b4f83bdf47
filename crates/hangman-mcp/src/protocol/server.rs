//! Hangman MCP Server Implementation
//!
//! This module implements the MCP server using rmcp 0.9's #[tool_router] pattern.
//! It routes MCP tool calls to the session registry and maps registry
//! failures onto MCP errors.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error, info, instrument, warn};

use hangman_core::{Error, ErrorKind, Guess, ServerConfig, SessionId, SessionIdGenerator};
use hangman_session::{GameRules, RegistryConfig, SessionRegistry};

use crate::tools::*;

/// Fresh IDs tried before giving up on a colliding create.
const MAX_CREATE_ATTEMPTS: usize = 3;

/// Map a registry error onto an MCP error.
fn to_mcp_error(err: Error) -> McpError {
    let code = match err.kind() {
        ErrorKind::ValidationFailure
        | ErrorKind::NotFound
        | ErrorKind::TerminalState
        | ErrorKind::Conflict => ErrorCode(-32602), // Invalid params
        ErrorKind::Configuration => ErrorCode(-32603), // Internal error
    };
    McpError::new(code, err.to_string(), Some(json!({ "kind": err.kind() })))
}

/// Serialize a tool response as pretty JSON text content.
fn json_result<T: Serialize>(response: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(response).map_err(|e| {
        error!("Failed to serialize response: {}", e);
        McpError::new(
            ErrorCode(-32603),
            format!("Failed to serialize response: {e}"),
            None,
        )
    })?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Hangman MCP Server
///
/// Owns the session registry and exposes it via MCP tools.
#[derive(Clone)]
pub struct HangmanMcpServer {
    /// Active games
    registry: Arc<SessionRegistry>,
    /// Source of new session IDs
    ids: Arc<SessionIdGenerator>,
    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl HangmanMcpServer {
    /// Create a server around an existing registry
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self {
            registry,
            ids: Arc::new(SessionIdGenerator::new()),
            tool_router: Self::tool_router(),
        }
    }

    /// Create a server from validated configuration
    ///
    /// Compiles the rules and resolves the word list up front so a bad
    /// configuration fails at startup rather than on the first game.
    pub fn from_config(config: &ServerConfig) -> hangman_core::Result<Self> {
        config.validate()?;
        let rules = GameRules::new(config.rules, &config.game)?;
        let words = config.load_words()?;
        info!(
            "Loaded {} candidate words, max_moves={}, rules={:?}",
            words.len(),
            rules.max_moves(),
            rules.rule_set()
        );

        let registry = SessionRegistry::new(Arc::new(rules), words).with_config(RegistryConfig {
            max_sessions: config.server.session_limit(),
        });
        Ok(Self::new(Arc::new(registry)))
    }

    /// The registry backing this server
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Read state and status under a single lock (helper method)
    fn game_state(&self, session_id: SessionId) -> Result<GameStateResponse, McpError> {
        let session = self.registry.get_session(session_id).map_err(|e| {
            warn!("Session not found: session_id={}", session_id);
            to_mcp_error(e)
        })?;
        let session = session.lock();
        Ok(GameStateResponse::new(
            session_id,
            session.state(),
            session.status(),
        ))
    }

    /// Start a new game
    #[tool(description = "Start a new hangman game and get its session id and word length")]
    #[instrument(skip_all)]
    async fn start_new_game(
        &self,
        Parameters(_params): Parameters<StartGameParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut attempts = 0;
        let (session_id, summary) = loop {
            let session_id = self.ids.next_id();
            attempts += 1;
            match self.registry.create_session(session_id) {
                Ok(summary) => break (session_id, summary),
                Err(Error::DuplicateSession(_)) if attempts < MAX_CREATE_ATTEMPTS => {
                    warn!("Session id {} already taken, retrying", session_id);
                }
                Err(e) => {
                    error!("Failed to create game: {}", e);
                    return Err(to_mcp_error(e));
                }
            }
        };

        info!(
            "Game started: session_id={}, word_length={}",
            session_id, summary.secret_word_length
        );

        json_result(&StartGameResponse {
            session_id,
            moves_left: summary.moves_left,
            secret_word_length: summary.secret_word_length,
        })
    }

    /// Guess a character
    #[tool(description = "Guess a single character in a running hangman game")]
    #[instrument(skip_all)]
    async fn make_guess(
        &self,
        Parameters(params): Parameters<MakeGuessParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(
            "Guess received: session_id={}, character={:?}",
            params.session_id, params.character
        );

        let guess: Guess = params.character.parse().map_err(|e| {
            debug!("Request did not validate: {}", e);
            to_mcp_error(e)
        })?;

        let (state, status) = self
            .registry
            .evaluate_move_with_state(params.session_id, &guess)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::ValidationFailure | ErrorKind::TerminalState => {
                        debug!("Move refused: {}", e)
                    }
                    ErrorKind::NotFound => warn!("Move refused: {}", e),
                    _ => error!("Failed to make move for unexpected reason: {}", e),
                }
                to_mcp_error(e)
            })?;

        let response = GameStateResponse::new(params.session_id, state, status);
        if response.status.is_terminal() {
            info!(
                "Game finished: session_id={}, status={}",
                params.session_id, response.status
            );
        }

        json_result(&response.with_message("move accepted"))
    }

    /// Inspect a game
    #[tool(description = "Get the revealed word, guessed characters and moves left of a game")]
    #[instrument(skip_all)]
    async fn get_game_state(
        &self,
        Parameters(params): Parameters<GameStateParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Reading game state: session_id={}", params.session_id);
        let response = self.game_state(params.session_id)?;
        json_result(&response)
    }

    /// Delete a game
    #[tool(description = "Delete a hangman game")]
    #[instrument(skip_all)]
    async fn delete_game(
        &self,
        Parameters(params): Parameters<DeleteGameParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("Deleting game: session_id={}", params.session_id);

        self.registry
            .delete_session(params.session_id)
            .map_err(|e| {
                warn!("Could not delete game: {}", e);
                to_mcp_error(e)
            })?;

        json_result(&DeleteGameResponse {
            session_id: params.session_id,
            message: format!("Game '{}' deleted", params.session_id),
        })
    }

    /// List all games
    #[tool(description = "List all active hangman games")]
    #[instrument(skip_all)]
    async fn list_games(
        &self,
        Parameters(_params): Parameters<ListGamesParams>,
    ) -> Result<CallToolResult, McpError> {
        let games: Vec<GameInfo> = self
            .registry
            .list_sessions()
            .into_iter()
            .map(GameInfo::from)
            .collect();
        let count = games.len();

        info!("Found {} active game(s)", count);

        json_result(&ListGamesResponse { games, count })
    }
}

// Implement the ServerHandler trait to define server capabilities
#[tool_handler]
impl rmcp::ServerHandler for HangmanMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Hangman MCP Server - Guess the hidden word one character at a time. \
                 Use start_new_game to begin, make_guess to guess a character, \
                 get_game_state to inspect progress and delete_game when done."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangman_core::{GameConfig, GameStatus, RuleSet};

    fn server(word: &str, max_moves: u32) -> HangmanMcpServer {
        let config = GameConfig {
            max_moves,
            ..Default::default()
        };
        let rules = Arc::new(GameRules::new(RuleSet::default(), &config).unwrap());
        let registry = SessionRegistry::new(rules, vec![word.to_string()]);
        HangmanMcpServer::new(Arc::new(registry))
    }

    fn guess(session_id: SessionId, character: &str) -> Parameters<MakeGuessParams> {
        Parameters(MakeGuessParams {
            session_id,
            character: character.to_string(),
        })
    }

    #[test]
    fn test_error_mapping() {
        let err = to_mcp_error(Error::GameOver(SessionId::new(1)));
        assert_eq!(err.code.0, -32602);
        assert_eq!(err.data, Some(json!({ "kind": "terminal_state" })));

        let err = to_mcp_error(Error::Config("empty".to_string()));
        assert_eq!(err.code.0, -32603);
    }

    #[tokio::test]
    async fn test_start_new_game() {
        let server = server("cat", 10);
        let result = server.start_new_game(Parameters(StartGameParams {})).await;
        assert!(result.is_ok());
        assert_eq!(server.registry().session_count(), 1);

        server.start_new_game(Parameters(StartGameParams {})).await.unwrap();
        let sessions = server.registry().list_sessions();
        assert_eq!(sessions.len(), 2);
        assert_ne!(sessions[0].session_id, sessions[1].session_id);
    }

    #[tokio::test]
    async fn test_start_new_game_skips_taken_id() {
        let server = server("cat", 10);
        server.registry().create_session(SessionId::new(0)).unwrap();

        let result = server.start_new_game(Parameters(StartGameParams {})).await;
        assert!(result.is_ok());
        assert_eq!(server.registry().session_count(), 2);
    }

    #[tokio::test]
    async fn test_play_to_win() {
        let server = server("cat", 10);
        server.start_new_game(Parameters(StartGameParams {})).await.unwrap();
        let id = SessionId::new(0);

        for c in ["c", "a", "t"] {
            server.make_guess(guess(id, c)).await.unwrap();
        }
        assert!(server.registry().is_session_won(id).unwrap());

        let err = server.make_guess(guess(id, "z")).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
        assert_eq!(err.data, Some(json!({ "kind": "terminal_state" })));
    }

    #[tokio::test]
    async fn test_invalid_guess_input() {
        let server = server("cat", 10);
        server.start_new_game(Parameters(StartGameParams {})).await.unwrap();
        let id = SessionId::new(0);

        let err = server.make_guess(guess(id, "ab")).await.unwrap_err();
        assert_eq!(err.data, Some(json!({ "kind": "validation_failure" })));

        let err = server.make_guess(guess(id, "")).await.unwrap_err();
        assert_eq!(err.code.0, -32602);

        let err = server.make_guess(guess(id, "*")).await.unwrap_err();
        assert_eq!(err.data, Some(json!({ "kind": "validation_failure" })));

        let state = server.game_state(id).unwrap();
        assert_eq!(state.guessed_characters, "");
        assert_eq!(state.status, GameStatus::Active);
    }

    #[tokio::test]
    async fn test_unknown_game() {
        let server = server("cat", 10);
        let id = SessionId::new(42);

        let err = server.make_guess(guess(id, "a")).await.unwrap_err();
        assert_eq!(err.data, Some(json!({ "kind": "not_found" })));

        let err = server
            .get_game_state(Parameters(GameStateParams { session_id: id }))
            .await
            .unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[tokio::test]
    async fn test_delete_game() {
        let server = server("cat", 10);
        server.start_new_game(Parameters(StartGameParams {})).await.unwrap();
        let id = SessionId::new(0);

        let params = || Parameters(DeleteGameParams { session_id: id });
        server.delete_game(params()).await.unwrap();
        assert_eq!(server.registry().session_count(), 0);

        let err = server.delete_game(params()).await.unwrap_err();
        assert_eq!(err.data, Some(json!({ "kind": "not_found" })));
    }

    #[tokio::test]
    async fn test_list_games() {
        let server = server("dog", 1);
        server.start_new_game(Parameters(StartGameParams {})).await.unwrap();
        server.start_new_game(Parameters(StartGameParams {})).await.unwrap();
        server.make_guess(guess(SessionId::new(1), "z")).await.unwrap();

        let result = server.list_games(Parameters(ListGamesParams {})).await;
        assert!(result.is_ok());

        let games: Vec<GameInfo> = server
            .registry()
            .list_sessions()
            .into_iter()
            .map(GameInfo::from)
            .collect();
        assert_eq!(games[0].status, GameStatus::Active);
        assert_eq!(games[1].status, GameStatus::Lost);
    }
}
