//! Error types for the Hangman MCP Server.

use serde::Serialize;
use thiserror::Error;

use crate::SessionId;

/// Main error type for hangman operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Guess violates the configured rule set
    #[error("Illegal move in session {session_id}: '{character}' did not comply with the rule set")]
    IllegalMove {
        /// Session the guess was made against
        session_id: SessionId,
        /// Character that was guessed
        character: char,
    },

    /// Session not found
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// Mutation attempted on a finished session
    #[error("Game in session {0} is finished, can't mutate")]
    GameOver(SessionId),

    /// Session ID already in use
    #[error("Session already exists: {0}")]
    DuplicateSession(SessionId),

    /// Session limit reached
    #[error("Session limit reached (max: {0})")]
    SessionLimitReached(usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Invalid input or parameters (generic)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure categories callers branch on to pick an external representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input broke a rule; nothing was changed
    ValidationFailure,
    /// Referenced session does not exist
    NotFound,
    /// Mutation attempted on a won or lost session
    TerminalState,
    /// Startup configuration is unusable
    Configuration,
    /// Resource collision or capacity exhausted; retry may succeed
    Conflict,
}

impl Error {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IllegalMove { .. } | Error::InvalidInput(_) => ErrorKind::ValidationFailure,
            Error::SessionNotFound(_) => ErrorKind::NotFound,
            Error::GameOver(_) => ErrorKind::TerminalState,
            Error::DuplicateSession(_) | Error::SessionLimitReached(_) => ErrorKind::Conflict,
            Error::Config(_) | Error::ConfigParse(_) | Error::Io(_) => ErrorKind::Configuration,
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_move_error() {
        let err = Error::IllegalMove {
            session_id: SessionId::new(3),
            character: '#',
        };
        assert_eq!(
            err.to_string(),
            "Illegal move in session 3: '#' did not comply with the rule set"
        );
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    }

    #[test]
    fn test_session_not_found_error() {
        let err = Error::SessionNotFound(SessionId::new(951));
        assert_eq!(err.to_string(), "Session not found: 951");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_error_kind_serialization() {
        let json = serde_json::to_string(&ErrorKind::TerminalState).unwrap();
        assert_eq!(json, "\"terminal_state\"");
    }

    #[test]
    fn test_game_over_error() {
        let err = Error::GameOver(SessionId::new(196));
        assert_eq!(err.to_string(), "Game in session 196 is finished, can't mutate");
        assert_eq!(err.kind(), ErrorKind::TerminalState);
    }

    #[test]
    fn test_duplicate_session_error() {
        let err = Error::DuplicateSession(SessionId::new(5));
        assert_eq!(err.to_string(), "Session already exists: 5");
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_session_limit_reached_error() {
        let err = Error::SessionLimitReached(10);
        assert_eq!(err.to_string(), "Session limit reached (max: 10)");
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_config_error() {
        let err = Error::Config("candidate word list is empty".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: candidate word list is empty"
        );
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_invalid_input_error() {
        let err = Error::InvalidInput("missing parameter".to_string());
        assert_eq!(err.to_string(), "Invalid input: missing parameter");
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<u32>("[not, a, number]").unwrap_err();
        let err: Error = yaml_err.into();
        assert!(matches!(err, Error::ConfigParse(_)));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
