//! # hangman-session
//!
//! Game session lifecycle for the Hangman MCP Server.
//!
//! This crate provides:
//! - Compiled game rules shared by every session
//! - Secret word selection
//! - The per-game state machine (guess legality, reveal, win/loss)
//! - Session registry management (create, lookup, delete, move evaluation)
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends on hangman-core and is
//! consumed by the transport layer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod registry;
pub mod rules;
pub mod session;
pub mod word;

// Re-export commonly used types
pub use registry::{RegistryConfig, SessionInfo, SessionRegistry};
pub use rules::GameRules;
pub use session::{GameState, Session, SessionSummary};
pub use word::{RandomWordPicker, WordPicker};
