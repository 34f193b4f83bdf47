//! # hangman-core
//!
//! Core types for the Hangman MCP Server.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other hangman crates. It provides:
//!
//! - Session identity types (SessionId, SessionIdGenerator, GameStatus)
//! - Guess type
//! - Rule and game configuration types, plus the YAML server configuration
//! - Error types
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other hangman crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod guess;
pub mod session;

// Re-export commonly used types
pub use config::{GameConfig, RuleSet, ServerConfig, ServerSettings, WordSettings};
pub use error::{Error, ErrorKind, Result};
pub use guess::Guess;
pub use session::{GameStatus, SessionId, SessionIdGenerator};
