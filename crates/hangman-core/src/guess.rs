//! Guess type.

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Error;

/// A single-character move submitted against a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Guess {
    /// The guessed character
    pub character: char,
}

impl Guess {
    /// Create a guess for a character.
    pub fn new(character: char) -> Self {
        Self { character }
    }
}

impl From<char> for Guess {
    fn from(character: char) -> Self {
        Self::new(character)
    }
}

impl FromStr for Guess {
    type Err = Error;

    /// Parse a guess from text holding exactly one character.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(character), None) => Ok(Self::new(character)),
            (None, _) => Err(Error::InvalidInput(
                "guess must contain a character".to_string(),
            )),
            (Some(_), Some(_)) => Err(Error::InvalidInput(format!(
                "guess must be a single character, got '{s}'"
            ))),
        }
    }
}
