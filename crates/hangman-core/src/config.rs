//! Configuration types for the Hangman MCP Server.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::Error;

/// Server configuration loaded from YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Server settings
    pub server: ServerSettings,
    /// Game parameters
    pub game: GameConfig,
    /// Move legality rules
    pub rules: RuleSet,
    /// Candidate secret words
    pub words: WordSettings,
}

impl ServerConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        let config: ServerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.transport != "stdio" {
            return Err(Error::Config(format!(
                "unsupported transport '{}', only 'stdio' is available",
                self.server.transport
            )));
        }

        self.game.validate()?;
        self.words.validate()?;
        self.check_guessable(&self.words.words)?;

        Ok(())
    }

    /// Resolve the candidate word list and check every word can be guessed.
    ///
    /// Reads `words.word_file` when set, so this is the startup check for
    /// the file's contents.
    pub fn load_words(&self) -> crate::Result<Vec<String>> {
        let words = self.words.load_candidates()?;
        self.check_guessable(&words)?;
        Ok(words)
    }

    /// With `limit_move_char_set` on, every character of every word must
    /// match the legal character pattern, otherwise the game is unwinnable.
    fn check_guessable(&self, words: &[String]) -> crate::Result<()> {
        if !self.rules.limit_move_char_set {
            return Ok(());
        }

        let pattern = self.game.legal_characters()?;
        let mut buf = [0u8; 4];
        for word in words {
            let word = word.trim();
            if let Some(c) = word
                .chars()
                .find(|c| !pattern.is_match(c.encode_utf8(&mut buf)))
            {
                return Err(Error::Config(format!(
                    "word '{}' contains '{}', which does not match '{}'",
                    word, c, self.game.legal_character_regexp
                )));
            }
        }
        Ok(())
    }
}

/// Server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Transport type (only stdio for now)
    pub transport: String,
    /// Maximum number of concurrent sessions (0 = unlimited)
    pub max_sessions: usize,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            transport: "stdio".to_string(),
            max_sessions: 1000,
            log_level: "info".to_string(),
        }
    }
}

impl ServerSettings {
    /// Session capacity, `None` when unlimited.
    pub fn session_limit(&self) -> Option<usize> {
        (self.max_sessions > 0).then_some(self.max_sessions)
    }
}

/// Game parameters shared by every session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of missed guesses allowed before the game is lost
    pub max_moves: u32,
    /// Regular expression a guessed character must match
    pub legal_character_regexp: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_moves: 10,
            legal_character_regexp: "^[a-z0-9]$".to_string(),
        }
    }
}

impl GameConfig {
    /// Validate the game parameters.
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_moves == 0 {
            return Err(Error::Config("game.max_moves must be > 0".to_string()));
        }
        self.legal_characters()?;
        Ok(())
    }

    /// Compile the legal character pattern.
    pub fn legal_characters(&self) -> crate::Result<Regex> {
        Regex::new(&self.legal_character_regexp).map_err(|e| {
            Error::Config(format!(
                "Invalid legal character pattern '{}': {}",
                self.legal_character_regexp, e
            ))
        })
    }
}

/// Which move-legality rules are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Reject moves once the move budget is spent
    pub limit_move_count: bool,
    /// Reject characters outside the legal character pattern
    pub limit_move_char_set: bool,
    /// Repeating a guessed letter goes through the normal move accounting
    pub same_letter_move_counts: bool,
    /// Repeating a guessed letter is a valid (no-op) guess
    pub same_letter_guess_counts: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            limit_move_count: true,
            limit_move_char_set: true,
            same_letter_move_counts: true,
            same_letter_guess_counts: false,
        }
    }
}

/// Candidate secret words.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordSettings {
    /// Inline word list
    pub words: Vec<String>,
    /// Optional file with one word per line (`#` starts a comment)
    pub word_file: Option<PathBuf>,
}

impl Default for WordSettings {
    fn default() -> Self {
        Self {
            words: [
                "rust", "borrow", "lifetime", "trait", "closure", "iterator", "module",
                "compiler", "pattern", "ownership", "executioner", "gallows",
            ]
            .iter()
            .map(|w| w.to_string())
            .collect(),
            word_file: None,
        }
    }
}

impl WordSettings {
    /// Validate the inline list without touching the filesystem.
    pub fn validate(&self) -> crate::Result<()> {
        if self.words.is_empty() && self.word_file.is_none() {
            return Err(Error::Config(
                "words: either words or word_file must be set".to_string(),
            ));
        }
        if self.words.iter().any(|w| w.trim().is_empty()) {
            return Err(Error::Config("words cannot contain empty entries".to_string()));
        }
        Ok(())
    }

    /// Resolve the full candidate list: inline words followed by the file's words.
    pub fn load_candidates(&self) -> crate::Result<Vec<String>> {
        let mut candidates: Vec<String> = self
            .words
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();

        if let Some(path) = &self.word_file {
            let content = std::fs::read_to_string(path)?;
            candidates.extend(parse_word_list(&content));
        }

        if candidates.is_empty() {
            return Err(Error::Config("candidate word list is empty".to_string()));
        }
        Ok(candidates)
    }
}

fn parse_word_list(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
}
