//! Game session state machine.
//!
//! A [`Session`] owns one game's secret word and the progress made against
//! it. Moves enter through [`Session::evaluate_move`], which validates the
//! guess against the shared [`GameRules`] and then applies it. The session
//! does not refuse moves once won or lost; the registry guards that.

use std::sync::Arc;
use std::time::SystemTime;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use hangman_core::{Error, GameStatus, Guess, Result, SessionId};

use crate::rules::GameRules;
use crate::word::WordPicker;

/// Initial view of a freshly created session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionSummary {
    /// Misses left before the game is lost
    pub moves_left: u32,
    /// Number of characters in the secret word
    pub secret_word_length: usize,
}

/// Player-facing projection of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GameState {
    /// Misses left before the game is lost
    pub moves_left: u32,
    /// Every distinct character tried so far, in guess order
    pub guessed_characters: String,
    /// Secret word with unrevealed positions as `null`
    pub solved_word: Vec<Option<char>>,
}

/// A single hangman game.
#[derive(Debug)]
pub struct Session {
    /// Session identifier
    id: SessionId,

    /// Rules and parameters this game is validated against
    rules: Arc<GameRules>,

    /// Word being guessed
    secret_word: Vec<char>,

    /// Revealed progress, same length as the secret word
    solved_word: Vec<Option<char>>,

    /// Distinct guessed characters in first-seen order
    guessed_characters: String,

    /// Number of missed guesses
    moves_made: u32,

    /// Session creation time
    created_at: SystemTime,
}

impl Session {
    /// Create a new session with a secret word drawn from `candidates`.
    pub fn new(
        id: SessionId,
        rules: Arc<GameRules>,
        candidates: &[String],
        picker: &dyn WordPicker,
    ) -> Result<Self> {
        let secret_word: Vec<char> = picker
            .pick(candidates)
            .ok_or_else(|| Error::Config("candidate word list is empty".to_string()))?
            .trim()
            .chars()
            .collect();
        if secret_word.is_empty() {
            return Err(Error::Config("picked secret word is empty".to_string()));
        }

        info!(
            "Creating session: id={}, word_length={}, max_moves={}",
            id,
            secret_word.len(),
            rules.max_moves()
        );

        Ok(Self {
            id,
            rules,
            solved_word: vec![None; secret_word.len()],
            secret_word,
            guessed_characters: String::new(),
            moves_made: 0,
            created_at: SystemTime::now(),
        })
    }

    /// Get the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Get the session creation time.
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Rules the session validates against.
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Number of missed guesses so far.
    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    /// Misses left before the game is lost.
    pub fn moves_left(&self) -> u32 {
        self.rules.max_moves().saturating_sub(self.moves_made)
    }

    /// Number of characters in the secret word.
    pub fn secret_word_length(&self) -> usize {
        self.secret_word.len()
    }

    /// Revealed progress; `None` marks an unrevealed position.
    pub fn solved_word(&self) -> &[Option<char>] {
        &self.solved_word
    }

    /// Distinct guessed characters in first-seen order.
    pub fn guessed_characters(&self) -> &str {
        &self.guessed_characters
    }

    /// Number of positions revealed correctly.
    pub fn solved_count(&self) -> usize {
        self.secret_word
            .iter()
            .zip(&self.solved_word)
            .filter(|(secret, solved)| Some(**secret) == **solved)
            .count()
    }

    /// Whether every character has been revealed.
    pub fn is_won(&self) -> bool {
        self.solved_count() == self.secret_word.len()
    }

    /// Whether the move budget ran out before the word was solved.
    pub fn is_lost(&self) -> bool {
        self.moves_left() == 0 && !self.is_won()
    }

    /// Whether the game is won or lost.
    pub fn is_over(&self) -> bool {
        self.is_won() || self.is_lost()
    }

    /// Current lifecycle state.
    pub fn status(&self) -> GameStatus {
        if self.is_won() {
            GameStatus::Won
        } else if self.is_lost() {
            GameStatus::Lost
        } else {
            GameStatus::Active
        }
    }

    /// Initial summary returned on creation.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            moves_left: self.moves_left(),
            secret_word_length: self.secret_word_length(),
        }
    }

    /// Player-facing state projection.
    pub fn state(&self) -> GameState {
        GameState {
            moves_left: self.moves_left(),
            guessed_characters: self.guessed_characters.clone(),
            solved_word: self.solved_word.clone(),
        }
    }

    /// Whether a character matches the legal character pattern.
    pub fn is_legal_format(&self, character: char) -> bool {
        self.rules.is_legal_character(character)
    }

    /// Check a guess against every enabled rule.
    ///
    /// Rules are independent; each enabled one is evaluated and the results
    /// are ANDed.
    pub fn is_legal_move(&self, guess: &Guess) -> bool {
        let rule_set = self.rules.rule_set();
        let mut validity = true;

        if rule_set.limit_move_count && !self.within_move_budget() {
            debug!(
                "Guess rejected: {} moves made, only {} allowed",
                self.moves_made,
                self.rules.max_moves()
            );
            validity = false;
        }

        if rule_set.limit_move_char_set && !self.is_legal_format(guess.character) {
            debug!(
                "Guess rejected: '{}' does not match {}",
                guess.character,
                self.rules.legal_character_pattern()
            );
            validity = false;
        }

        if !rule_set.same_letter_move_counts && self.is_void_repeat(guess.character) {
            debug!(
                "Guess rejected: '{}' was already guessed",
                guess.character
            );
            validity = false;
        }

        validity
    }

    fn within_move_budget(&self) -> bool {
        self.moves_made < self.rules.max_moves()
    }

    // A repeat is only void when repeats don't count as valid guesses either.
    fn is_void_repeat(&self, character: char) -> bool {
        self.has_guessed(character) && !self.rules.rule_set().same_letter_guess_counts
    }

    fn has_guessed(&self, character: char) -> bool {
        self.guessed_characters.contains(character)
    }

    /// Validate and apply a guess.
    ///
    /// An illegal guess leaves the session untouched.
    pub fn evaluate_move(&mut self, guess: &Guess) -> Result<()> {
        if !self.is_legal_move(guess) {
            return Err(Error::IllegalMove {
                session_id: self.id,
                character: guess.character,
            });
        }

        let indices = self.match_character(guess.character);
        debug!(
            "Session {}: '{}' matched {} position(s)",
            self.id,
            guess.character,
            indices.len()
        );
        self.update_game_state(guess.character, &indices);
        Ok(())
    }

    /// Positions of `character` in the secret word, ascending.
    pub fn match_character(&self, character: char) -> Vec<usize> {
        self.secret_word
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == character)
            .map(|(index, _)| index)
            .collect()
    }

    /// Move the game forward without any validation.
    ///
    /// A miss (no indices) costs one move; every index is revealed; the
    /// character is recorded once. Indices past the end of the word are
    /// ignored.
    pub fn update_game_state(&mut self, character: char, indices: &[usize]) {
        if indices.is_empty() {
            self.moves_made += 1;
        }

        for &index in indices {
            if let Some(slot) = self.solved_word.get_mut(index) {
                *slot = Some(character);
            }
        }

        if !self.has_guessed(character) {
            self.guessed_characters.push(character);
        }
    }
}
