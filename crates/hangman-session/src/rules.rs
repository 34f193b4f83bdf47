//! Game rules shared by every session.

use regex::Regex;

use hangman_core::{Error, GameConfig, Result, RuleSet};

/// Rule set plus game parameters, with the legal character pattern compiled.
#[derive(Debug, Clone)]
pub struct GameRules {
    rule_set: RuleSet,
    max_moves: u32,
    legal_characters: Regex,
}

impl GameRules {
    /// Build the rules from configuration values.
    pub fn new(rule_set: RuleSet, config: &GameConfig) -> Result<Self> {
        if config.max_moves == 0 {
            return Err(Error::Config("max_moves must be > 0".to_string()));
        }
        Ok(Self {
            rule_set,
            max_moves: config.max_moves,
            legal_characters: config.legal_characters()?,
        })
    }

    /// Active rule flags.
    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    /// Number of missed guesses allowed.
    pub fn max_moves(&self) -> u32 {
        self.max_moves
    }

    /// Whether a character matches the legal character pattern.
    pub fn is_legal_character(&self, character: char) -> bool {
        let mut buf = [0u8; 4];
        self.legal_characters.is_match(character.encode_utf8(&mut buf))
    }

    /// Source text of the legal character pattern.
    pub fn legal_character_pattern(&self) -> &str {
        self.legal_characters.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = GameRules::new(RuleSet::default(), &GameConfig::default()).unwrap();
        assert_eq!(rules.max_moves(), 10);
        assert_eq!(rules.rule_set(), &RuleSet::default());
        assert_eq!(rules.legal_character_pattern(), "^[a-z0-9]$");
    }

    #[test]
    fn test_legal_character() {
        let rules = GameRules::new(RuleSet::default(), &GameConfig::default()).unwrap();
        assert!(rules.is_legal_character('a'));
        assert!(rules.is_legal_character('3'));
        assert!(!rules.is_legal_character('#'));
        assert!(!rules.is_legal_character('Z'));
    }

    #[test]
    fn test_zero_max_moves() {
        let config = GameConfig {
            max_moves: 0,
            ..Default::default()
        };
        let result = GameRules::new(RuleSet::default(), &config);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_malformed_pattern() {
        let config = GameConfig {
            legal_character_regexp: "[a-".to_string(),
            ..Default::default()
        };
        let result = GameRules::new(RuleSet::default(), &config);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
