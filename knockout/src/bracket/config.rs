//! Match and bracket configuration models.

use super::errors::ConfigurationError;
use super::models::{BRACKET_SIZE, Entrant};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Lowest accepted score limit
pub const MIN_SCORE_LIMIT: u8 = 1;

/// Highest accepted score limit
pub const MAX_SCORE_LIMIT: u8 = 21;

/// Default points needed to win a match
pub const DEFAULT_SCORE_LIMIT: u8 = 5;

/// Rules handed to the match runner for every match of a bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Points needed to win a match
    pub score_limit: u8,

    /// Whether power-ups spawn during play
    pub power_ups: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            score_limit: DEFAULT_SCORE_LIMIT,
            power_ups: false,
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub const fn new(score_limit: u8) -> Self {
        Self {
            score_limit,
            power_ups: false,
        }
    }

    #[must_use]
    pub const fn with_power_ups(mut self, power_ups: bool) -> Self {
        self.power_ups = power_ups;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(MIN_SCORE_LIMIT..=MAX_SCORE_LIMIT).contains(&self.score_limit) {
            return Err(ConfigurationError::ScoreLimitOutOfRange {
                min: MIN_SCORE_LIMIT,
                max: MAX_SCORE_LIMIT,
                got: self.score_limit,
            });
        }

        Ok(())
    }
}

/// Entrant names and match rules for one bracket, as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSetup {
    pub entrants: Vec<String>,
    #[serde(default)]
    pub match_config: MatchConfig,
}

impl BracketSetup {
    pub fn new(entrants: Vec<String>, match_config: MatchConfig) -> Self {
        Self {
            entrants,
            match_config,
        }
    }

    /// Load a setup from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read bracket setup {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Failed to parse bracket setup {}", path.display()))
    }

    /// Parse a setup from JSON text
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Register every named entrant under a fresh identity
    pub fn register(&self) -> Vec<Entrant> {
        self.entrants.iter().map(Entrant::new).collect()
    }

    /// Whether the setup names the right number of entrants
    pub fn is_full(&self) -> bool {
        self.entrants.len() == BRACKET_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MatchConfig::default();
        assert_eq!(config.score_limit, 5);
        assert!(!config.power_ups);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_score_limit_bounds() {
        assert!(MatchConfig::new(MIN_SCORE_LIMIT).validate().is_ok());
        assert!(MatchConfig::new(MAX_SCORE_LIMIT).validate().is_ok());

        let err = MatchConfig::new(0).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::ScoreLimitOutOfRange {
                min: 1,
                max: 21,
                got: 0
            }
        );
        assert!(MatchConfig::new(22).validate().is_err());
    }

    #[test]
    fn test_setup_from_json() {
        let setup = BracketSetup::from_json(
            r#"{"entrants": ["A", "B", "C", "D"], "match_config": {"score_limit": 7}}"#,
        )
        .unwrap();
        assert!(setup.is_full());
        assert_eq!(setup.match_config.score_limit, 7);
        assert!(!setup.match_config.power_ups);

        let entrants = setup.register();
        assert_eq!(entrants.len(), 4);
        assert_eq!(entrants[2].name, "C");
    }

    #[test]
    fn test_setup_defaults_match_config() {
        let setup = BracketSetup::from_json(r#"{"entrants": ["A", "B", "C"]}"#).unwrap();
        assert!(!setup.is_full());
        assert_eq!(setup.match_config, MatchConfig::default());
    }

    #[test]
    fn test_setup_from_missing_file() {
        let err = BracketSetup::from_file("/nonexistent/bracket.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read bracket setup"));
    }
}
