//! Arena configuration management.
//!
//! Consolidates command-line overrides, environment variables and bracket
//! setup files into one validated configuration.

use knockout::bracket::{BRACKET_SIZE, BracketSetup, MatchConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Default entrants when none are configured
const DEFAULT_PLAYERS: [&str; BRACKET_SIZE] = ["Player 1", "Player 2", "Player 3", "Player 4"];

/// Complete arena configuration
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    /// Entrant names in seeding order
    pub players: Vec<String>,
    /// Rules for every match
    pub match_config: MatchConfig,
    /// Acknowledge and advance without waiting for Enter
    pub auto_advance: bool,
    /// Simulated time per rally
    pub rally_delay: Duration,
    /// Seed for reproducible simulations
    pub seed: Option<u64>,
    /// Print the final bracket as JSON
    pub json: bool,
}

/// Values given on the command line, taking priority over the environment
#[derive(Debug, Default, Clone)]
pub struct ArenaOverrides {
    pub players: Option<String>,
    pub score_limit: Option<u8>,
    pub power_ups: bool,
    pub setup: Option<PathBuf>,
    pub auto_advance: bool,
    pub seed: Option<u64>,
    pub json: bool,
}

impl ArenaConfig {
    /// Load configuration from overrides, then environment, then the setup
    /// file, then defaults
    ///
    /// # Errors
    ///
    /// Returns error if the setup file cannot be loaded or a value cannot be parsed
    pub fn load(overrides: ArenaOverrides) -> Result<Self, ConfigError> {
        let setup = match overrides.setup {
            Some(path) => Some(
                BracketSetup::from_file(&path).map_err(|e| ConfigError::Invalid {
                    var: "--setup".to_string(),
                    reason: format!("{e:#}"),
                })?,
            ),
            None => None,
        };

        let players = resolve_players(
            overrides.players,
            std::env::var("KNOCKOUT_PLAYERS").ok(),
            setup.as_ref(),
        );

        let base = setup.map(|s| s.match_config).unwrap_or_default();
        let score_limit = match overrides.score_limit {
            Some(limit) => limit,
            None => parse_env("KNOCKOUT_SCORE_LIMIT")?.unwrap_or(base.score_limit),
        };
        let power_ups = overrides.power_ups
            || parse_env("KNOCKOUT_POWER_UPS")?.unwrap_or(base.power_ups);

        let auto_advance =
            overrides.auto_advance || parse_env("KNOCKOUT_AUTO_ADVANCE")?.unwrap_or(false);
        let rally_delay =
            Duration::from_millis(parse_env("KNOCKOUT_RALLY_DELAY_MS")?.unwrap_or(150));
        let seed = match overrides.seed {
            Some(seed) => Some(seed),
            None => parse_env("KNOCKOUT_SEED")?,
        };

        Ok(ArenaConfig {
            players,
            match_config: MatchConfig::new(score_limit).with_power_ups(power_ups),
            auto_advance,
            rally_delay,
            seed,
            json: overrides.json,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.len() != BRACKET_SIZE {
            return Err(ConfigError::Invalid {
                var: "KNOCKOUT_PLAYERS".to_string(),
                reason: format!(
                    "Need exactly {BRACKET_SIZE} players, got {}",
                    self.players.len()
                ),
            });
        }

        if let Some(blank) = self.players.iter().position(|name| name.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                var: "KNOCKOUT_PLAYERS".to_string(),
                reason: format!("Player {} has an empty name", blank + 1),
            });
        }

        self.match_config
            .validate()
            .map_err(|e| ConfigError::Invalid {
                var: "KNOCKOUT_SCORE_LIMIT".to_string(),
                reason: e.to_string(),
            })?;

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Entrant names from the first source that names them
fn resolve_players(
    cli: Option<String>,
    env: Option<String>,
    setup: Option<&BracketSetup>,
) -> Vec<String> {
    cli.or(env)
        .map(|list| split_players(&list))
        .or_else(|| setup.map(|setup| setup.entrants.clone()))
        .unwrap_or_else(|| DEFAULT_PLAYERS.iter().map(ToString::to_string).collect())
}

fn split_players(list: &str) -> Vec<String> {
    list.split(',').map(|name| name.trim().to_string()).collect()
}

/// Parse an environment variable if it is set
fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|e: T::Err| ConfigError::Invalid {
            var: key.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(players: &[&str], score_limit: u8) -> ArenaConfig {
        ArenaConfig {
            players: players.iter().map(ToString::to_string).collect(),
            match_config: MatchConfig::new(score_limit),
            auto_advance: true,
            rally_delay: Duration::ZERO,
            seed: Some(1),
            json: false,
        }
    }

    #[test]
    fn test_split_players_trims_names() {
        assert_eq!(
            split_players("Ann, Bo ,Cy,  Di"),
            vec!["Ann", "Bo", "Cy", "Di"]
        );
    }

    #[test]
    fn test_resolve_players_precedence() {
        let setup = BracketSetup::new(
            ["S1", "S2", "S3", "S4"].map(String::from).to_vec(),
            MatchConfig::default(),
        );

        let env = Some("E1,E2,E3,E4".to_string());
        assert_eq!(
            resolve_players(Some("C1,C2,C3,C4".to_string()), env.clone(), Some(&setup)),
            vec!["C1", "C2", "C3", "C4"]
        );
        assert_eq!(
            resolve_players(None, env, Some(&setup)),
            vec!["E1", "E2", "E3", "E4"]
        );
        assert_eq!(
            resolve_players(None, None, Some(&setup)),
            vec!["S1", "S2", "S3", "S4"]
        );
        assert_eq!(resolve_players(None, None, None), DEFAULT_PLAYERS.to_vec());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid {
            var: "KNOCKOUT_SEED".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("KNOCKOUT_SEED"));
        assert!(msg.contains("invalid digit"));
    }

    #[test]
    fn test_validate_accepts_four_players() {
        assert!(config(&["A", "B", "C", "D"], 5).validate().is_ok());
    }

    #[test]
    fn test_validate_player_count() {
        let err = config(&["A", "B", "C"], 5).validate().unwrap_err();
        assert!(err.to_string().contains("exactly 4 players"));
    }

    #[test]
    fn test_validate_blank_player() {
        let err = config(&["A", "", "C", "D"], 5).validate().unwrap_err();
        assert!(err.to_string().contains("Player 2"));
    }

    #[test]
    fn test_validate_score_limit() {
        let err = config(&["A", "B", "C", "D"], 0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("KNOCKOUT_SCORE_LIMIT"));
    }

    #[test]
    fn test_load_prefers_overrides() {
        let config = ArenaConfig::load(ArenaOverrides {
            players: Some("W,X,Y,Z".to_string()),
            score_limit: Some(9),
            power_ups: true,
            seed: Some(42),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(config.players, vec!["W", "X", "Y", "Z"]);
        assert_eq!(config.match_config.score_limit, 9);
        assert!(config.match_config.power_ups);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_load_missing_setup_file() {
        let err = ArenaConfig::load(ArenaOverrides {
            setup: Some(PathBuf::from("/nonexistent/setup.json")),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("--setup"));
    }
}
