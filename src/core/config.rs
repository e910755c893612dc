//! Tunable economy and display pacing.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::core::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game configuration.
///
/// Missing fields fall back to the balance constants, so a config file only
/// needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub starting_gold: i64,
    pub upgrade_cost: i64,
    pub victory_gold: i64,
    pub repair_cost: i64,
    pub repair_amount: f64,
    /// Pause a host should leave between the player turn ending and
    /// `resolve_enemy_turn`.
    pub enemy_turn_delay_ms: u64,
    /// Pause a host should leave between victory and `return_to_shop`.
    pub victory_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_gold: STARTING_GOLD,
            upgrade_cost: UPGRADE_COST,
            victory_gold: VICTORY_GOLD,
            repair_cost: REPAIR_COST,
            repair_amount: REPAIR_AMOUNT,
            enemy_turn_delay_ms: ENEMY_TURN_DELAY_MS,
            victory_delay_ms: VICTORY_DELAY_MS,
        }
    }
}

impl GameConfig {
    /// Config for headless runs: no display pauses.
    pub fn headless() -> Self {
        Self {
            enemy_turn_delay_ms: 0,
            victory_delay_ms: 0,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = GameConfig::default();
        assert_eq!(config.starting_gold, 50);
        assert_eq!(config.upgrade_cost, 20);
        assert_eq!(config.victory_gold, 50);
        assert_eq!(config.repair_cost, 10);
        assert_eq!(config.repair_amount, 20.0);
        assert_eq!(config.enemy_turn_delay_ms, 500);
        assert_eq!(config.victory_delay_ms, 1500);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "starting_gold": 200 }"#).unwrap();
        assert_eq!(config.starting_gold, 200);
        assert_eq!(config.upgrade_cost, UPGRADE_COST);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let result = GameConfig::from_json("{ starting_gold: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = GameConfig::load(Path::new("/nonexistent/tanks.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_headless_has_no_delays() {
        let config = GameConfig::headless();
        assert_eq!(config.enemy_turn_delay_ms, 0);
        assert_eq!(config.victory_delay_ms, 0);
        assert_eq!(config.starting_gold, STARTING_GOLD);
    }
}
