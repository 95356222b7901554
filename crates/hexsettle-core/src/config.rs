//! Match configuration.

use crate::events::DEFAULT_LOG_CAPACITY;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("victory point target must be at least 1")]
    ZeroVictoryTarget,
}

/// Settings fixed for the length of a match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Total victory points that end the match
    pub victory_points_to_win: u32,
    /// Number of entries kept in the action log
    pub log_capacity: usize,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            victory_points_to_win: 10,
            log_capacity: DEFAULT_LOG_CAPACITY,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse a config document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        if config.victory_points_to_win == 0 {
            return Err(ConfigError::ZeroVictoryTarget);
        }
        Ok(config)
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the victory point target
    pub fn with_victory_points(mut self, points: u32) -> Self {
        self.victory_points_to_win = points;
        self
    }
}
