//! Opponent configuration.

use crate::opponent::{DEFAULT_TT_CAPACITY, Difficulty};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Configuration for a computer opponent.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct OpponentConfig {
    /// Difficulty tier (easy, medium or hard).
    #[serde(default)]
    difficulty: Difficulty,

    /// Optional cap on searched nodes per move.
    #[serde(default)]
    node_budget: Option<u64>,

    /// Maximum transposition table entries.
    #[serde(default = "default_tt_capacity")]
    tt_capacity: usize,
}

fn default_tt_capacity() -> usize {
    DEFAULT_TT_CAPACITY
}

impl OpponentConfig {
    /// Creates a configuration with defaults for everything but difficulty.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            node_budget: None,
            tt_capacity: default_tt_capacity(),
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(difficulty = %config.difficulty, node_budget = ?config.node_budget, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.tt_capacity == 0 {
            return Err(ConfigError::new("tt_capacity must be positive".to_string()));
        }
        Ok(config)
    }
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
