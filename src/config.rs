//! Configuration management for bpmchain

use crate::crypto::FieldEncoding;
use crate::error::ChainError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use tracing::Level;

pub const DEFAULT_CONFIG_PATH: &str = "bpmchain.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    #[serde(default)]
    pub hash_encoding: FieldEncoding,
    /// Fixed genesis timestamp; the current time is used when unset.
    #[serde(default)]
    pub genesis_timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    pub fn log_level(&self) -> Result<Level, ChainError> {
        Level::from_str(self.logging.level.trim()).map_err(|_| {
            ChainError::ConfigError(format!(
                "logging.level '{}' is not one of trace, debug, info, warn, error",
                self.logging.level
            ))
        })
    }

    fn validate(&self) -> Result<(), ChainError> {
        self.log_level()?;

        if let Some(ts) = &self.chain.genesis_timestamp {
            if ts.trim().is_empty() {
                return Err(ChainError::ConfigError(
                    "chain.genesis_timestamp must not be empty when set".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Loads configuration from `path`. A missing file yields the defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ChainError> {
    let path = path.as_ref();
    let config = match fs::read_to_string(path) {
        Ok(config_str) => toml::from_str(&config_str)?,
        Err(e) if e.kind() == ErrorKind::NotFound => Config::default(),
        Err(e) => {
            return Err(ChainError::ConfigError(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    config.validate()?;
    Ok(config)
}

fn default_log_level() -> String {
    "info".to_string()
}
