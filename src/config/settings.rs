//! Application settings loaded from `config.toml`.
//!
//! Every field has a default, so an absent file or an empty one yields a working
//! configuration. A file that exists but does not parse is an error.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming an alternative settings file.
pub const CONFIG_PATH_VAR: &str = "WEALTH_TRACKER_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Storage keys for each asset category
    pub partitions: PartitionKeys,
    /// Log output settings
    pub logging: LoggingConfig,
}

/// Partition keys under which each category is persisted
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PartitionKeys {
    /// Cash transactions
    pub cash: String,
    /// Precious metal holdings
    pub metals: String,
    /// Seed inventory
    pub seeds: String,
}

impl Default for PartitionKeys {
    fn default() -> Self {
        Self {
            cash: "cashData".to_string(),
            metals: "metalsData".to_string(),
            seeds: "seedInventory".to_string(),
        }
    }
}

/// Logging configuration; `RUST_LOG` takes precedence when set
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

/// Loads settings from `$WEALTH_TRACKER_CONFIG` or `./config.toml`, using defaults
/// when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    if Path::new(&path).exists() {
        load_settings(&path)
    } else {
        tracing::info!("No config file at {path}, using defaults");
        Ok(Settings::default())
    }
}
