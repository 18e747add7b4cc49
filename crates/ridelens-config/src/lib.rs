//! Configuration management for ridelens.
//!
//! Loads configuration from TOML files: where the dataset lives and which
//! control values the dashboard starts with.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use ridelens_core::{Aggregation, Resolution};

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub controls: ControlsConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// Searches in order:
    /// 1. `./config.toml`
    /// 2. `~/.config/ridelens/config.toml`
    ///
    /// Returns default config if no file found.
    pub fn load_default() -> Self {
        // Try current directory first
        if let Ok(config) = Self::load("config.toml") {
            return config;
        }

        // Try user config directory
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("ridelens").join("config.toml");
            if let Ok(config) = Self::load(&config_path) {
                return config;
            }
        }

        // Return defaults
        Self::default()
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("config.toml")
    }
}

/// Dataset location configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the daily ridership CSV.
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/ridership.csv"),
        }
    }
}

/// Startup values for the primary selector set and the synchronize toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Modes shown when the dashboard opens.
    pub modes: Vec<String>,
    pub resolution: Resolution,
    pub aggregation: Aggregation,
    /// Whether the secondary selectors start mirroring the primary ones.
    pub synchronize: bool,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            modes: vec!["bus".to_string(), "rail".to_string()],
            resolution: Resolution::Weekly,
            aggregation: Aggregation::Mean,
            synchronize: true,
        }
    }
}
