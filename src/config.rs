//! Configuration management for session-log
//!
//! Handles loading configuration from ~/.config/session-log/config.toml.
//! Every key is optional and a missing file means defaults.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::logging::{LogConfig, Verbosity};

/// Configuration file name
const CONFIG_FILE: &str = "config.toml";

/// Application name for config directory
const APP_NAME: &str = "session-log";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Claude Code data directory, `~/.claude` when unset
    #[serde(default)]
    pub claude_dir: Option<PathBuf>,

    /// Diagnostics verbosity on stderr
    #[serde(default)]
    pub verbosity: Verbosity,

    /// Optional file receiving debug-level diagnostics
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Config {
    /// Get the config file path
    ///
    /// Returns ~/.config/session-log/config.toml on Linux
    pub fn config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Load configuration from the default location
    ///
    /// Returns default config if the file doesn't exist
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Directory holding per-project transcript directories, if overridden
    pub fn projects_root(&self) -> Option<PathBuf> {
        self.claude_dir.as_ref().map(|dir| dir.join("projects"))
    }

    /// Logging settings derived from this config
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            verbosity: self.verbosity,
            log_file: self.log_file.clone(),
        }
    }
}
