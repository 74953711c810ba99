//! Server configuration.
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file (or no file) is a valid configuration.
//!
//! ```toml
//! log_file = "dummy_server.log"
//! max_players = 20
//! color = "auto"
//! max_workers = 8
//! shutdown_grace_ms = 1000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ansi::should_colorize;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Color output mode for console records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ColorMode {
    /// Colors when stdout is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    /// Always emit ANSI colors
    Always,
    /// Never emit ANSI colors
    Never,
}

impl ColorMode {
    /// Resolve to a yes/no decision for the current process.
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => should_colorize(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Configuration of one dummy server process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Append-only log file.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Capacity of the simulated online roster.
    #[serde(default = "default_max_players")]
    pub max_players: usize,

    /// Console color mode.
    #[serde(default)]
    pub color: ColorMode,

    /// Maximum number of handlers running at once. Unbounded when absent.
    #[serde(default)]
    pub max_workers: Option<usize>,

    /// How long to wait for in-flight handlers after the loop stops.
    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
}

fn default_log_file() -> PathBuf {
    PathBuf::from("dummy_server.log")
}

fn default_max_players() -> usize {
    20
}

fn default_shutdown_grace_ms() -> u64 {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            max_players: default_max_players(),
            color: ColorMode::default(),
            max_workers: None,
            shutdown_grace_ms: default_shutdown_grace_ms(),
        }
    }
}

impl ServerConfig {
    /// Parse a configuration from TOML text.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_workers == Some(0) {
            return Err(ConfigError::Invalid(
                "max_workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}
