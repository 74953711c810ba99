//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;
use mcdummy_common::{ColorMode, ConfigError, ServerConfig};

/// Environment variable read when `--log-level` is not forced by `--verbose`.
pub const LOG_LEVEL_ENV: &str = "MCDUMMY_LOG_LEVEL";

/// Log verbosity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors
    Warn,
    /// Show informational messages, warnings, and errors (default)
    #[default]
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// mcdummy - dummy game-server console
///
/// Reads commands from stdin and answers the way a game server would,
/// logging to the console and to an append-only log file.
#[derive(Debug, Parser)]
#[command(name = "mcdummy")]
#[command(version, about = "Dummy game-server console for testing server wrappers", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Append-only log file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Capacity of the simulated player list
    #[arg(long, value_name = "N")]
    pub max_players: Option<usize>,

    /// Maximum number of commands running at once
    #[arg(long, value_name = "N")]
    pub max_workers: Option<usize>,

    /// When to color console output
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Log verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Shorthand for --log-level debug
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Load the config file, if any, and apply flag overrides.
    pub fn resolve_config(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = ServerConfig::load_or_default(self.config.as_deref())?;
        if let Some(log_file) = &self.log_file {
            config.log_file = log_file.clone();
        }
        if let Some(max_players) = self.max_players {
            config.max_players = max_players;
        }
        if let Some(max_workers) = self.max_workers {
            config.max_workers = Some(max_workers);
        }
        if let Some(color) = self.color {
            config.color = color;
        }
        config.validate()?;
        Ok(config)
    }

    /// `--verbose` wins, then the environment, then `--log-level`.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else if let Ok(env_level) = std::env::var(LOG_LEVEL_ENV) {
            LogLevel::from_str_loose(&env_level).unwrap_or(self.log_level)
        } else {
            self.log_level
        }
    }
}
