//! Common utilities shared across mcdummy crates.

pub mod ansi;
pub mod config;

pub use ansi::{should_colorize, strip_ansi_codes};
pub use config::{ColorMode, ConfigError, ServerConfig};
