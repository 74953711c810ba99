//! Command-line interface.

mod args;

pub use args::{Cli, LOG_LEVEL_ENV, LogLevel};
