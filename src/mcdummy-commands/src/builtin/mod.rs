//! Built-in console commands.
//!
//! # Available Commands
//!
//! - `help` - List commands and their help text
//! - `list` - Show the simulated player list
//! - `save`, `save-all` - Pretend to save the world
//! - `tellraw <target> <component>` - Render a chat component
//! - `rtext <component>` - Show how a chat component was decoded
//! - `data get entity|block|<storage> ...` - Show fake NBT data
//! - `player join|left <name>` - Simulate players joining and leaving
//! - `execute ... run <command>` - Run a nested command
//! - `credits` - Show a banner
//! - `raise` - Fail on purpose
//!
//! `end`, `exit` and `stop` are handled by the input loop, not here.
//!
//! # Usage
//!
//! ```rust
//! use mcdummy_commands::CommandRegistry;
//! use mcdummy_commands::builtin::BuiltinCommands;
//!
//! let registry = CommandRegistry::new();
//! let report = registry.load(&BuiltinCommands);
//! assert!(report.is_clean());
//! assert!(registry.contains("save-all"));
//! ```

mod data_cmd;
mod execute_cmd;
mod help_cmd;
mod player_cmd;
mod server_cmd;
mod tellraw_cmd;

use crate::command::CommandDefinition;
use crate::registry::CommandSource;

pub use data_cmd::{FAKE_BLOCK_RAW, FAKE_PLAYER_RAW};

/// The static table of built-in commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinCommands;

impl CommandSource for BuiltinCommands {
    fn name(&self) -> &str {
        "builtin"
    }

    fn definitions(&self) -> Vec<CommandDefinition> {
        vec![
            help_cmd::definition(),
            server_cmd::list_definition(),
            server_cmd::save_definition(),
            server_cmd::credits_definition(),
            server_cmd::raise_definition(),
            tellraw_cmd::tellraw_definition(),
            tellraw_cmd::rtext_definition(),
            data_cmd::definition(),
            player_cmd::definition(),
            execute_cmd::definition(),
        ]
    }
}
