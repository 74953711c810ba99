//! Built-in `help` command.

use std::collections::BTreeSet;

use crate::command::{Arity, CommandDefinition};
use crate::console_loop::SHUTDOWN_KEYWORDS;
use crate::context::CommandContext;
use crate::error::CommandResult;

pub fn definition() -> CommandDefinition {
    CommandDefinition::builder(["help"])
        .help("Show command help")
        .default_handler(Arity::NONE, run)
        .build()
}

fn run(ctx: &CommandContext<'_>, _args: &[String]) -> CommandResult {
    let mut lines: BTreeSet<String> = ctx
        .registry()
        .list()
        .iter()
        .map(|definition| definition.help_line())
        .collect();
    lines.insert(format!("{}: Exit this dummy server", SHUTDOWN_KEYWORDS.join("/")));

    ctx.console()
        .info(lines.into_iter().collect::<Vec<_>>().join("\n"));
    Ok(())
}
