//! Built-in `player` command.

use crate::command::{Arity, CommandDefinition};
use crate::context::CommandContext;
use crate::error::CommandResult;

const USAGE: &str = "player join <name> Fake player join\nplayer left <name> Fake player left";

pub fn definition() -> CommandDefinition {
    CommandDefinition::builder(["player"])
        .help("Manage fake player join & left")
        .default_handler(Arity::ANY, |ctx, _| {
            ctx.console().info(USAGE);
            Ok(())
        })
        .subcommand("join", Arity::range(1, 2), join)
        .subcommand("left", Arity::exact(1), left)
        .build()
}

/// `player join <name> [address]`
fn join(ctx: &CommandContext<'_>, args: &[String]) -> CommandResult {
    let name = &args[0];
    let address = args.get(1).map(String::as_str);
    match ctx.roster().add(name, address) {
        Ok(login) => ctx.console().info(login.to_string()),
        Err(err) => ctx.console().error(err.to_string()),
    }
    Ok(())
}

/// `player left <name>`
fn left(ctx: &CommandContext<'_>, args: &[String]) -> CommandResult {
    let name = &args[0];
    match ctx.roster().remove(name) {
        Ok(()) => ctx.console().info(format!("{name} left the game")),
        Err(err) => ctx.console().error(err.to_string()),
    }
    Ok(())
}
