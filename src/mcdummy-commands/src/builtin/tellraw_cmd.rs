//! Built-in `tellraw` and `rtext` commands.

use mcdummy_rtext::{DecodeError, TextComponent, decode_str};

use crate::command::{Arity, CommandDefinition};
use crate::context::CommandContext;
use crate::error::CommandResult;

pub fn tellraw_definition() -> CommandDefinition {
    CommandDefinition::builder(["tellraw"])
        .help("Show colored text")
        .default_handler(Arity::at_least(2), tellraw)
        .build()
}

/// `tellraw <target> <component...>`; the target is ignored.
fn tellraw(ctx: &CommandContext<'_>, args: &[String]) -> CommandResult {
    if let Some(component) = decode_args(ctx, &args[1..]) {
        ctx.console().info(component);
    }
    Ok(())
}

pub fn rtext_definition() -> CommandDefinition {
    CommandDefinition::builder(["rtext"])
        .help("Show how a text component is decoded")
        .default_handler(Arity::at_least(1), rtext)
        .build()
}

fn rtext(ctx: &CommandContext<'_>, args: &[String]) -> CommandResult {
    if let Some(component) = decode_args(ctx, args) {
        ctx.console().info(component.structure_lines().join("\n"));
    }
    Ok(())
}

/// Rejoin `args` and decode them, reporting a failure to the console.
fn decode_args(ctx: &CommandContext<'_>, args: &[String]) -> Option<TextComponent> {
    let content = args.join(" ");
    match decode_str(&content) {
        Ok(component) => Some(component),
        Err(err) => {
            report(ctx, &err);
            None
        }
    }
}

fn report(ctx: &CommandContext<'_>, err: &DecodeError) {
    ctx.console().error(format!("Invalid text component: {err}"));
}
