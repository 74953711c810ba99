//! Built-in `list`, `save`, `credits` and `raise` commands.

use anyhow::anyhow;
use mcdummy_rtext::{NamedColor, TextComponent};

use crate::command::{Arity, CommandDefinition};
use crate::context::CommandContext;
use crate::error::{CommandError, CommandResult};

pub fn list_definition() -> CommandDefinition {
    CommandDefinition::builder(["list"])
        .help("Show a fake player list")
        .default_handler(Arity::NONE, list)
        .build()
}

fn list(ctx: &CommandContext<'_>, _args: &[String]) -> CommandResult {
    let roster = ctx.roster();
    ctx.console().info(format!(
        "There are {} of a max {} players online: {}",
        roster.count(),
        roster.capacity(),
        roster.names().join(", ")
    ));
    Ok(())
}

/// `save-all flush` is what server wrappers send, so arguments are ignored.
pub fn save_definition() -> CommandDefinition {
    CommandDefinition::builder(["save", "save-all"])
        .help("Show a fake saved message")
        .default_handler(Arity::ANY, |ctx, _| {
            ctx.console().info("Saved the game");
            Ok(())
        })
        .build()
}

pub fn credits_definition() -> CommandDefinition {
    CommandDefinition::builder(["credits"])
        .help("Show dummy server info")
        .default_handler(Arity::NONE, |ctx, _| {
            ctx.console().info(banner());
            Ok(())
        })
        .build()
}

fn banner() -> TextComponent {
    TextComponent::composite([
        TextComponent::colored("--- ", NamedColor::Gray),
        TextComponent::plain("Dummy server for MCDR"),
        TextComponent::colored(" ---", NamedColor::Gray),
        TextComponent::plain("\n"),
        TextComponent::plain(format!("CLI Version {} ", env!("CARGO_PKG_VERSION"))),
        TextComponent::colored(" Work in progress", NamedColor::Yellow),
    ])
}

pub fn raise_definition() -> CommandDefinition {
    CommandDefinition::builder(["raise"])
        .help("Raise an error for debugging")
        .default_handler(Arity::NONE, |_, _| {
            Err(CommandError::Failed(anyhow!("Raised on purpose")))
        })
        .build()
}

#[cfg(test)]
mod tests {
    use crate::builtin::test_support::dispatcher;
    use crate::error::DispatchError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_empty() {
        let (dispatcher, sink) = dispatcher(20);
        dispatcher.dispatch("list").unwrap();

        assert_eq!(sink.lines(), ["There are 0 of a max 20 players online: "]);
    }

    #[test]
    fn test_list_after_join() {
        let (dispatcher, sink) = dispatcher(20);
        dispatcher.dispatch("player join Steve").unwrap();
        dispatcher.dispatch("player join Alex").unwrap();
        sink.clear();

        dispatcher.dispatch("list").unwrap();
        assert_eq!(
            sink.lines(),
            ["There are 2 of a max 20 players online: Steve, Alex"]
        );
    }

    #[test]
    fn test_save_aliases() {
        let (dispatcher, sink) = dispatcher(20);
        dispatcher.dispatch("save").unwrap();
        dispatcher.dispatch("save-all").unwrap();
        dispatcher.dispatch("save-all flush").unwrap();

        assert_eq!(sink.lines(), ["Saved the game"; 3]);
    }

    #[test]
    fn test_credits() {
        let (dispatcher, sink) = dispatcher(20);
        dispatcher.dispatch("credits").unwrap();

        assert_eq!(
            sink.lines(),
            [
                "--- Dummy server for MCDR ---".to_string(),
                format!("CLI Version {}  Work in progress", env!("CARGO_PKG_VERSION")),
            ]
        );
    }

    #[test]
    fn test_raise() {
        let (dispatcher, _) = dispatcher(20);
        let err = dispatcher.dispatch("raise").unwrap_err();

        assert!(matches!(
            err,
            DispatchError::Fault { ref source, .. } if source.to_string() == "Raised on purpose"
        ));
    }
}
