//! Built-in `execute` command.
//!
//! Modifiers are accepted and ignored; whatever follows the last `run` is
//! dispatched as a command of its own.

use crate::command::{Arity, CommandDefinition};
use crate::context::CommandContext;
use crate::error::CommandResult;

pub fn definition() -> CommandDefinition {
    CommandDefinition::builder(["execute"])
        .help("Fake execute")
        .default_handler(Arity::at_least(2), execute)
        .subcommand("run", Arity::at_least(1), run)
        .build()
}

fn execute(ctx: &CommandContext<'_>, args: &[String]) -> CommandResult {
    let start = args
        .iter()
        .rposition(|arg| arg == "run")
        .map_or(0, |index| index + 1);
    let nested = &args[start..];
    tracing::debug!(?nested, "Executing nested command");
    run(ctx, nested)
}

fn run(ctx: &CommandContext<'_>, args: &[String]) -> CommandResult {
    ctx.dispatch(&args.join(" "))
}

#[cfg(test)]
mod tests {
    use crate::builtin::test_support::dispatcher;
    use crate::dispatcher::MAX_NESTING_DEPTH;
    use crate::error::DispatchError;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_run_directly() {
        let (dispatcher, sink) = dispatcher(20);
        dispatcher.dispatch("execute run save-all").unwrap();

        assert_eq!(sink.lines(), ["Saved the game"]);
    }

    #[test]
    fn test_modifiers_then_run() {
        let (dispatcher, sink) = dispatcher(20);
        dispatcher
            .dispatch("execute as @a at @s run tellraw @a hello")
            .unwrap();

        assert_eq!(sink.lines(), ["hello"]);
    }

    #[test]
    fn test_last_run_wins() {
        let (dispatcher, sink) = dispatcher(20);
        dispatcher
            .dispatch("execute as @a run execute as @s run list")
            .unwrap();

        assert_eq!(sink.lines(), ["There are 0 of a max 20 players online: "]);
    }

    #[test]
    fn test_nested_parsing_error_names_inner_line() {
        let (dispatcher, _) = dispatcher(20);
        let err = dispatcher.dispatch("execute as @a run bogus x").unwrap_err();

        assert_eq!(err.as_parsing().map(|e| e.text()), Some("bogus x"));
    }

    #[test]
    fn test_nested_fault() {
        let (dispatcher, _) = dispatcher(20);
        let err = dispatcher.dispatch("execute as @a run raise").unwrap_err();

        assert!(matches!(err, DispatchError::Fault { .. }));
    }

    #[test]
    fn test_too_few_arguments() {
        let (dispatcher, _) = dispatcher(20);
        let err = dispatcher.dispatch("execute list").unwrap_err();

        assert_eq!(err.as_parsing().map(|e| e.text()), Some("execute list"));
    }

    #[test]
    fn test_deeply_nested_run_is_rejected_on_worker() {
        let (dispatcher, sink) = dispatcher(20);
        let dispatcher = Arc::new(dispatcher);
        let line = format!("{}list", "execute run ".repeat(2000));
        assert!(dispatcher.submit(line));
        assert!(dispatcher.wait_idle(Duration::from_secs(5)));

        let echoed = sink.lines();
        assert_eq!(echoed.len(), 1);
        assert!(echoed[0].ends_with("execute run list"));

        assert!(dispatcher.submit("list"));
        assert!(dispatcher.wait_idle(Duration::from_secs(5)));
        assert!(sink.contains("There are 0 of a max 20 players online: "));
    }

    #[test]
    fn test_nesting_within_limit() {
        let (dispatcher, sink) = dispatcher(20);
        let line = format!("{}save", "execute run ".repeat(MAX_NESTING_DEPTH));
        dispatcher.dispatch(&line).unwrap();

        assert_eq!(sink.lines(), ["Saved the game"]);
    }
}
