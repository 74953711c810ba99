//! Per-invocation state handed to handlers.

use std::sync::Arc;

use crate::console::Console;
use crate::dispatcher::Dispatcher;
use crate::error::CommandResult;
use crate::registry::CommandRegistry;
use crate::roster::OnlineRoster;

/// Split a console line into tokens.
///
/// Single spaces separate tokens. Runs of spaces produce empty tokens and
/// there is no quoting.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(' ').map(str::to_string).collect()
}

/// One parsed console line on its way to a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    id: u64,
    line: String,
    tokens: Vec<String>,
    cursor: usize,
    depth: usize,
}

impl Invocation {
    pub fn new(id: u64, line: impl Into<String>) -> Self {
        let line = line.into();
        let tokens = tokenize(&line);
        Self {
            id,
            line,
            tokens,
            cursor: 1,
            depth: 0,
        }
    }

    /// The same line dispatched from inside another handler.
    pub(crate) fn nested(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Sequence number assigned by the dispatcher.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The raw line, as typed.
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The alias the line was resolved by.
    pub fn command(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// How many handlers this line is nested in. Top-level lines are 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Index of the first argument the handler receives.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Tokens from the cursor on.
    pub fn args(&self) -> &[String] {
        self.tokens.get(self.cursor..).unwrap_or_default()
    }

    pub(crate) fn advance_to(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.tokens.len());
    }
}

/// What a handler can reach while it runs.
pub struct CommandContext<'a> {
    invocation: &'a Invocation,
    dispatcher: &'a Dispatcher,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(invocation: &'a Invocation, dispatcher: &'a Dispatcher) -> Self {
        Self {
            invocation,
            dispatcher,
        }
    }

    pub fn invocation(&self) -> &Invocation {
        self.invocation
    }

    pub fn console(&self) -> &Console {
        self.dispatcher.console()
    }

    pub fn roster(&self) -> &OnlineRoster {
        self.dispatcher.roster()
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        self.dispatcher.registry()
    }

    /// Dispatch another line on the current thread, one level deeper.
    pub fn dispatch(&self, line: &str) -> CommandResult {
        self.dispatcher
            .dispatch_nested(line, self.invocation.depth() + 1)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokenize_keeps_empty_tokens() {
        assert_eq!(tokenize("a  b"), ["a", "", "b"]);
        assert_eq!(tokenize("tellraw @a hi"), ["tellraw", "@a", "hi"]);
        assert_eq!(tokenize("list "), ["list", ""]);
    }

    #[test]
    fn test_invocation_args() {
        let mut invocation = Invocation::new(7, "data get entity Steve");
        assert_eq!(invocation.id(), 7);
        assert_eq!(invocation.command(), "data");
        assert_eq!(invocation.args(), ["get", "entity", "Steve"]);

        invocation.advance_to(2);
        assert_eq!(invocation.args(), ["entity", "Steve"]);

        invocation.advance_to(10);
        assert!(invocation.args().is_empty());
        assert_eq!(invocation.depth(), 0);
        assert_eq!(invocation.nested(3).depth(), 3);
    }
}
