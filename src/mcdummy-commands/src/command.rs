//! Command definitions.
//!
//! A [`CommandDefinition`] owns the aliases it answers to, a one-line help
//! text, an optional default handler and any number of named sub-handlers.
//! Each handler declares the [`Arity`] it accepts; the dispatcher checks it
//! before the handler runs.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::context::CommandContext;
use crate::error::CommandResult;

/// Signature shared by every handler.
pub type HandlerFn = dyn Fn(&CommandContext<'_>, &[String]) -> CommandResult + Send + Sync;

/// Number of arguments a handler accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    min: usize,
    max: Option<usize>,
}

impl Arity {
    /// No arguments at all.
    pub const NONE: Arity = Arity::exact(0);
    /// Any number of arguments.
    pub const ANY: Arity = Arity::at_least(0);

    pub const fn exact(count: usize) -> Self {
        Self {
            min: count,
            max: Some(count),
        }
    }

    pub const fn range(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Whether `count` arguments fit.
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{max}"),
            Some(max) => write!(f, "{}..={max}", self.min),
            None => write!(f, "{}..", self.min),
        }
    }
}

/// A callable together with the arguments it accepts.
#[derive(Clone)]
pub struct Handler {
    arity: Arity,
    func: Arc<HandlerFn>,
}

impl Handler {
    pub fn new<F>(arity: Arity, func: F) -> Self
    where
        F: Fn(&CommandContext<'_>, &[String]) -> CommandResult + Send + Sync + 'static,
    {
        Self {
            arity,
            func: Arc::new(func),
        }
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn call(&self, ctx: &CommandContext<'_>, args: &[String]) -> CommandResult {
        (self.func)(ctx, args)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// One command family.
#[derive(Debug, Clone)]
pub struct CommandDefinition {
    aliases: Vec<String>,
    help: String,
    default: Option<Handler>,
    subcommands: BTreeMap<String, Handler>,
}

impl CommandDefinition {
    /// Start building a definition answering to `aliases`.
    ///
    /// Aliases are trimmed; whether they are usable is decided at
    /// registration.
    pub fn builder<I, S>(aliases: I) -> CommandBuilder
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        CommandBuilder {
            definition: CommandDefinition {
                aliases: aliases
                    .into_iter()
                    .map(|alias| alias.as_ref().trim().to_string())
                    .collect(),
                help: String::new(),
                default: None,
                subcommands: BTreeMap::new(),
            },
        }
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The first alias, used for ordering and diagnostics.
    pub fn primary_alias(&self) -> Option<&str> {
        self.aliases.first().map(String::as_str)
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// `alias/alias: help`, as printed by `help`.
    pub fn help_line(&self) -> String {
        format!("{}: {}", self.aliases.join("/"), self.help)
    }

    pub fn default_handler(&self) -> Option<&Handler> {
        self.default.as_ref()
    }

    pub fn subcommand(&self, name: &str) -> Option<&Handler> {
        self.subcommands.get(name)
    }

    pub fn subcommand_names(&self) -> impl Iterator<Item = &str> {
        self.subcommands.keys().map(String::as_str)
    }
}

/// Builder for [`CommandDefinition`].
#[derive(Debug)]
pub struct CommandBuilder {
    definition: CommandDefinition,
}

impl CommandBuilder {
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.definition.help = help.into();
        self
    }

    /// Handler used when the first argument names no sub-handler.
    pub fn default_handler<F>(mut self, arity: Arity, func: F) -> Self
    where
        F: Fn(&CommandContext<'_>, &[String]) -> CommandResult + Send + Sync + 'static,
    {
        self.definition.default = Some(Handler::new(arity, func));
        self
    }

    /// Handler selected when the first argument equals `name`.
    pub fn subcommand<F>(mut self, name: impl Into<String>, arity: Arity, func: F) -> Self
    where
        F: Fn(&CommandContext<'_>, &[String]) -> CommandResult + Send + Sync + 'static,
    {
        self.definition
            .subcommands
            .insert(name.into(), Handler::new(arity, func));
        self
    }

    pub fn build(self) -> CommandDefinition {
        self.definition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_ctx: &CommandContext<'_>, _args: &[String]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn test_arity_accepts() {
        assert!(Arity::NONE.accepts(0));
        assert!(!Arity::NONE.accepts(1));
        assert!(Arity::range(1, 2).accepts(2));
        assert!(!Arity::range(1, 2).accepts(3));
        assert!(!Arity::at_least(2).accepts(1));
        assert!(Arity::at_least(2).accepts(40));
        assert!(Arity::ANY.accepts(0));
    }

    #[test]
    fn test_arity_display() {
        assert_eq!(Arity::exact(1).to_string(), "1");
        assert_eq!(Arity::range(1, 2).to_string(), "1..=2");
        assert_eq!(Arity::at_least(2).to_string(), "2..");
    }

    #[test]
    fn test_builder() {
        let definition = CommandDefinition::builder([" save ", "save-all"])
            .help("Save the game")
            .default_handler(Arity::NONE, noop)
            .subcommand("flush", Arity::NONE, noop)
            .build();

        assert_eq!(definition.aliases(), ["save", "save-all"]);
        assert_eq!(definition.primary_alias(), Some("save"));
        assert_eq!(definition.help_line(), "save/save-all: Save the game");
        assert!(definition.default_handler().is_some());
        assert!(definition.subcommand("flush").is_some());
        assert!(definition.subcommand("other").is_none());
        assert_eq!(definition.subcommand_names().collect::<Vec<_>>(), ["flush"]);
    }

    #[test]
    fn test_definition_without_default() {
        let definition = CommandDefinition::builder(["data"])
            .subcommand("get", Arity::at_least(1), noop)
            .build();
        assert!(definition.default_handler().is_none());
    }
}
