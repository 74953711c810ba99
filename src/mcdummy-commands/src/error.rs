//! Error types for registration and dispatch.

use std::fmt;

use thiserror::Error;

/// A command definition that cannot be registered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// An alias is empty once surrounding whitespace is trimmed.
    #[error("Command alias is empty")]
    EmptyAlias,

    /// An alias contains whitespace and could never be typed as one token.
    #[error("Command alias '{alias}' contains whitespace")]
    WhitespaceInAlias { alias: String },
}

/// Operator input that could not be turned into a handler call.
///
/// Always carries the failing text so it can be echoed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingError {
    text: String,
}

impl ParsingError {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The raw text that failed to parse.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command Error: {}", self.text)
    }
}

impl std::error::Error for ParsingError {}

/// What a command handler may return.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The arguments do not fit the command. Reported to the operator as a
    /// parsing error echoing the invocation's raw line.
    #[error("Invalid usage: {0}")]
    Usage(String),

    /// The selected handler has no implementation.
    #[error("Handler not implemented")]
    NotImplemented,

    /// A parsing error raised further down, e.g. by a nested dispatch.
    #[error(transparent)]
    Parsing(#[from] ParsingError),

    /// Anything else. Logged with its trace; never stops the console.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl CommandError {
    pub fn usage(reason: impl Into<String>) -> Self {
        CommandError::Usage(reason.into())
    }
}

/// Result type returned by command handlers.
pub type CommandResult = Result<(), CommandError>;

/// Outcome of dispatching one line that did not succeed.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Parsing(#[from] ParsingError),

    /// A handler failed unexpectedly.
    #[error("Command '{command}' failed: {source}")]
    Fault {
        command: String,
        #[source]
        source: anyhow::Error,
    },
}

impl DispatchError {
    pub fn as_parsing(&self) -> Option<&ParsingError> {
        match self {
            DispatchError::Parsing(err) => Some(err),
            DispatchError::Fault { .. } => None,
        }
    }
}

impl From<DispatchError> for CommandError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Parsing(err) => CommandError::Parsing(err),
            DispatchError::Fault { source, .. } => CommandError::Failed(source),
        }
    }
}
