//! Command system for the mcdummy console.
//!
//! Operator lines flow through four pieces:
//!
//! - [`CommandRegistry`] maps aliases to [`CommandDefinition`]s loaded from
//!   a [`CommandSource`] such as [`builtin::BuiltinCommands`].
//! - [`Dispatcher`] resolves a line, picks a sub-handler or the default
//!   handler and runs it, on the caller's thread or a worker.
//! - [`ConsoleLoop`] reads lines and stops on `end`, `exit` or `stop`.
//! - [`Console`] receives everything handlers want to show.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use mcdummy_commands::builtin::BuiltinCommands;
//! use mcdummy_commands::{
//!     BufferSink, CommandRegistry, Console, Dispatcher, OnlineRoster, WorkerPolicy,
//! };
//!
//! let (registry, _) = CommandRegistry::from_source(&BuiltinCommands);
//! let sink = BufferSink::new();
//! let dispatcher = Dispatcher::new(
//!     Arc::new(registry),
//!     Arc::new(OnlineRoster::new(20)),
//!     Console::new(sink.clone(), false),
//!     WorkerPolicy::Unbounded,
//! );
//!
//! dispatcher.execute("save-all");
//! assert_eq!(sink.lines(), ["Saved the game"]);
//! ```

pub mod builtin;
mod command;
mod console;
mod console_loop;
mod context;
mod dispatcher;
mod error;
mod registry;
mod roster;
mod worker;

pub use command::{Arity, CommandBuilder, CommandDefinition, Handler, HandlerFn};
pub use console::{BufferSink, Console, LogSink, Message};
pub use console_loop::{ConsoleLoop, InterruptHandle, LoopState, SHUTDOWN_KEYWORDS, StopReason};
pub use context::{CommandContext, Invocation, tokenize};
pub use dispatcher::{Dispatcher, MAX_NESTING_DEPTH};
pub use error::{CommandError, CommandResult, DispatchError, ParsingError, RegistryError};
pub use registry::{CommandRegistry, CommandSource, LoadReport};
pub use roster::{Login, MAX_NAME_LEN, OnlineRoster, RosterError, is_valid_name};
pub use worker::{SubmitError, WORKER_THREAD_NAME, WorkerPolicy, WorkerPool};
