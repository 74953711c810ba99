//! Line dispatch.
//!
//! [`Dispatcher::dispatch`] resolves the first token through the registry,
//! routes to a sub-handler or the default handler, checks arity and runs the
//! handler on the calling thread. [`Dispatcher::submit`] does the same on a
//! worker thread and reports the outcome to the console.
//!
//! Resolution is serialized by a re-entrant lock so a handler may dispatch
//! again from its own thread. The lock is released before the handler body
//! runs; a slow handler does not hold up other lines.
//!
//! Handlers that dispatch again recurse on the same stack, so nesting is
//! capped at [`MAX_NESTING_DEPTH`]. Deeper lines fail as parsing errors.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use mcdummy_rtext::{NamedColor, TextComponent};
use parking_lot::ReentrantMutex;

use crate::command::Handler;
use crate::console::Console;
use crate::context::{CommandContext, Invocation};
use crate::error::{CommandError, DispatchError, ParsingError};
use crate::registry::CommandRegistry;
use crate::roster::OnlineRoster;
use crate::worker::{WorkerPolicy, WorkerPool};

/// Deepest a handler-initiated dispatch may go below the operator's line.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Routes console lines to command handlers.
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    roster: Arc<OnlineRoster>,
    console: Console,
    workers: Arc<WorkerPool>,
    /// Last invocation id handed out.
    resolution: ReentrantMutex<Cell<u64>>,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<CommandRegistry>,
        roster: Arc<OnlineRoster>,
        console: Console,
        policy: WorkerPolicy,
    ) -> Self {
        Self {
            registry,
            roster,
            console,
            workers: WorkerPool::new(policy),
            resolution: ReentrantMutex::new(Cell::new(0)),
        }
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    pub fn roster(&self) -> &OnlineRoster {
        &self.roster
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn workers(&self) -> &Arc<WorkerPool> {
        &self.workers
    }

    /// Run `line` on the calling thread.
    pub fn dispatch(&self, line: &str) -> Result<(), DispatchError> {
        self.dispatch_nested(line, 0)
    }

    pub(crate) fn dispatch_nested(&self, line: &str, depth: usize) -> Result<(), DispatchError> {
        if line.is_empty() {
            return Ok(());
        }
        if depth > MAX_NESTING_DEPTH {
            tracing::debug!(depth, "Nesting too deep");
            return Err(ParsingError::new(line).into());
        }

        let (handler, invocation) = self.resolve(line)?;
        let invocation = invocation.nested(depth);
        tracing::debug!(
            id = invocation.id(),
            depth,
            command = invocation.command(),
            args = invocation.args().len(),
            "Dispatching"
        );

        let ctx = CommandContext::new(&invocation, self);
        match handler.call(&ctx, invocation.args()) {
            Ok(()) => Ok(()),
            Err(CommandError::Usage(reason)) => {
                tracing::debug!(line, "Usage error: {reason}");
                Err(ParsingError::new(line).into())
            }
            Err(CommandError::NotImplemented) => Err(ParsingError::new(line).into()),
            Err(CommandError::Parsing(err)) => Err(err.into()),
            Err(CommandError::Failed(source)) => Err(DispatchError::Fault {
                command: line.to_string(),
                source,
            }),
        }
    }

    fn resolve(&self, line: &str) -> Result<(Handler, Invocation), ParsingError> {
        let counter = self.resolution.lock();
        let id = counter.get() + 1;
        counter.set(id);

        let mut invocation = Invocation::new(id, line);
        let definition = self
            .registry
            .get(invocation.command())
            .ok_or_else(|| ParsingError::new(line))?;

        let handler = match invocation.token(1).and_then(|name| definition.subcommand(name)) {
            Some(handler) => {
                invocation.advance_to(2);
                handler.clone()
            }
            None => definition
                .default_handler()
                .cloned()
                .ok_or_else(|| ParsingError::new(line))?,
        };

        if !handler.arity().accepts(invocation.args().len()) {
            tracing::debug!(
                line,
                expected = %handler.arity(),
                got = invocation.args().len(),
                "Arity mismatch"
            );
            return Err(ParsingError::new(line));
        }
        Ok((handler, invocation))
    }

    /// Dispatch `line` and report any failure to the console.
    pub fn execute(&self, line: &str) {
        match self.dispatch(line) {
            Ok(()) => {}
            Err(DispatchError::Parsing(err)) => self.console.info(err.text()),
            Err(DispatchError::Fault { source, .. }) => {
                self.report_fault(&format!("{source:?}"));
            }
        }
    }

    /// Execute `line` on a worker thread.
    ///
    /// Returns whether the line was accepted.
    pub fn submit(self: &Arc<Self>, line: impl Into<String>) -> bool {
        let line = line.into();
        let dispatcher = Arc::clone(self);
        let job_line = line.clone();
        let spawned = self.workers.spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| dispatcher.execute(&job_line)));
            if let Err(payload) = outcome {
                dispatcher.report_fault(&panic_message(payload.as_ref()));
            }
        });

        match spawned {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(line, "Rejected command: {err}");
                self.console.warn(format!("Rejected command '{line}': {err}"));
                false
            }
        }
    }

    /// Block until no submitted line is running, or `timeout` passes.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        self.workers.wait_idle(timeout)
    }

    fn report_fault(&self, detail: &str) {
        let current = thread::current();
        let name = current.name().unwrap_or("unnamed");
        self.console.error(TextComponent::colored(
            format!("Error occurred in {name}:"),
            NamedColor::Red,
        ));
        self.console.error(detail);
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("commands", &self.registry.len())
            .field("policy", &self.workers.policy())
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}
