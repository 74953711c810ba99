//! The operator input loop.

use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::console::Console;
use crate::dispatcher::Dispatcher;

/// Lines that stop the loop instead of being dispatched.
pub const SHUTDOWN_KEYWORDS: [&str; 3] = ["end", "exit", "stop"];

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Keyword,
    EndOfInput,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped(StopReason),
}

/// Marks the loop interrupted from another thread, e.g. a signal handler.
#[derive(Debug, Clone)]
pub struct InterruptHandle {
    flag: Arc<AtomicBool>,
    console: Console,
}

impl InterruptHandle {
    /// Returns `false` when the loop was already interrupted.
    pub fn interrupt(&self) -> bool {
        let first = !self.flag.swap(true, Ordering::SeqCst);
        if first {
            self.console.info("Server Interrupted");
        }
        first
    }

    pub fn is_interrupted(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Reads operator lines and hands them to the dispatcher.
#[derive(Debug)]
pub struct ConsoleLoop {
    dispatcher: Arc<Dispatcher>,
    state: LoopState,
    interrupted: Arc<AtomicBool>,
    grace: Duration,
}

impl ConsoleLoop {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            state: LoopState::Running,
            interrupted: Arc::new(AtomicBool::new(false)),
            grace: Duration::from_secs(1),
        }
    }

    /// How long to wait for in-flight handlers once stopped.
    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn interrupt_handle(&self) -> InterruptHandle {
        InterruptHandle {
            flag: Arc::clone(&self.interrupted),
            console: self.dispatcher.console().clone(),
        }
    }

    /// Read lines until a stop condition, then wait for running handlers.
    pub fn run<R: BufRead>(&mut self, input: R) -> StopReason {
        let reason = self.read_all(input);
        if !self.dispatcher.wait_idle(self.grace) {
            tracing::warn!(
                in_flight = self.dispatcher.workers().in_flight(),
                "Handlers still running at shutdown"
            );
        }
        reason
    }

    fn read_all<R: BufRead>(&mut self, mut input: R) -> StopReason {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match input.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let raw = buf.strip_suffix(b"\n").unwrap_or(&buf);
                    let line = String::from_utf8_lossy(raw);
                    if let LoopState::Stopped(reason) = self.feed(&line) {
                        return reason;
                    }
                }
                Err(err) => {
                    tracing::warn!("Failed to read console input: {err}");
                    break;
                }
            }
        }
        if let LoopState::Stopped(reason) = self.state {
            return reason;
        }
        self.dispatcher.console().info("Server Interrupted");
        self.state = LoopState::Stopped(StopReason::EndOfInput);
        StopReason::EndOfInput
    }

    /// Handle one line of input.
    pub fn feed(&mut self, line: &str) -> LoopState {
        if self.state != LoopState::Running {
            return self.state;
        }
        if self.interrupted.load(Ordering::SeqCst) {
            self.state = LoopState::Stopped(StopReason::Interrupted);
            return self.state;
        }

        let line = line.strip_suffix('\r').unwrap_or(line);
        if SHUTDOWN_KEYWORDS.contains(&line) {
            let console = self.dispatcher.console();
            console.info("Stopping the server");
            console.info("Stopping server");
            self.state = LoopState::Stopped(StopReason::Keyword);
        } else if !line.is_empty() {
            self.dispatcher.submit(line);
        }
        self.state
    }
}
