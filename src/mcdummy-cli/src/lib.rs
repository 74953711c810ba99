//! mcdummy CLI library.
//!
//! - `cli/` - Command-line argument parsing
//! - `logging` - Console and log-file output
//! - `server` - Server wiring from configuration

pub mod cli;
pub mod logging;
pub mod server;

use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use mcdummy_commands::InterruptHandle;

static INTERRUPT_HANDLER_REGISTERED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Install a Ctrl+C handler that reports the interrupt and exits cleanly.
pub fn install_interrupt_handler(handle: InterruptHandle) -> anyhow::Result<()> {
    if INTERRUPT_HANDLER_REGISTERED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    ctrlc::set_handler(move || {
        handle.interrupt();
        std::process::exit(0);
    })?;
    Ok(())
}

/// Route panic messages through tracing so they reach the log file.
pub fn install_panic_hook() {
    if PANIC_HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }
    panic::set_hook(Box::new(|info| {
        let current = std::thread::current();
        let thread = current.name().unwrap_or("unnamed");
        tracing::error!("Thread '{thread}' {info}");
    }));
}
