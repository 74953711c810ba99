//! mcdummy - main entry point.
//!
//! Starts a dummy game server that reads operator commands from stdin and
//! answers like a real server console would.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use mcdummy_cli::cli::Cli;
use mcdummy_cli::logging::{TracingSink, init_logging};
use mcdummy_cli::server::Server;
use mcdummy_cli::{install_interrupt_handler, install_panic_hook};
use mcdummy_commands::Console;

fn main() -> Result<()> {
    let started = Instant::now();
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let colorize = config.color.enabled();

    init_logging(
        &config.log_file,
        cli.effective_log_level().as_filter_str(),
        colorize,
    )?;
    install_panic_hook();
    tracing::debug!(?config, "Loaded configuration");

    let server = Server::new(&config, Console::new(Arc::new(TracingSink), colorize));
    let mut console_loop = server.console_loop();
    install_interrupt_handler(console_loop.interrupt_handle())?;

    server.announce_ready(started);
    let reason = console_loop.run(std::io::stdin().lock());
    tracing::debug!(?reason, "Console loop stopped");
    Ok(())
}
