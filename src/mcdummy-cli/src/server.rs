//! Wiring of the dummy server from its configuration.

use std::sync::Arc;
use std::time::{Duration, Instant};

use mcdummy_commands::builtin::BuiltinCommands;
use mcdummy_commands::{
    CommandRegistry, Console, ConsoleLoop, Dispatcher, LoadReport, OnlineRoster, WorkerPolicy,
};
use mcdummy_common::ServerConfig;

/// A configured server ready to read commands.
#[derive(Debug)]
pub struct Server {
    dispatcher: Arc<Dispatcher>,
    report: LoadReport,
    grace: Duration,
}

impl Server {
    pub fn new(config: &ServerConfig, console: Console) -> Self {
        let (registry, report) = CommandRegistry::from_source(&BuiltinCommands);
        let dispatcher = Dispatcher::new(
            Arc::new(registry),
            Arc::new(OnlineRoster::new(config.max_players)),
            console,
            WorkerPolicy::from_limit(config.max_workers),
        );
        Self {
            dispatcher: Arc::new(dispatcher),
            report,
            grace: config.shutdown_grace(),
        }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Outcome of loading the built-in commands.
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Log the startup lines wrappers wait for.
    pub fn announce_ready(&self, started: Instant) {
        let console = self.dispatcher.console();
        console.info("Current encoding method: utf-8");
        console.info(ready_message(started.elapsed()));
    }

    pub fn console_loop(&self) -> ConsoleLoop {
        ConsoleLoop::new(Arc::clone(&self.dispatcher)).with_grace(self.grace)
    }
}

/// The line server wrappers treat as "startup finished".
pub fn ready_message(elapsed: Duration) -> String {
    format!(
        "Done ({:.3}s)! For help, type \"help\"",
        elapsed.as_secs_f64()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcdummy_commands::{BufferSink, StopReason};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_ready_message() {
        assert_eq!(
            ready_message(Duration::from_millis(1234)),
            "Done (1.234s)! For help, type \"help\""
        );
    }

    #[test]
    fn test_server_uses_config() {
        let config = ServerConfig {
            max_players: 3,
            ..ServerConfig::default()
        };
        let sink = BufferSink::new();
        let server = Server::new(&config, Console::new(sink.clone(), false));

        assert!(server.load_report().is_clean());
        server.dispatcher().execute("list");
        assert_eq!(sink.lines(), ["There are 0 of a max 3 players online: "]);
    }

    #[test]
    fn test_session() {
        let sink = BufferSink::new();
        let server = Server::new(&ServerConfig::default(), Console::new(sink.clone(), false));
        server.announce_ready(Instant::now());

        let reason = server.console_loop().run(Cursor::new("exit\n"));
        assert_eq!(reason, StopReason::Keyword);

        let lines = sink.lines();
        assert!(lines[1].starts_with("Done ("));
        assert_eq!(&lines[2..], ["Stopping the server", "Stopping server"]);
    }
}
