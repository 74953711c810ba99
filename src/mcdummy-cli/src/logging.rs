//! Console and log-file output.
//!
//! Both outputs share one record shape, `[time] [thread/LEVEL]: message`.
//! The console uses a short clock and keeps ANSI colors; the log file uses a
//! full date and has colors stripped.

use std::fmt::{self, Display};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use mcdummy_commands::LogSink;
use mcdummy_common::strip_ansi_codes;
use tracing::{Event, Level, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

/// Target of events emitted on behalf of the operator console.
pub const CONSOLE_TARGET: &str = "mcdummy::console";

/// Record layout for one output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFormat {
    time_format: &'static str,
    strip_ansi: bool,
}

impl RecordFormat {
    pub const fn console() -> Self {
        Self {
            time_format: "%H:%M:%S",
            strip_ansi: false,
        }
    }

    pub const fn file() -> Self {
        Self {
            time_format: "%Y-%m-%d %H:%M:%S",
            strip_ansi: true,
        }
    }

    pub fn render(&self, time: impl Display, thread: &str, level: Level, message: &str) -> String {
        if self.strip_ansi {
            format!("[{time}] [{thread}/{level}]: {}", strip_ansi_codes(message))
        } else {
            format!("[{time}] [{thread}/{level}]: {message}")
        }
    }
}

impl<S, N> FormatEvent<S, N> for RecordFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = String::new();
        ctx.format_fields(Writer::new(&mut message), event)?;

        let current = std::thread::current();
        let record = self.render(
            Local::now().format(self.time_format),
            current.name().unwrap_or("unnamed"),
            *event.metadata().level(),
            &message,
        );
        writeln!(writer, "{record}")
    }
}

/// Install the global subscriber: stdout plus `log_file`, appended to.
///
/// `RUST_LOG` takes precedence over `default_filter`. Either one only
/// selects diagnostics; console records are always written.
pub fn init_logging(log_file: &Path, default_filter: &str, colorize: bool) -> Result<()> {
    let appender = open_log_file(log_file)?;
    let filter = with_console_records(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
    )?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(colorize)
        .event_format(RecordFormat::console());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(appender)
        .with_ansi(false)
        .event_format(RecordFormat::file());

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install logging")?;
    Ok(())
}

/// Let every [`CONSOLE_TARGET`] record through `filter`.
pub fn with_console_records(filter: EnvFilter) -> Result<EnvFilter> {
    let directive = format!("{CONSOLE_TARGET}=trace")
        .parse()
        .context("Invalid console filter directive")?;
    Ok(filter.add_directive(directive))
}

/// Open `path` for appending; never rotated.
pub fn open_log_file(path: &Path) -> Result<RollingFileAppender> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("Log file path has no file name: {}", path.display()))?;

    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Sends console records through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write_line(&self, level: Level, line: &str) {
        if level == Level::ERROR {
            tracing::error!(target: CONSOLE_TARGET, "{line}");
        } else if level == Level::WARN {
            tracing::warn!(target: CONSOLE_TARGET, "{line}");
        } else if level == Level::INFO {
            tracing::info!(target: CONSOLE_TARGET, "{line}");
        } else if level == Level::DEBUG {
            tracing::debug!(target: CONSOLE_TARGET, "{line}");
        } else {
            tracing::trace!(target: CONSOLE_TARGET, "{line}");
        }
    }
}
