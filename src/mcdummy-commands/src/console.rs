//! Operator-facing output.
//!
//! Handlers never print directly. They hand a [`Message`] to the
//! [`Console`], which renders it and forwards one record per line to a
//! [`LogSink`]. The binary plugs in a sink that emits tracing events; tests
//! use [`BufferSink`].

use std::sync::Arc;

use mcdummy_rtext::TextComponent;
use parking_lot::Mutex;
use tracing::Level;

/// Destination for rendered console lines.
pub trait LogSink: Send + Sync {
    fn write_line(&self, level: Level, line: &str);
}

/// Something to show the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Plain(String),
    Rich(TextComponent),
}

impl Message {
    /// Render to text, with ANSI colors when `colorize` is set.
    pub fn render(&self, colorize: bool) -> String {
        match self {
            Message::Plain(text) => text.clone(),
            Message::Rich(component) if colorize => component.to_colored_text(),
            Message::Rich(component) => component.to_plain_text(),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Plain(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Plain(text)
    }
}

impl From<TextComponent> for Message {
    fn from(component: TextComponent) -> Self {
        Message::Rich(component)
    }
}

/// Shared handle for writing to the operator console.
#[derive(Clone)]
pub struct Console {
    sink: Arc<dyn LogSink>,
    colorize: bool,
}

impl Console {
    pub fn new(sink: Arc<dyn LogSink>, colorize: bool) -> Self {
        Self { sink, colorize }
    }

    pub fn colorize(&self) -> bool {
        self.colorize
    }

    /// Write `message`, one record per line.
    pub fn log(&self, level: Level, message: impl Into<Message>) {
        let text = message.into().render(self.colorize);
        for line in text.lines() {
            self.sink.write_line(level, line);
        }
    }

    pub fn info(&self, message: impl Into<Message>) {
        self.log(Level::INFO, message);
    }

    pub fn warn(&self, message: impl Into<Message>) {
        self.log(Level::WARN, message);
    }

    pub fn error(&self, message: impl Into<Message>) {
        self.log(Level::ERROR, message);
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("colorize", &self.colorize)
            .finish_non_exhaustive()
    }
}

/// In-memory sink.
#[derive(Debug, Default)]
pub struct BufferSink {
    records: Mutex<Vec<(Level, String)>>,
}

impl BufferSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every record written so far.
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records.lock().clone()
    }

    /// Just the text of every record.
    pub fn lines(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// Text of the records written at `level`.
    pub fn lines_at(&self, level: Level) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|(at, _)| *at == level)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.records.lock().iter().any(|(_, text)| text == line)
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl LogSink for BufferSink {
    fn write_line(&self, level: Level, line: &str) {
        self.records.lock().push((level, line.to_string()));
    }
}
