//! The decoded rich-text tree and its renderers.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::color::NamedColor;
use crate::event::{ClickEvent, HoverEvent};
use crate::style::StyleFlags;

const RESET: &str = "\x1b[0m";

/// A styled run of text with optional interaction payloads and children.
///
/// A *leaf* carries text and no children. A *composite* is an ordered
/// container built from a JSON sequence; it has no text, color or style of
/// its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextComponent {
    pub text: String,
    pub color: Option<NamedColor>,
    pub style: StyleFlags,
    pub click: Option<ClickEvent>,
    pub hover: Option<HoverEvent>,
    pub extra: Vec<TextComponent>,
}

impl TextComponent {
    /// An unstyled leaf.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// A leaf with a color.
    pub fn colored(text: impl Into<String>, color: NamedColor) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
            ..Default::default()
        }
    }

    /// A neutral container holding `children` in order.
    pub fn composite(children: impl IntoIterator<Item = TextComponent>) -> Self {
        Self {
            extra: children.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: StyleFlags) -> Self {
        self.style |= style;
        self
    }

    pub fn with_click(mut self, click: ClickEvent) -> Self {
        self.click = Some(click);
        self
    }

    pub fn with_hover(mut self, hover: HoverEvent) -> Self {
        self.hover = Some(hover);
        self
    }

    /// Append a child, builder style.
    pub fn append(mut self, child: impl Into<TextComponent>) -> Self {
        self.extra.push(child.into());
        self
    }

    pub fn push(&mut self, child: impl Into<TextComponent>) {
        self.extra.push(child.into());
    }

    pub fn is_leaf(&self) -> bool {
        self.extra.is_empty()
    }

    /// True for containers built from a sequence: children but no own
    /// text, color or style.
    pub fn is_composite(&self) -> bool {
        !self.extra.is_empty()
            && self.text.is_empty()
            && self.color.is_none()
            && self.style.is_empty()
    }

    /// Concatenated text of the whole tree, without escape codes.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        self.write_plain(&mut out);
        out
    }

    fn write_plain(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.extra {
            child.write_plain(out);
        }
    }

    /// Render for an ANSI console.
    ///
    /// Style flags accumulate from parent to child; a child without its own
    /// color inherits the nearest ancestor's. Styled text is reset before
    /// every newline.
    pub fn to_colored_text(&self) -> String {
        let mut out = String::new();
        self.write_colored(&mut out, None, StyleFlags::empty());
        out
    }

    fn write_colored(&self, out: &mut String, color: Option<NamedColor>, style: StyleFlags) {
        let color = self.color.or(color);
        let style = style | self.style;

        if !self.text.is_empty() {
            let mut codes: Vec<String> = Vec::new();
            if let Some(color) = color {
                codes.push(color.ansi_code().to_string());
            }
            codes.extend(style.to_ansi_codes().iter().map(u8::to_string));

            if codes.is_empty() {
                out.push_str(&self.text);
            } else {
                // Each line is closed on its own; consoles log line by line.
                let open = format!("\x1b[{}m", codes.join(";"));
                for (index, segment) in self.text.split('\n').enumerate() {
                    if index > 0 {
                        out.push('\n');
                    }
                    if !segment.is_empty() {
                        out.push_str(&open);
                        out.push_str(segment);
                        out.push_str(RESET);
                    }
                }
            }
        }

        for child in &self.extra {
            child.write_colored(out, color, style);
        }
    }

    /// The chat-component JSON shape of this tree.
    pub fn to_json_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("text".to_string(), Value::String(self.text.clone()));
        if let Some(color) = self.color {
            map.insert("color".to_string(), Value::String(color.as_str().to_string()));
        }
        for (field, flag) in StyleFlags::FIELDS {
            if self.style.contains(flag) {
                map.insert(field.to_string(), Value::Bool(true));
            }
        }
        if let Some(click) = &self.click {
            let mut event = Map::new();
            event.insert("action".to_string(), Value::String(click.action.as_str().to_string()));
            event.insert("value".to_string(), Value::String(click.value.clone()));
            map.insert("clickEvent".to_string(), Value::Object(event));
        }
        if let Some(hover) = &self.hover {
            let mut event = Map::new();
            event.insert(
                "action".to_string(),
                Value::String(HoverEvent::SHOW_TEXT.to_string()),
            );
            event.insert("content".to_string(), hover.content().to_json_value());
            map.insert("hoverEvent".to_string(), Value::Object(event));
        }
        if !self.extra.is_empty() {
            map.insert(
                "extra".to_string(),
                Value::Array(self.extra.iter().map(TextComponent::to_json_value).collect()),
            );
        }
        Value::Object(map)
    }

    /// Indented structural echo, one string per output line.
    pub fn structure_lines(&self) -> Vec<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        if self.to_json_value().serialize(&mut ser).is_err() {
            return vec![self.to_plain_text()];
        }
        String::from_utf8_lossy(&buf)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Serialize for TextComponent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}

impl fmt::Display for TextComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_text())
    }
}

impl From<&str> for TextComponent {
    fn from(text: &str) -> Self {
        TextComponent::plain(text)
    }
}

impl From<String> for TextComponent {
    fn from(text: String) -> Self {
        TextComponent::plain(text)
    }
}
