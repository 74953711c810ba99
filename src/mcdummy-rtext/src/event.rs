//! Click and hover payloads attached to chat components.

use std::fmt;

use crate::component::TextComponent;

/// Actions a click event may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickAction {
    OpenUrl,
    OpenFile,
    RunCommand,
    SuggestCommand,
    CopyToClipboard,
}

impl ClickAction {
    pub const ALL: [ClickAction; 5] = [
        ClickAction::OpenUrl,
        ClickAction::OpenFile,
        ClickAction::RunCommand,
        ClickAction::SuggestCommand,
        ClickAction::CopyToClipboard,
    ];

    /// The name used in chat-component JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClickAction::OpenUrl => "open_url",
            ClickAction::OpenFile => "open_file",
            ClickAction::RunCommand => "run_command",
            ClickAction::SuggestCommand => "suggest_command",
            ClickAction::CopyToClipboard => "copy_to_clipboard",
        }
    }

    /// Look up an action by its JSON name.
    ///
    /// Unknown names yield `None`; callers drop the click rather than fail.
    pub fn from_name(name: &str) -> Option<ClickAction> {
        ClickAction::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == name)
    }
}

impl fmt::Display for ClickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A click action with its argument (URL, command line, text to copy...).
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub action: ClickAction,
    pub value: String,
}

impl ClickEvent {
    pub fn new(action: ClickAction, value: impl Into<String>) -> Self {
        Self {
            action,
            value: value.into(),
        }
    }
}

/// Hover payloads. Only tooltip text is supported.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverEvent {
    ShowText(Box<TextComponent>),
}

impl HoverEvent {
    pub const SHOW_TEXT: &'static str = "show_text";

    pub fn show_text(component: TextComponent) -> Self {
        HoverEvent::ShowText(Box::new(component))
    }

    /// The tooltip component.
    pub fn content(&self) -> &TextComponent {
        match self {
            HoverEvent::ShowText(component) => component,
        }
    }
}
