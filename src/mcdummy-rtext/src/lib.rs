//! Chat-component text for the mcdummy console.
//!
//! This crate turns the JSON chat-component format into a tree of
//! [`TextComponent`]s and renders that tree for a console.
//!
//! ```
//! use mcdummy_rtext::{NamedColor, decode_str};
//!
//! let component = decode_str(r#"{"text":"hi","color":"red"}"#).unwrap();
//! assert_eq!(component.color, Some(NamedColor::Red));
//! assert_eq!(component.to_plain_text(), "hi");
//!
//! // Anything that is not structured JSON stays literal.
//! assert_eq!(decode_str("not json").unwrap().text, "not json");
//! ```
//!
//! # Rendering
//!
//! - [`TextComponent::to_plain_text`] for log files
//! - [`TextComponent::to_colored_text`] for ANSI terminals
//! - [`TextComponent::structure_lines`] for an indented JSON echo

mod color;
mod component;
mod decode;
mod error;
mod event;
mod style;

pub use color::NamedColor;
pub use component::TextComponent;
pub use decode::{decode, decode_str};
pub use error::{DecodeError, Result};
pub use event::{ClickAction, ClickEvent, HoverEvent};
pub use style::StyleFlags;
