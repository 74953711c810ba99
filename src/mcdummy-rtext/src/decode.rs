//! Decoding of chat-component JSON into [`TextComponent`] trees.
//!
//! Grammar accepted:
//!
//! - a string, tried first as JSON and otherwise taken literally;
//! - an object with `text`, `color`, style flags, `clickEvent`, `hoverEvent`;
//! - a sequence of strings, objects and nested sequences.
//!
//! A component's own `extra` array is only expanded when the component is the
//! content of a `show_text` hover event. Top-level objects and sequence
//! elements keep their `extra` unrendered.

use serde_json::{Map, Value};

use crate::color::NamedColor;
use crate::component::TextComponent;
use crate::error::{DecodeError, Result};
use crate::event::{ClickAction, ClickEvent, HoverEvent};
use crate::style::StyleFlags;

/// Whether an object's `extra` array replaces the object when decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtraMode {
    Ignore,
    Expand,
}

/// Decode operator-supplied text.
///
/// Objects and sequences are decoded structurally; a JSON string literal
/// yields its unquoted content. Anything that is not valid JSON, or is a
/// bare number, boolean or null, becomes one plain leaf holding `input`
/// unchanged.
pub fn decode_str(input: &str) -> Result<TextComponent> {
    match serde_json::from_str::<Value>(input) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => decode(&value),
        Ok(Value::String(text)) => Ok(TextComponent::plain(text)),
        _ => Ok(TextComponent::plain(input)),
    }
}

/// Decode an already parsed JSON value.
pub fn decode(value: &Value) -> Result<TextComponent> {
    match value {
        Value::String(text) => decode_str(text),
        Value::Array(items) => decode_sequence(items),
        Value::Object(map) => decode_object(map, ExtraMode::Ignore),
        Value::Null => Ok(TextComponent::default()),
        other => Ok(TextComponent::plain(other.to_string())),
    }
}

fn decode_sequence(items: &[Value]) -> Result<TextComponent> {
    let mut children = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(text) => children.push(TextComponent::plain(text.as_str())),
            Value::Object(map) => children.push(decode_object(map, ExtraMode::Ignore)?),
            Value::Array(nested) => children.push(decode_sequence(nested)?),
            // Scalars other than strings carry no text component.
            _ => {}
        }
    }
    Ok(TextComponent::composite(children))
}

fn decode_object(map: &Map<String, Value>, mode: ExtraMode) -> Result<TextComponent> {
    if mode == ExtraMode::Expand
        && let Some(extra) = map.get("extra")
    {
        return match extra {
            Value::Array(items) => decode_sequence(items),
            _ => Err(DecodeError::InvalidField {
                field: "extra",
                expected: "an array",
            }),
        };
    }

    let mut component = TextComponent::plain(optional_str(map, "text")?.unwrap_or_default());

    component.color = optional_str(map, "color")?
        .map(|name| name.parse::<NamedColor>())
        .transpose()?;

    for (field, flag) in StyleFlags::FIELDS {
        match map.get(field) {
            None | Some(Value::Null) => {}
            Some(Value::Bool(true)) => component.style |= flag,
            Some(Value::Bool(false)) => {}
            Some(_) => {
                return Err(DecodeError::InvalidField {
                    field,
                    expected: "a boolean",
                });
            }
        }
    }

    component.click = match map.get("clickEvent") {
        None | Some(Value::Null) => None,
        Some(Value::Object(event)) => decode_click(event)?,
        Some(_) => {
            return Err(DecodeError::InvalidField {
                field: "clickEvent",
                expected: "an object",
            });
        }
    };

    component.hover = match map.get("hoverEvent") {
        None | Some(Value::Null) => None,
        Some(Value::Object(event)) => decode_hover(event)?,
        Some(_) => {
            return Err(DecodeError::InvalidField {
                field: "hoverEvent",
                expected: "an object",
            });
        }
    };

    Ok(component)
}

fn decode_click(event: &Map<String, Value>) -> Result<Option<ClickEvent>> {
    let action = required_str(event, "action", "clickEvent.action")?;
    let value = required_str(event, "value", "clickEvent.value")?;

    Ok(ClickAction::from_name(action).map(|action| ClickEvent::new(action, value)))
}

fn decode_hover(event: &Map<String, Value>) -> Result<Option<HoverEvent>> {
    let action = required_str(event, "action", "hoverEvent.action")?;
    if action != HoverEvent::SHOW_TEXT {
        return Ok(None);
    }

    let content = event
        .get("content")
        .or_else(|| event.get("contents"))
        .or_else(|| event.get("value"));

    let component = match content {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(text)) => TextComponent::plain(text.as_str()),
        Some(Value::Array(items)) => decode_sequence(items)?,
        Some(Value::Object(map)) => decode_object(map, ExtraMode::Expand)?,
        Some(other) => TextComponent::plain(other.to_string()),
    };

    Ok(Some(HoverEvent::show_text(component)))
}

fn optional_str<'a>(map: &'a Map<String, Value>, field: &'static str) -> Result<Option<&'a str>> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(_) => Err(DecodeError::InvalidField {
            field,
            expected: "a string",
        }),
    }
}

fn required_str<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    field: &'static str,
) -> Result<&'a str> {
    match map.get(key) {
        Some(Value::String(text)) => Ok(text.as_str()),
        _ => Err(DecodeError::InvalidField {
            field,
            expected: "a string",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_malformed_text_degrades_to_plain_leaf() {
        let component = decode_str("not json").unwrap();
        assert_eq!(component, TextComponent::plain("not json"));
        assert!(component.is_leaf());
    }

    #[test]
    fn test_truncated_json_degrades_to_plain_leaf() {
        let input = r#"{"text":"hi","color":"red""#;
        assert_eq!(decode_str(input).unwrap(), TextComponent::plain(input));
    }

    #[test]
    fn test_bare_scalars_stay_literal() {
        assert_eq!(decode_str("42").unwrap(), TextComponent::plain("42"));
        assert_eq!(decode_str("true").unwrap(), TextComponent::plain("true"));
        assert_eq!(decode_str("null").unwrap(), TextComponent::plain("null"));
    }

    #[test]
    fn test_json_string_literal_is_unquoted() {
        assert_eq!(decode_str(r#""quoted""#).unwrap(), TextComponent::plain("quoted"));
    }

    #[test]
    fn test_sequence_of_strings() {
        let component = decode(&json!(["a", "b"])).unwrap();

        assert!(component.is_composite());
        assert_eq!(component.color, None);
        assert_eq!(
            component.extra,
            vec![TextComponent::plain("a"), TextComponent::plain("b")]
        );
        assert!(component.extra.iter().all(|child| child.color.is_none()));
    }

    #[test]
    fn test_sequence_from_text() {
        let component = decode_str(r#"["a", {"text":"b","color":"blue"}, ["c"]]"#).unwrap();

        assert_eq!(component.extra.len(), 3);
        assert_eq!(component.extra[1], TextComponent::colored("b", NamedColor::Blue));
        assert_eq!(
            component.extra[2],
            TextComponent::composite([TextComponent::plain("c")])
        );
        assert_eq!(component.color, None);
    }

    #[test]
    fn test_sequence_skips_non_text_scalars() {
        let component = decode(&json!(["a", 1, null, true, "b"])).unwrap();
        assert_eq!(component.to_plain_text(), "ab");
        assert_eq!(component.extra.len(), 2);
    }

    #[test]
    fn test_sequence_strings_are_not_reparsed() {
        let component = decode(&json!([r#"{"text":"x"}"#])).unwrap();
        assert_eq!(component.extra[0], TextComponent::plain(r#"{"text":"x"}"#));
    }

    #[test]
    fn test_object_with_color() {
        let component = decode(&json!({"text": "hi", "color": "red"})).unwrap();

        assert_eq!(component.text, "hi");
        assert_eq!(component.color, Some(NamedColor::Red));
        assert!(component.style.is_empty());
        assert!(component.click.is_none());
        assert!(component.hover.is_none());
        assert!(component.is_leaf());
    }

    #[test]
    fn test_unknown_color_fails() {
        let err = decode(&json!({"text": "hi", "color": "crimson"})).unwrap_err();
        assert_eq!(err, DecodeError::UnknownColor("crimson".to_string()));

        // The same failure surfaces through text input.
        assert!(decode_str(r#"{"text":"hi","color":"crimson"}"#).is_err());
    }

    #[test]
    fn test_unknown_color_inside_sequence_fails() {
        assert!(decode(&json!(["ok", {"text": "x", "color": "nope"}])).is_err());
    }

    #[test]
    fn test_style_flags() {
        let component = decode(&json!({
            "text": "s",
            "bold": true,
            "italic": false,
            "underlined": true,
            "strikethrough": true,
            "obfuscated": true
        }))
        .unwrap();

        assert_eq!(
            component.style,
            StyleFlags::BOLD
                | StyleFlags::UNDERLINED
                | StyleFlags::STRIKETHROUGH
                | StyleFlags::OBFUSCATED
        );
    }

    #[test]
    fn test_mistyped_flag_is_invalid_field() {
        let err = decode(&json!({"text": "s", "bold": "yes"})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidField {
                field: "bold",
                expected: "a boolean"
            }
        );
    }

    #[test]
    fn test_click_event() {
        let component = decode(&json!({
            "text": "click",
            "clickEvent": {"action": "suggest_command", "value": "/help"}
        }))
        .unwrap();

        assert_eq!(
            component.click,
            Some(ClickEvent::new(ClickAction::SuggestCommand, "/help"))
        );
    }

    #[test]
    fn test_unknown_click_action_is_dropped() {
        let component = decode(&json!({
            "text": "click",
            "clickEvent": {"action": "teleport", "value": "0 0 0"}
        }))
        .unwrap();

        assert_eq!(component.text, "click");
        assert!(component.click.is_none());
    }

    #[test]
    fn test_hover_show_text() {
        let component = decode(&json!({
            "text": "hover me",
            "hoverEvent": {"action": "show_text", "content": {"text": "tip", "color": "gray"}}
        }))
        .unwrap();

        let hover = component.hover.expect("hover kept");
        assert_eq!(hover.content(), &TextComponent::colored("tip", NamedColor::Gray));
    }

    #[test]
    fn test_hover_accepts_contents_and_plain_string() {
        let component = decode(&json!({
            "text": "h",
            "hoverEvent": {"action": "show_text", "contents": "plain tip"}
        }))
        .unwrap();

        assert_eq!(
            component.hover.map(|hover| hover.content().clone()),
            Some(TextComponent::plain("plain tip"))
        );
    }

    #[test]
    fn test_other_hover_actions_are_dropped() {
        let component = decode(&json!({
            "text": "h",
            "hoverEvent": {"action": "show_item", "content": {"text": "stone"}}
        }))
        .unwrap();

        assert!(component.hover.is_none());
    }

    #[test]
    fn test_hover_content_expands_extra_but_top_level_does_not() {
        let with_extra = json!({
            "text": "parent",
            "extra": [{"text": "child-a"}, "child-b"]
        });

        let hovered = decode(&json!({
            "text": "h",
            "hoverEvent": {"action": "show_text", "content": with_extra.clone()}
        }))
        .unwrap();
        let tooltip = hovered.hover.expect("hover kept");
        assert_eq!(tooltip.content().to_plain_text(), "child-achild-b");
        assert_eq!(tooltip.content().extra.len(), 2);

        let top_level = decode(&with_extra).unwrap();
        assert_eq!(top_level.to_plain_text(), "parent");
        assert!(top_level.extra.is_empty());

        let in_sequence = decode(&json!([with_extra])).unwrap();
        assert_eq!(in_sequence.to_plain_text(), "parent");
    }

    #[test]
    fn test_null_and_number_values() {
        assert_eq!(decode(&Value::Null).unwrap(), TextComponent::default());
        assert_eq!(decode(&json!(7)).unwrap(), TextComponent::plain("7"));
    }
}
