//! Error types for chat-component decoding.

use thiserror::Error;

/// Errors raised while decoding a structured chat component.
///
/// Malformed JSON text never produces one of these; it degrades to a plain
/// leaf instead. Only a well-formed component carrying a value the decoder
/// cannot accept fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The `color` field named a color outside the palette.
    #[error("unknown color: {0}")]
    UnknownColor(String),

    /// A recognised field carried a value of the wrong JSON type.
    #[error("invalid value for field '{field}': expected {expected}")]
    InvalidField {
        /// Field name as it appears in the JSON object.
        field: &'static str,
        /// Human readable description of the accepted type.
        expected: &'static str,
    },
}

/// Result type alias for decoding operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
