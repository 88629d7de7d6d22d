//! Error types for tag-driven environment decoding

use std::num::ParseIntError;

/// Errors that can occur while decoding a `KEY=VALUE` list into a struct.
///
/// Every variant that concerns a value names the variable it was read from and
/// the struct field it was destined for, so a misconfiguration can be
/// diagnosed from the message alone.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    /// A raw entry did not contain `=`.
    #[error("Malformed entry '{entry}': expected KEY=VALUE")]
    MalformedEntry {
        /// The offending raw entry
        entry: String,
    },

    /// A required variable is not present in the lookup table.
    #[error("Environment variable '{name}' is required but not set")]
    MissingKey {
        /// Resolved variable name
        name: String,
    },

    /// Value could not be parsed as a signed integer (`i64` or `isize`).
    #[error("Failed to parse '{value}' as a signed integer for field '{field}' (variable '{key}'): {source}")]
    InvalidInt {
        /// Variable the value was read from
        key: String,
        /// Struct field being decoded
        field: String,
        /// Raw value
        value: String,
        /// Underlying parse failure
        source: ParseIntError,
    },

    /// Value could not be parsed as an unsigned integer.
    ///
    /// Only digits are accepted; a leading `+` or `-` is an error.
    #[error("Failed to parse '{value}' as an unsigned integer for field '{field}' (variable '{key}'): {reason}")]
    InvalidUint {
        /// Variable the value was read from
        key: String,
        /// Struct field being decoded
        field: String,
        /// Raw value
        value: String,
        /// Why parsing failed
        reason: String,
    },

    /// Value is not a boolean literal.
    ///
    /// For map fields `value` holds the boolean part of the failing entry.
    #[error("Failed to parse '{value}' as a boolean for field '{field}' (variable '{key}')")]
    InvalidBool {
        /// Variable the value was read from
        key: String,
        /// Struct field being decoded
        field: String,
        /// Raw value
        value: String,
    },

    /// Value requested with the `b64` option is not valid base64.
    #[error("Failed to decode base64 for field '{field}' (variable '{key}'): {source}")]
    InvalidBase64 {
        /// Variable the value was read from
        key: String,
        /// Struct field being decoded
        field: String,
        /// Underlying decode failure
        source: base64::DecodeError,
    },

    /// An entry of a `sub:bool;sub:bool` map value is not a `sub:bool` pair.
    #[error("Malformed map entry '{entry}' for field '{field}' (variable '{key}'): expected 'key:bool'")]
    MalformedMapEntry {
        /// Variable the value was read from
        key: String,
        /// Struct field being decoded
        field: String,
        /// The entry that failed to split
        entry: String,
    },

    /// A field annotation could not be interpreted.
    #[error("Invalid env tag '{tag}': {message}")]
    InvalidTag {
        /// The annotation text
        tag: String,
        /// What is wrong with it
        message: String,
    },
}

impl EnvError {
    /// Create a missing variable error
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingKey { name: name.into() }
    }

    /// Create an invalid tag error
    pub(crate) fn invalid_tag(tag: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::InvalidTag {
            tag: tag.into(),
            message: message.to_string(),
        }
    }

    /// Name of the variable involved in this error, when there is one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MissingKey { name } => Some(name),
            Self::InvalidInt { key, .. }
            | Self::InvalidUint { key, .. }
            | Self::InvalidBool { key, .. }
            | Self::InvalidBase64 { key, .. }
            | Self::MalformedMapEntry { key, .. } => Some(key),
            Self::MalformedEntry { .. } | Self::InvalidTag { .. } => None,
        }
    }
}
