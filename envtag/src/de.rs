//! Per-type decoding of looked-up values

use crate::error::EnvError;
use crate::table::LookupTable;
use crate::tag::{Tag, TagOption};
use base64::Engine;
use std::collections::HashMap;

/// The field being decoded: its identifier and its resolved annotation.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    ident: &'a str,
    tag: &'a Tag,
}

impl<'a> Field<'a> {
    /// Describe field `ident` read through `tag`.
    pub fn new(ident: &'a str, tag: &'a Tag) -> Self {
        Self { ident, tag }
    }

    /// Struct field identifier.
    pub fn ident(&self) -> &'a str {
        self.ident
    }

    /// Variable the value is read from.
    pub fn key(&self) -> &'a str {
        self.tag.name()
    }

    /// Resolved annotation.
    pub fn tag(&self) -> &'a Tag {
        self.tag
    }

    /// Whether the annotation carries `option`.
    pub fn has_option(&self, option: TagOption) -> bool {
        self.tag.has_option(option)
    }
}

/// Decoding strategy for a field type.
///
/// Implementations write the decoded value into `self` only on success, so a
/// failing field keeps its previous value.
pub trait DecodeValue {
    /// Decode `raw` into `self`.
    ///
    /// Returns whether `self` was written; `false` means the value was
    /// deliberately left alone.
    fn decode_value(&mut self, raw: &str, field: &Field<'_>) -> Result<bool, EnvError>;
}

impl DecodeValue for String {
    fn decode_value(&mut self, raw: &str, _field: &Field<'_>) -> Result<bool, EnvError> {
        raw.clone_into(self);
        Ok(true)
    }
}

impl DecodeValue for i64 {
    fn decode_value(&mut self, raw: &str, field: &Field<'_>) -> Result<bool, EnvError> {
        *self = raw.parse().map_err(|e| EnvError::InvalidInt {
            key: field.key().to_string(),
            field: field.ident().to_string(),
            value: raw.to_string(),
            source: e,
        })?;
        Ok(true)
    }
}

impl DecodeValue for isize {
    fn decode_value(&mut self, raw: &str, field: &Field<'_>) -> Result<bool, EnvError> {
        *self = raw.parse().map_err(|e| EnvError::InvalidInt {
            key: field.key().to_string(),
            field: field.ident().to_string(),
            value: raw.to_string(),
            source: e,
        })?;
        Ok(true)
    }
}

/// Digits only: unlike `str::parse`, a leading `+` is rejected.
impl DecodeValue for u64 {
    fn decode_value(&mut self, raw: &str, field: &Field<'_>) -> Result<bool, EnvError> {
        let invalid = |reason: String| EnvError::InvalidUint {
            key: field.key().to_string(),
            field: field.ident().to_string(),
            value: raw.to_string(),
            reason,
        };

        if raw.starts_with('+') {
            return Err(invalid("sign is not allowed".to_string()));
        }
        *self = raw.parse().map_err(|e: std::num::ParseIntError| invalid(e.to_string()))?;
        Ok(true)
    }
}

impl DecodeValue for bool {
    fn decode_value(&mut self, raw: &str, field: &Field<'_>) -> Result<bool, EnvError> {
        *self = parse_bool(raw, field)?;
        Ok(true)
    }
}

/// Decodes `sub1:true;sub2:false`. Later duplicates of a subkey win.
impl DecodeValue for HashMap<String, bool> {
    fn decode_value(&mut self, raw: &str, field: &Field<'_>) -> Result<bool, EnvError> {
        let mut map = HashMap::new();
        for entry in raw.split(';') {
            let parts: Vec<&str> = entry.split(':').collect();
            let [subkey, value] = parts[..] else {
                return Err(EnvError::MalformedMapEntry {
                    key: field.key().to_string(),
                    field: field.ident().to_string(),
                    entry: entry.to_string(),
                });
            };
            map.insert(subkey.to_string(), parse_bool(value, field)?);
        }
        *self = map;
        Ok(true)
    }
}

/// Byte fields are decoded only when the tag carries `b64`; otherwise the
/// field is left as it is.
impl DecodeValue for Vec<u8> {
    fn decode_value(&mut self, raw: &str, field: &Field<'_>) -> Result<bool, EnvError> {
        if !field.has_option(TagOption::Base64) {
            tracing::warn!(
                key = field.key(),
                field = field.ident(),
                "byte field has no b64 option, leaving it untouched"
            );
            return Ok(false);
        }
        *self = base64::engine::general_purpose::STANDARD
            .decode(raw)
            .map_err(|e| EnvError::InvalidBase64 {
                key: field.key().to_string(),
                field: field.ident().to_string(),
                source: e,
            })?;
        Ok(true)
    }
}

/// Boolean literals: `true`, `false`, `t`, `f`, `1`, `0`, ASCII case-insensitive.
fn parse_bool(raw: &str, field: &Field<'_>) -> Result<bool, EnvError> {
    const TRUE: [&str; 3] = ["true", "t", "1"];
    const FALSE: [&str; 3] = ["false", "f", "0"];

    if TRUE.iter().any(|lit| raw.eq_ignore_ascii_case(lit)) {
        Ok(true)
    } else if FALSE.iter().any(|lit| raw.eq_ignore_ascii_case(lit)) {
        Ok(false)
    } else {
        Err(EnvError::InvalidBool {
            key: field.key().to_string(),
            field: field.ident().to_string(),
            value: raw.to_string(),
        })
    }
}

/// Look up and decode a single field.
///
/// Returns whether the field was written. Fields tagged `-` are never looked
/// up. Used by macro-generated code and by [`Schema`](crate::Schema).
#[doc(hidden)]
pub fn decode_field<T>(slot: &mut T, field: &Field<'_>, table: &LookupTable) -> Result<bool, EnvError>
where
    T: DecodeValue + ?Sized,
{
    if field.tag().is_skip() {
        skip_field(field.ident());
        return Ok(false);
    }

    let raw = table
        .get(field.key())
        .ok_or_else(|| EnvError::missing(field.key()))?;
    let written = slot.decode_value(raw, field)?;

    if written {
        tracing::debug!(key = field.key(), field = field.ident(), "decoded field");
    }
    Ok(written)
}

/// Record a field tagged `-`.
///
/// Used by macro-generated code, which emits no decoding for such fields.
#[doc(hidden)]
pub fn skip_field(ident: &str) {
    tracing::debug!(field = ident, "skipping field tagged '-'");
}
