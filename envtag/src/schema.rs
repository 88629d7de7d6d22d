//! Explicit decoding schemas built at runtime
//!
//! A [`Schema`] is the hand-written counterpart of `#[derive(EnvTag)]`: an
//! ordered list of fields, each with an identifier, an annotation and an
//! accessor returning the field slot.
//!
//! ```rust
//! use envtag::Schema;
//!
//! #[derive(Debug, Default)]
//! struct Config {
//!     port: u64,
//!     debug: bool,
//! }
//!
//! # fn main() -> Result<(), envtag::EnvError> {
//! let schema = Schema::new()
//!     .field("port", "PORT,uint64", |c: &mut Config| &mut c.port)?
//!     .field("debug", "DEBUG", |c: &mut Config| &mut c.debug)?;
//!
//! let mut config = Config::default();
//! schema.decode(["PORT=8080", "DEBUG=true"], &mut config)?;
//! assert_eq!(config.port, 8080);
//! assert!(config.debug);
//! # Ok(())
//! # }
//! ```

use crate::de::{decode_field, DecodeValue, Field};
use crate::error::EnvError;
use crate::table::LookupTable;
use crate::tag::Tag;
use std::fmt;

type DecodeFn<T> = Box<dyn Fn(&mut T, &Field<'_>, &LookupTable) -> Result<(), EnvError> + Send + Sync>;

struct SchemaField<T> {
    ident: String,
    tag: Tag,
    decode: DecodeFn<T>,
}

/// Ordered list of `(accessor, annotation)` pairs describing how to decode `T`.
pub struct Schema<T> {
    prefix: String,
    fields: Vec<SchemaField<T>>,
}

impl<T> Schema<T> {
    /// Create an empty schema with no prefix.
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            fields: Vec::new(),
        }
    }

    /// Prepend `prefix` to the variable name of every field added afterwards.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Add a field decoded from the variable named by `tag`.
    ///
    /// Fails with [`EnvError::InvalidTag`] if `tag` cannot be parsed.
    pub fn field<V, F>(self, ident: impl Into<String>, tag: &str, access: F) -> Result<Self, EnvError>
    where
        V: DecodeValue + 'static,
        F: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        let tag = Tag::parse(tag)?;
        Ok(self.push(ident.into(), tag, access))
    }

    /// Add a field read from its upper-cased identifier, with no options.
    pub fn untagged<V, F>(self, ident: impl Into<String>, access: F) -> Self
    where
        V: DecodeValue + 'static,
        F: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        let ident = ident.into();
        let tag = Tag::from_ident(&ident);
        self.push(ident, tag, access)
    }

    fn push<V, F>(mut self, ident: String, tag: Tag, access: F) -> Self
    where
        V: DecodeValue + 'static,
        F: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        let tag = tag.with_prefix(&self.prefix);
        self.fields.push(SchemaField {
            ident,
            tag,
            decode: Box::new(move |target: &mut T, field: &Field<'_>, table: &LookupTable| {
                decode_field(access(target), field, table)?;
                Ok(())
            }),
        });
        self
    }

    /// Number of fields, skipped ones included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field has been added.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Decode fields from an already-built table, in the order they were added.
    ///
    /// Stops at the first error; fields decoded before it keep their values.
    pub fn decode_table(&self, table: &LookupTable, target: &mut T) -> Result<(), EnvError> {
        for entry in &self.fields {
            let field = Field::new(&entry.ident, &entry.tag);
            (entry.decode)(target, &field, table)?;
        }
        Ok(())
    }

    /// Parse `KEY=VALUE` pairs and decode them into `target`.
    pub fn decode<I, S>(&self, pairs: I, target: &mut T) -> Result<(), EnvError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let table = LookupTable::parse(pairs)?;
        self.decode_table(&table, target)
    }

    /// Like [`Schema::decode`], but `target` is only replaced when every
    /// field decodes successfully.
    pub fn decode_atomic<I, S>(&self, pairs: I, target: &mut T) -> Result<(), EnvError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        T: Clone,
    {
        let table = LookupTable::parse(pairs)?;
        let mut scratch = target.clone();
        self.decode_table(&table, &mut scratch)?;
        *target = scratch;
        Ok(())
    }
}

impl<T> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(|field| (&field.ident, &field.tag)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Config {
        a: i64,
        b: String,
        c: bool,
        flags: HashMap<String, bool>,
        ignored: String,
    }

    fn schema() -> Schema<Config> {
        Schema::new()
            .field("a", "A,int64", |c: &mut Config| &mut c.a)
            .and_then(|s| s.field("b", "B", |c: &mut Config| &mut c.b))
            .and_then(|s| s.field("c", "C,bool", |c: &mut Config| &mut c.c))
            .map(|s| s.untagged("flags", |c: &mut Config| &mut c.flags))
            .and_then(|s| s.field("ignored", "-", |c: &mut Config| &mut c.ignored))
            .unwrap()
    }

    #[test]
    fn test_schema_decode() {
        let mut config = Config::default();
        schema()
            .decode(["A=1", "B=hello", "C=true", "FLAGS=x:true;y:false"], &mut config)
            .unwrap();

        assert_eq!(config.a, 1);
        assert_eq!(config.b, "hello");
        assert!(config.c);
        assert_eq!(
            config.flags,
            HashMap::from([("x".to_string(), true), ("y".to_string(), false)])
        );
        assert_eq!(config.ignored, "");
    }

    #[test]
    fn test_schema_decode_stops_at_first_error() {
        let mut config = Config::default();
        let result = schema().decode(["A=5", "B=hello", "C=maybe", "FLAGS=x:true"], &mut config);

        assert!(matches!(result, Err(EnvError::InvalidBool { .. })));
        assert_eq!(config.a, 5);
        assert_eq!(config.b, "hello");
        assert!(config.flags.is_empty());
    }

    #[test]
    fn test_schema_decode_atomic_keeps_target_on_error() {
        let mut config = Config {
            a: 99,
            ..Config::default()
        };
        let result = schema().decode_atomic(["A=5", "B=hello"], &mut config);

        assert!(matches!(result, Err(EnvError::MissingKey { .. })));
        assert_eq!(
            config,
            Config {
                a: 99,
                ..Config::default()
            }
        );
    }

    #[test]
    fn test_schema_prefix() {
        #[derive(Default)]
        struct Server {
            port: u64,
        }

        let schema = Schema::new()
            .prefix("APP_")
            .field("port", "PORT", |s: &mut Server| &mut s.port)
            .unwrap();

        let mut server = Server::default();
        schema.decode(["PORT=1", "APP_PORT=2"], &mut server).unwrap();
        assert_eq!(server.port, 2);
    }

    #[test]
    fn test_schema_invalid_tag() {
        let result = Schema::new().field("a", "A,hex", |c: &mut Config| &mut c.a);
        assert!(matches!(result, Err(EnvError::InvalidTag { .. })));
    }

    #[test]
    fn test_schema_len() {
        assert_eq!(schema().len(), 5);
        assert!(Schema::<Config>::new().is_empty());
    }
}
