//! Tag-driven decoding of `KEY=VALUE` lists into structs
//!
//! `envtag` takes a flat list of `KEY=VALUE` strings, as found in a process
//! environment, and decodes it into the fields of a struct. Each field carries
//! an annotation naming the variable to read and options controlling how the
//! value is decoded.
//!
//! # Features
//!
//! - **Declarative**: Automatic implementation with `#[derive(EnvTag)]`
//! - **Source agnostic**: Decode any `KEY=VALUE` list, not only the process environment
//! - **Fail fast**: The first missing or malformed variable aborts decoding
//! - **Atomic mode**: [`decode_atomic`] leaves the target untouched on error
//! - **Runtime schemas**: [`Schema`] for structs that cannot use the derive
//!
//! # Supported Field Types
//!
//! | Type                   | Value format                                  |
//! |------------------------|-----------------------------------------------|
//! | `String`               | taken verbatim                                |
//! | `i64`, `isize`         | base-10 signed integer                        |
//! | `u64`                  | base-10 unsigned integer, digits only         |
//! | `bool`                 | `true`/`false`/`t`/`f`/`1`/`0`, any case      |
//! | `HashMap<String, bool>`| `key1:true;key2:false`                        |
//! | `Vec<u8>`              | standard base64, only with the `b64` option   |
//!
//! A `Vec<u8>` field without `b64` is left untouched. Signed integers accept
//! a leading `+` or `-`; `u64` values must not carry a sign.
//!
//! # Example
//!
//! ```rust
//! use envtag::EnvTag;
//!
//! #[derive(Debug, Default, EnvTag)]
//! struct Config {
//!     #[env("A,int64")]
//!     pub a: i64,
//!
//!     #[env("B")]
//!     pub b: String,
//!
//!     // No annotation: read from the upper-cased field name, `C`
//!     pub c: bool,
//! }
//!
//! # fn main() -> Result<(), envtag::EnvError> {
//! let mut config = Config::default();
//! envtag::decode(["A=1", "B=hello", "C=true"], &mut config)?;
//! assert_eq!(config.a, 1);
//! assert_eq!(config.b, "hello");
//! assert!(config.c);
//! # Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[env("NAME[,option...]")]`
//!
//! Read the field from `NAME`. Recognized options are `b64` (base64-decode a
//! `Vec<u8>` field) and the type hints `string`, `int64`, `uint64`, `int` and
//! `bool`, which are accepted but do not change decoding. Any other option is
//! a compile error.
//!
//! Fields without the attribute are read from their upper-cased identifier
//! and are required like every other field.
//!
//! ## `#[env("-")]`
//!
//! Never read the field. It keeps whatever value it had, and its type does
//! not need to be decodable.
//!
//! ```rust
//! # use envtag::EnvTag;
//! #[derive(Default, EnvTag)]
//! struct Config {
//!     #[env("-")]
//!     pub cache: Vec<String>,
//! }
//! ```
//!
//! ## `#[env(prefix = "PREFIX_")]`
//!
//! Struct-level: prepend a prefix to every variable name.
//!
//! ```rust
//! # use envtag::EnvTag;
//! #[derive(Default, EnvTag)]
//! #[env(prefix = "APP_")]
//! struct Config {
//!     // Read from APP_PORT
//!     #[env("PORT")]
//!     pub port: u64,
//! }
//! ```

#[doc(hidden)]
pub mod de;

mod error;
mod schema;
mod table;
mod tag;

pub use de::{DecodeValue, Field};
pub use envtag_derive::EnvTag;
pub use error::EnvError;
pub use schema::Schema;
pub use table::LookupTable;
pub use tag::{Tag, TagOption, SKIP};

// Re-export for `EnvTag::from_env` callers
#[doc(hidden)]
pub use anyhow;

use anyhow::Context;

/// A struct whose fields can be decoded from a [`LookupTable`].
///
/// Implement with `#[derive(EnvTag)]`.
pub trait EnvTag {
    /// Decode every field from `table`, in declaration order.
    ///
    /// Stops at the first error. Fields decoded before it keep their new
    /// values.
    fn decode_table(&mut self, table: &LookupTable) -> Result<(), EnvError>;

    /// Parse `KEY=VALUE` pairs and decode them into `self`.
    fn decode<I, S>(&mut self, pairs: I) -> Result<(), EnvError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        Self: Sized,
    {
        decode(pairs, self)
    }

    /// Build a default value and decode `KEY=VALUE` pairs into it.
    fn from_pairs<I, S>(pairs: I) -> Result<Self, EnvError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        Self: Default + Sized,
    {
        let mut value = Self::default();
        decode(pairs, &mut value)?;
        Ok(value)
    }

    /// Load configuration from the environment of the current process.
    ///
    /// # Errors
    ///
    /// - Required environment variables are not set
    /// - Environment variable values cannot be parsed into field types
    fn from_env() -> anyhow::Result<Self>
    where
        Self: Default + Sized,
    {
        let table = LookupTable::from_env();
        let mut value = Self::default();
        value.decode_table(&table).with_context(|| {
            format!(
                "failed to load {} from the environment",
                std::any::type_name::<Self>()
            )
        })?;
        Ok(value)
    }
}

/// Parse `KEY=VALUE` pairs into a [`LookupTable`].
///
/// See [`LookupTable::parse`].
pub fn parse<I, S>(pairs: I) -> Result<LookupTable, EnvError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    LookupTable::parse(pairs)
}

/// Decode `KEY=VALUE` pairs into `target`.
///
/// Decoding is not atomic: on error, fields processed before the failing one
/// keep their new values. Use [`decode_atomic`] to avoid partial updates.
pub fn decode<T, I, S>(pairs: I, target: &mut T) -> Result<(), EnvError>
where
    T: EnvTag + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let table = LookupTable::parse(pairs)?;
    target.decode_table(&table)
}

/// Decode `KEY=VALUE` pairs into a copy of `target`, replacing `target` only
/// when every field succeeds.
pub fn decode_atomic<T, I, S>(pairs: I, target: &mut T) -> Result<(), EnvError>
where
    T: EnvTag + Clone,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let table = LookupTable::parse(pairs)?;
    let mut scratch = target.clone();
    scratch.decode_table(&table)?;
    *target = scratch;
    Ok(())
}
