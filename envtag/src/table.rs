//! `KEY=VALUE` line parsing

use crate::error::EnvError;
use std::collections::HashMap;
use std::env;

/// Key to value mapping built from a list of `KEY=VALUE` entries.
///
/// Keys are unique; when an entry repeats a key the later value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    vars: HashMap<String, String>,
}

impl LookupTable {
    /// Parse `KEY=VALUE` entries into a table.
    ///
    /// Each entry is split on its first `=`, so values may contain `=`
    /// themselves. An entry without any `=` aborts the whole parse with
    /// [`EnvError::MalformedEntry`].
    pub fn parse<I, S>(pairs: I) -> Result<Self, EnvError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vars = HashMap::new();
        for pair in pairs {
            let (key, value) = split_entry(pair.as_ref())?;
            vars.insert(key.to_string(), value.to_string());
        }
        Ok(Self { vars })
    }

    /// Build a table from the environment of the current process.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_env() -> Self {
        let mut vars = HashMap::new();
        for (key, value) in env::vars_os() {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    vars.insert(key, value);
                }
                (Ok(key), Err(_)) => {
                    tracing::warn!(key = %key, "skipping environment variable with non UTF-8 value");
                }
                (Err(key), _) => {
                    tracing::warn!(key = ?key, "skipping environment variable with non UTF-8 name");
                }
            }
        }
        Self { vars }
    }

    /// Look up the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Split a single entry on its first `=`.
fn split_entry(entry: &str) -> Result<(&str, &str), EnvError> {
    entry
        .split_once('=')
        .ok_or_else(|| EnvError::MalformedEntry {
            entry: entry.to_string(),
        })
}
