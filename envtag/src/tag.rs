//! Field annotation parsing
//!
//! An annotation has the form `name[,option1[,option2...]]`. The name is the
//! variable to read; the literal name `-` marks a field that is never read.

use crate::error::EnvError;
use std::fmt;
use std::str::FromStr;

/// Name that marks a field as skipped.
pub const SKIP: &str = "-";

/// Option token in a field annotation.
///
/// The type hints (`string`, `int64`, `uint64`, `int`, `bool`) are accepted
/// for compatibility and otherwise ignored: the declared field type selects
/// the decoder. Only `b64` changes behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOption {
    /// `string`: text field hint.
    String,
    /// `int64`: signed 64-bit field hint.
    Int64,
    /// `uint64`: unsigned 64-bit field hint.
    Uint64,
    /// `int`: machine word field hint.
    Int,
    /// `bool`: boolean field hint.
    Bool,
    /// Base64-decode the value into a byte field.
    Base64,
}

impl TagOption {
    /// Token as written in an annotation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Base64 => "b64",
        }
    }
}

impl FromStr for TagOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "int64" => Ok(Self::Int64),
            "uint64" => Ok(Self::Uint64),
            "int" => Ok(Self::Int),
            "bool" => Ok(Self::Bool),
            "b64" => Ok(Self::Base64),
            other => Err(format!("unknown option '{}'", other)),
        }
    }
}

impl fmt::Display for TagOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed field annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    options: Vec<TagOption>,
}

impl Tag {
    /// Build a tag from an already validated name and options.
    ///
    /// Used by macro-generated code, which checks the annotation at compile
    /// time, so nothing is parsed when decoding.
    pub fn new(name: impl Into<String>, options: &[TagOption]) -> Self {
        Self {
            name: name.into(),
            options: options.to_vec(),
        }
    }

    /// Parse `name[,option...]`.
    ///
    /// The text is split on its first comma; the remainder is a
    /// comma-separated option list.
    pub fn parse(tag: &str) -> Result<Self, EnvError> {
        let (name, rest) = match tag.split_once(',') {
            Some((name, rest)) => (name, Some(rest)),
            None => (tag, None),
        };

        if name.is_empty() {
            return Err(EnvError::invalid_tag(tag, "missing variable name"));
        }

        let options = rest
            .into_iter()
            .flat_map(|rest| rest.split(','))
            .map(|opt| opt.parse::<TagOption>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|message| EnvError::invalid_tag(tag, message))?;

        Ok(Self::new(name, &options))
    }

    /// Tag used for a field without an annotation: the upper-cased identifier.
    pub fn from_ident(ident: &str) -> Self {
        Self {
            name: ident.to_uppercase(),
            options: Vec::new(),
        }
    }

    /// Prepend `prefix` to the variable name. Skipped tags are unchanged.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        if !self.is_skip() {
            self.name.insert_str(0, prefix);
        }
        self
    }

    /// Variable name to read.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Option tokens, in annotation order.
    pub fn options(&self) -> &[TagOption] {
        &self.options
    }

    /// Whether the annotation carries `option`.
    pub fn has_option(&self, option: TagOption) -> bool {
        self.options.contains(&option)
    }

    /// Whether the field is marked with the `-` name.
    pub fn is_skip(&self) -> bool {
        self.name == SKIP
    }
}

impl FromStr for Tag {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for option in &self.options {
            write!(f, ",{}", option)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_and_option() {
        let tag = Tag::parse("test,int").unwrap();
        assert_eq!(tag.name(), "test");
        assert_eq!(tag.options(), &[TagOption::Int]);
    }

    #[test]
    fn test_parse_name_only() {
        let tag = Tag::parse("test2").unwrap();
        assert_eq!(tag.name(), "test2");
        assert!(tag.options().is_empty());
    }

    #[test]
    fn test_parse_multiple_options() {
        let tag = Tag::parse("KEY,string,b64").unwrap();
        assert_eq!(tag.options(), &[TagOption::String, TagOption::Base64]);
        assert!(tag.has_option(TagOption::Base64));
        assert!(!tag.has_option(TagOption::Bool));
    }

    #[test]
    fn test_parse_unknown_option() {
        let result = Tag::parse("KEY,base64");
        match result {
            Err(EnvError::InvalidTag { tag, message }) => {
                assert_eq!(tag, "KEY,base64");
                assert!(message.contains("base64"));
            }
            other => panic!("Expected InvalidTag, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_name() {
        assert!(matches!(Tag::parse(""), Err(EnvError::InvalidTag { .. })));
        assert!(matches!(Tag::parse(",b64"), Err(EnvError::InvalidTag { .. })));
    }

    #[test]
    fn test_parse_trailing_comma_is_rejected() {
        assert!(matches!(Tag::parse("KEY,"), Err(EnvError::InvalidTag { .. })));
    }

    #[test]
    fn test_skip() {
        assert!(Tag::parse("-").unwrap().is_skip());
        assert!(!Tag::parse("KEY").unwrap().is_skip());
    }

    #[test]
    fn test_from_ident() {
        let tag = Tag::from_ident("database_url");
        assert_eq!(tag.name(), "DATABASE_URL");
        assert!(tag.options().is_empty());
    }

    #[test]
    fn test_with_prefix() {
        let tag = Tag::parse("PORT,int").unwrap().with_prefix("APP_");
        assert_eq!(tag.name(), "APP_PORT");

        let skipped = Tag::parse("-").unwrap().with_prefix("APP_");
        assert!(skipped.is_skip());
    }

    #[test]
    fn test_new_matches_parse() {
        let built = Tag::new("DATA", &[TagOption::String, TagOption::Base64]);
        assert_eq!(built, Tag::parse("DATA,string,b64").unwrap());

        // Names are taken as-is, commas included
        let commaed = Tag::new("A,PORT", &[]);
        assert_eq!(commaed.name(), "A,PORT");
        assert!(commaed.options().is_empty());
    }

    #[test]
    fn test_display() {
        let tag: Tag = "DATA,string,b64".parse().unwrap();
        assert_eq!(tag.to_string(), "DATA,string,b64");
    }
}
