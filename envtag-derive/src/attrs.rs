//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates the tag text of struct fields and the
//! struct-level prefix during macro expansion.

use syn::ext::IdentExt;
use syn::{Attribute, Field, LitStr};

/// Name that marks a field as skipped.
pub const SKIP: &str = "-";

/// Map an option token to its `envtag::TagOption` variant.
fn option_variant(token: &str) -> Option<&'static str> {
    match token {
        "string" => Some("String"),
        "int64" => Some("Int64"),
        "uint64" => Some("Uint64"),
        "int" => Some("Int"),
        "bool" => Some("Bool"),
        "b64" => Some("Base64"),
        _ => None,
    }
}

/// Parsed `#[env("name,options")]` attribute of a struct field.
#[derive(Debug)]
pub struct FieldAttrs {
    /// Variable name, or `-` for a skipped field.
    ///
    /// Fields without an attribute use their identifier in upper case.
    pub name: String,

    /// `TagOption` variant names, in declaration order.
    pub options: Vec<&'static str>,
}

impl FieldAttrs {
    /// Extract and validate the `#[env(...)]` attribute of a struct field.
    ///
    /// Unknown options, an empty name and repeated attributes are rejected.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut tag: Option<LitStr> = None;

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }
            if tag.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate env attribute"));
            }
            tag = Some(attr.parse_args::<LitStr>()?);
        }

        match tag {
            Some(lit) => parse_tag(&lit.value()).map_err(|message| syn::Error::new(lit.span(), message)),
            None => {
                let ident = field
                    .ident
                    .as_ref()
                    .ok_or_else(|| syn::Error::new_spanned(field, "EnvTag requires named fields"))?;
                Ok(Self {
                    name: ident.unraw().to_string().to_uppercase(),
                    options: Vec::new(),
                })
            }
        }
    }

    /// Whether the field is tagged `-`.
    pub fn is_skip(&self) -> bool {
        self.name == SKIP
    }

    /// Variable name with `prefix` applied. Skipped fields keep `-`.
    pub fn key(&self, prefix: &str) -> String {
        if self.is_skip() {
            self.name.clone()
        } else {
            format!("{}{}", prefix, self.name)
        }
    }
}

/// Split `name[,option...]` on its first comma and validate the options.
fn parse_tag(tag: &str) -> Result<FieldAttrs, String> {
    let (name, rest) = match tag.split_once(',') {
        Some((name, rest)) => (name, Some(rest)),
        None => (tag, None),
    };

    if name.is_empty() {
        return Err("env tag must start with a variable name".to_string());
    }

    let options = rest
        .into_iter()
        .flat_map(|rest| rest.split(','))
        .map(|token| {
            option_variant(token).ok_or_else(|| {
                format!(
                    "unsupported env option '{}', expected one of: string, int64, uint64, int, bool, b64",
                    token
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FieldAttrs {
        name: name.to_string(),
        options,
    })
}

/// Parse the struct-level `#[env(prefix = "...")]` attribute.
pub fn parse_prefix(attrs: &[Attribute]) -> syn::Result<String> {
    let mut prefix = String::new();

    for attr in attrs {
        if !attr.path().is_ident("env") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("prefix") {
                let value = meta.value()?;
                let lit: LitStr = value.parse()?;
                prefix = lit.value();
                return Ok(());
            }

            Err(meta.error("unsupported struct-level env attribute"))
        })?;
    }

    Ok(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_name_and_option() {
        let field: Field = parse_quote! {
            #[env("test,int")]
            pub a: i64
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.name, "test");
        assert_eq!(attrs.options, vec!["Int"]);
    }

    #[test]
    fn test_parse_name_only() {
        let field: Field = parse_quote! {
            #[env("test2")]
            pub b: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.name, "test2");
        assert!(attrs.options.is_empty());
    }

    #[test]
    fn test_missing_attribute_uses_upper_case_ident() {
        let field: Field = parse_quote! {
            pub database_url: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.name, "DATABASE_URL");
        assert!(attrs.options.is_empty());
    }

    #[test]
    fn test_raw_ident() {
        let field: Field = parse_quote! {
            pub r#type: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.name, "TYPE");
    }

    #[test]
    fn test_skip() {
        let field: Field = parse_quote! {
            #[env("-")]
            pub ignored: Vec<String>
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert!(attrs.is_skip());
        assert_eq!(attrs.key("APP_"), "-");
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let field: Field = parse_quote! {
            #[env("DATA,base64")]
            pub data: Vec<u8>
        };

        let err = FieldAttrs::from_field(&field).unwrap_err();
        assert!(err.to_string().contains("base64"));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let field: Field = parse_quote! {
            #[env(",b64")]
            pub data: Vec<u8>
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_duplicate_attribute_is_rejected() {
        let field: Field = parse_quote! {
            #[env("A")]
            #[env("B")]
            pub a: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_key_with_prefix() {
        let field: Field = parse_quote! {
            #[env("DATA,string,b64")]
            pub data: Vec<u8>
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.key(""), "DATA");
        assert_eq!(attrs.key("APP_"), "APP_DATA");
        assert_eq!(attrs.key("A,"), "A,DATA");
        assert_eq!(attrs.options, vec!["String", "Base64"]);
    }

    #[test]
    fn test_parse_prefix() {
        let input: syn::DeriveInput = parse_quote! {
            #[env(prefix = "APP_")]
            struct Config {
                port: u64,
            }
        };

        assert_eq!(parse_prefix(&input.attrs).unwrap(), "APP_");
    }

    #[test]
    fn test_parse_prefix_unsupported_key() {
        let input: syn::DeriveInput = parse_quote! {
            #[env(suffix = "_APP")]
            struct Config {
                port: u64,
            }
        };

        assert!(parse_prefix(&input.attrs).is_err());
    }

    #[test]
    fn test_no_prefix() {
        let input: syn::DeriveInput = parse_quote! {
            struct Config {
                port: u64,
            }
        };

        assert_eq!(parse_prefix(&input.attrs).unwrap(), "");
    }
}
