//! Derive macro implementation for envtag

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;

use attrs::FieldAttrs;

/// `EnvTag` derive macro
///
/// Implements `envtag::EnvTag` by decoding every field in declaration order.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[env(prefix = "PREFIX_")]`: Add prefix to all variable names
///
/// **Field-level**:
/// - `#[env("NAME")]`: Read the field from `NAME`
/// - `#[env("NAME,b64")]`: Base64-decode the value into a `Vec<u8>` field
/// - `#[env("NAME,int64")]`: Type hints (`string`, `int64`, `uint64`, `int`, `bool`) are accepted
/// - `#[env("-")]`: Never read the field
///
/// Fields without an attribute are read from their identifier in upper case.
///
/// # Example
///
/// See the `envtag` crate documentation for usage examples.
#[proc_macro_derive(EnvTag, attributes(env))]
pub fn derive_envtag(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let prefix = attrs::parse_prefix(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "EnvTag only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "EnvTag only supports structs",
            ));
        }
    };

    // Generate decoding code for each field, in declaration order
    let field_decoders = fields
        .iter()
        .map(|field| {
            let attrs = FieldAttrs::from_field(field)?;
            let field_name = field
                .ident
                .as_ref()
                .ok_or_else(|| syn::Error::new_spanned(field, "EnvTag requires named fields"))?;
            let ident = field_name.unraw().to_string();

            // Skipped fields are never decoded, so their type needs no DecodeValue impl
            if attrs.is_skip() {
                return Ok(quote! {
                    ::envtag::de::skip_field(#ident);
                });
            }

            // Tag is resolved here, nothing is parsed when decoding
            let key = attrs.key(&prefix);
            let options = attrs
                .options
                .iter()
                .map(|variant| quote::format_ident!("{}", variant));

            Ok(quote! {
                {
                    let __tag = ::envtag::Tag::new(#key, &[#(::envtag::TagOption::#options),*]);
                    ::envtag::de::decode_field(
                        &mut self.#field_name,
                        &::envtag::Field::new(#ident, &__tag),
                        __table,
                    )?;
                }
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        impl #impl_generics ::envtag::EnvTag for #struct_name #ty_generics #where_clause {
            fn decode_table(
                &mut self,
                __table: &::envtag::LookupTable,
            ) -> ::core::result::Result<(), ::envtag::EnvError> {
                #(#field_decoders)*
                ::core::result::Result::Ok(())
            }
        }
    })
}
