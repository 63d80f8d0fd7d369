use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DataEnum, Fields, Ident, LitStr};

use super::ContractMeta;
use crate::attributes::VariantAttributes;
use crate::path;

pub(crate) struct Variant<'a> {
    pub ident: &'a Ident,
    pub name: LitStr,
}

/// Validates a fieldless enum and collects its serialized names.
pub(crate) fn parse_variants<'a>(ident: &Ident, data: &'a DataEnum) -> syn::Result<Vec<Variant<'a>>> {
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            ident,
            "`Contract` cannot be derived for enums without variants",
        ));
    }

    let mut names = BTreeSet::new();
    let mut variants = Vec::with_capacity(data.variants.len());

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                &variant.fields,
                "`Contract` enums must be fieldless, mark the enum `#[contract(opaque)]` or `#[contract(native)]`",
            ));
        }

        let attrs = VariantAttributes::parse_attrs(&variant.attrs)?;
        let name = attrs.rename.unwrap_or_else(|| {
            LitStr::new(&variant.ident.unraw().to_string(), variant.ident.span())
        });
        if !names.insert(name.value()) {
            return Err(syn::Error::new(
                name.span(),
                format!("duplicate variant name `{}`", name.value()),
            ));
        }

        variants.push(Variant {
            ident: &variant.ident,
            name,
        });
    }

    Ok(variants)
}

/// `TypeKind::Enum` parsing the variant names.
pub(crate) fn enum_kind(meta: &ContractMeta, variants: &[Variant]) -> TokenStream {
    let info_ = path::info_(&meta.vc_codec);
    let value_ = path::value_(&meta.vc_codec);
    let box_ = path::box_(&meta.vc_codec);
    let option_ = path::option_();

    let names = variants.iter().map(|variant| &variant.name);
    let arms = variants.iter().map(|Variant { ident, name }| {
        quote! {
            #name => #option_::Some(#box_::new(Self::#ident) as #box_<dyn #value_>),
        }
    });

    quote! {
        #info_::TypeKind::Enum(#info_::EnumInfo::new(
            &[#(#names),*],
            |name| match name {
                #(#arms)*
                _ => #option_::None,
            },
        ))
    }
}

/// `Value::value_ref` reporting the current variant name.
pub(crate) fn enum_value_ref(meta: &ContractMeta, variants: &[Variant]) -> TokenStream {
    let value_ref_ = path::value_ref_(&meta.vc_codec);
    let arms = variants.iter().map(|Variant { ident, name }| {
        quote! {
            Self::#ident => #name,
        }
    });

    quote! {
        #[inline]
        fn value_ref(&self) -> #value_ref_<'_> {
            #value_ref_::Enum(match self {
                #(#arms)*
            })
        }
    }
}
