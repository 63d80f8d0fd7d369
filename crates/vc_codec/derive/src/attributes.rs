//! Parsing of `#[contract(...)]` attributes.

use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use crate::CONTRACT_ATTRIBUTE_NAME;

/// Attributes on the type.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub type_path: Option<LitStr>,
    pub default: Option<Span>,
    pub native: Option<Span>,
    pub opaque: Option<Span>,
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in contract_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_path") {
                    let lit = non_empty_str(&meta)?;
                    set_once(&mut this.type_path, lit, &meta)
                } else if meta.path.is_ident("default") {
                    set_flag(&mut this.default, &meta)
                } else if meta.path.is_ident("native") {
                    set_flag(&mut this.native, &meta)
                } else if meta.path.is_ident("opaque") {
                    set_flag(&mut this.opaque, &meta)
                } else if meta.path.is_ident("auto_register") {
                    set_flag(&mut this.auto_register, &meta)
                } else {
                    Err(meta.error(
                        "unknown type attribute, expected `type_path`, `default`, `native`, `opaque` or `auto_register`",
                    ))
                }
            })?;
        }

        Ok(this)
    }
}

/// Attributes on a named field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub rename: Option<LitStr>,
    pub skip: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in contract_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit = non_empty_str(&meta)?;
                    set_once(&mut this.rename, lit, &meta)
                } else if meta.path.is_ident("skip") {
                    set_flag(&mut this.skip, &meta)
                } else {
                    Err(meta.error("unknown field attribute, expected `rename` or `skip`"))
                }
            })?;
        }

        Ok(this)
    }
}

/// Attributes on an enum variant.
#[derive(Default)]
pub(crate) struct VariantAttributes {
    pub rename: Option<LitStr>,
}

impl VariantAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in contract_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit = non_empty_str(&meta)?;
                    set_once(&mut this.rename, lit, &meta)
                } else {
                    Err(meta.error("unknown variant attribute, expected `rename`"))
                }
            })?;
        }

        Ok(this)
    }
}

fn contract_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(CONTRACT_ATTRIBUTE_NAME))
}

fn non_empty_str(meta: &ParseNestedMeta) -> syn::Result<LitStr> {
    let lit: LitStr = meta.value()?.parse()?;
    if lit.value().is_empty() {
        return Err(syn::Error::new(lit.span(), "the name must not be empty"));
    }
    Ok(lit)
}

fn set_once<T>(slot: &mut Option<T>, value: T, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate attribute"));
    }
    *slot = Some(value);
    Ok(())
}

#[inline]
fn set_flag(slot: &mut Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    set_once(slot, meta.path.span(), meta)
}
