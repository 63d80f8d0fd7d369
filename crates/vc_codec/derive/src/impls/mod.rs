//! Code generation for `#[derive(Contract)]`.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod common;
mod contract;
mod enumeration;

// -----------------------------------------------------------------------------
// Entry

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use crate::attributes::TypeAttributes;
use crate::path;

/// What the derive is generating for, after validation.
pub(crate) struct ContractMeta<'a> {
    pub ident: &'a syn::Ident,
    pub attrs: TypeAttributes,
    pub vc_codec: syn::Path,
}

pub(crate) fn impl_contract(ast: &DeriveInput) -> syn::Result<TokenStream> {
    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.generics,
            "`Contract` cannot be derived for generic types",
        ));
    }

    let meta = ContractMeta {
        ident: &ast.ident,
        attrs: TypeAttributes::parse_attrs(&ast.attrs)?,
        vc_codec: path::vc_codec(),
    };
    let treat_as_opaque = meta.attrs.opaque.is_some() || meta.attrs.native.is_some();

    let (kind, value_ref) = match &ast.data {
        Data::Struct(data) => match &data.fields {
            _ if treat_as_opaque => (common::opaque_kind(&meta), None),
            Fields::Named(fields) => (contract::contract_kind(&meta, fields)?, None),
            Fields::Unit => (contract::empty_contract_kind(&meta), None),
            Fields::Unnamed(fields) => {
                return Err(syn::Error::new_spanned(
                    fields,
                    "`Contract` needs named fields, mark tuple structs `#[contract(opaque)]` or `#[contract(native)]`",
                ));
            }
        },
        Data::Enum(_) if treat_as_opaque => (common::opaque_kind(&meta), None),
        Data::Enum(data) => {
            let variants = enumeration::parse_variants(&ast.ident, data)?;
            (
                enumeration::enum_kind(&meta, &variants),
                Some(enumeration::enum_value_ref(&meta, &variants)),
            )
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "`Contract` cannot be derived for unions",
            ));
        }
    };

    let type_path = common::impl_type_path(&meta);
    let typed = common::impl_typed(&meta, &kind);
    let value = common::impl_value(&meta, value_ref);
    let from_value = common::impl_from_value(&meta);
    let auto_register = auto_register::impl_auto_register(&meta);

    Ok(quote! {
        const _: () = {
            #type_path
            #typed
            #value
            #from_value
            #auto_register
        };
    })
}
