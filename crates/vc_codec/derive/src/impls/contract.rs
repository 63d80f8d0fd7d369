use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{FieldsNamed, LitStr};

use super::ContractMeta;
use crate::attributes::FieldAttributes;
use crate::path;

/// `TypeKind::Contract` with one member per named field.
pub(crate) fn contract_kind(meta: &ContractMeta, fields: &FieldsNamed) -> syn::Result<TokenStream> {
    let info_ = path::info_(&meta.vc_codec);
    let value_ = path::value_(&meta.vc_codec);
    let from_value_ = path::from_value_(&meta.vc_codec);
    let option_ = path::option_();
    let result_ = path::result_();

    let mut names = BTreeSet::new();
    let mut members = Vec::with_capacity(fields.named.len());

    for field in &fields.named {
        let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
        if attrs.skip.is_some() {
            continue;
        }

        let Some(ident) = &field.ident else {
            continue;
        };
        let name = attrs
            .rename
            .unwrap_or_else(|| LitStr::new(&ident.unraw().to_string(), ident.span()));
        if !names.insert(name.value()) {
            return Err(syn::Error::new(
                name.span(),
                format!("duplicate member name `{}`", name.value()),
            ));
        }

        let ty = &field.ty;
        members.push(quote! {
            #info_::MemberInfo::new::<#ty>(
                #name,
                |owner| {
                    let owner = owner.downcast_ref::<Self>()?;
                    #option_::Some(&owner.#ident as &dyn #value_)
                },
                |owner, value| {
                    let #option_::Some(owner) = owner.downcast_mut::<Self>() else {
                        return #result_::Err(value);
                    };
                    owner.#ident = <#ty as #from_value_>::from_value(value)?;
                    #result_::Ok(())
                },
            )
        });
    }

    if members.is_empty() {
        return Ok(empty_contract_kind(meta));
    }

    Ok(quote! {
        #info_::TypeKind::Contract(#info_::ContractInfo::new([
            #(#members),*
        ]))
    })
}

/// `TypeKind::Contract` without members, for unit structs.
pub(crate) fn empty_contract_kind(meta: &ContractMeta) -> TokenStream {
    let info_ = path::info_(&meta.vc_codec);
    quote! {
        #info_::TypeKind::Contract(#info_::ContractInfo::new(::core::iter::empty()))
    }
}
