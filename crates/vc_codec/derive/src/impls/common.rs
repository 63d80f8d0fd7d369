use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::LitStr;

use super::ContractMeta;
use crate::path;

/// `TypeKind::Opaque`.
pub(crate) fn opaque_kind(meta: &ContractMeta) -> TokenStream {
    let info_ = path::info_(&meta.vc_codec);
    quote! {
        #info_::TypeKind::Opaque
    }
}

pub(crate) fn impl_type_path(meta: &ContractMeta) -> TokenStream {
    let info_ = path::info_(&meta.vc_codec);
    let ident = meta.ident;
    let name = LitStr::new(&ident.to_string(), ident.span());

    let type_path = match &meta.attrs.type_path {
        Some(lit) => quote! { #lit },
        None => quote! { ::core::concat!(::core::module_path!(), "::", #name) },
    };

    quote! {
        impl #info_::TypePath for #ident {
            #[inline]
            fn type_path() -> &'static str {
                #type_path
            }

            #[inline]
            fn type_name() -> &'static str {
                #name
            }
        }
    }
}

pub(crate) fn impl_typed(meta: &ContractMeta, kind: &TokenStream) -> TokenStream {
    let info_ = path::info_(&meta.vc_codec);
    let cell_ = path::non_generic_info_cell_(&meta.vc_codec);
    let ident = meta.ident;

    let with_default = meta.attrs.default.map(|span| {
        quote_spanned! { span =>
            .with_default::<Self>()
        }
    });
    let with_native = meta.attrs.native.map(|span| {
        quote_spanned! { span =>
            .with_native::<Self>()
        }
    });

    quote! {
        impl #info_::Typed for #ident {
            fn type_info() -> &'static #info_::TypeInfo {
                static CELL: #cell_ = #cell_::new();
                CELL.get_or_init(|| {
                    #info_::TypeInfo::new::<Self>(#kind)
                        #with_default
                        #with_native
                })
            }
        }
    }
}

pub(crate) fn impl_value(meta: &ContractMeta, value_ref: Option<TokenStream>) -> TokenStream {
    let info_ = path::info_(&meta.vc_codec);
    let value_ = path::value_(&meta.vc_codec);
    let box_ = path::box_(&meta.vc_codec);
    let ident = meta.ident;

    quote! {
        impl #value_ for #ident {
            #[inline]
            fn value_info(&self) -> &'static #info_::TypeInfo {
                <Self as #info_::Typed>::type_info()
            }

            #[inline]
            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            #[inline]
            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            #[inline]
            fn into_any(self: #box_<Self>) -> #box_<dyn ::core::any::Any> {
                self
            }

            #value_ref
        }
    }
}

pub(crate) fn impl_from_value(meta: &ContractMeta) -> TokenStream {
    let value_ = path::value_(&meta.vc_codec);
    let from_value_ = path::from_value_(&meta.vc_codec);
    let box_ = path::box_(&meta.vc_codec);
    let result_ = path::result_();
    let ident = meta.ident;

    quote! {
        impl #from_value_ for #ident {
            #[inline]
            fn from_value(value: #box_<dyn #value_>) -> #result_<Self, #box_<dyn #value_>> {
                value.take::<Self>()
            }
        }
    }
}
