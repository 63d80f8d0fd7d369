//! Paths into `vc_codec` used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the access path of the `vc_codec` crate as seen by the caller.
///
/// 1. For crates that depend on `vc_codec`, `::vc_codec` is returned.
/// 2. For crates that depend on `vc_docbind`, `::vc_docbind::codec` is returned.
/// 3. Otherwise `::vc_codec` is returned, which may be incorrect.
///
/// This reads the caller's `Cargo.toml`, so it is called once per derive.
pub(crate) fn vc_codec() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_codec"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn info_(vc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_codec_path::info
    }
}

#[inline(always)]
pub(crate) fn value_(vc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_codec_path::Value
    }
}

#[inline(always)]
pub(crate) fn from_value_(vc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_codec_path::FromValue
    }
}

#[inline(always)]
pub(crate) fn value_ref_(vc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_codec_path::ValueRef
    }
}

#[inline(always)]
pub(crate) fn non_generic_info_cell_(vc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_codec_path::impls::NonGenericInfoCell
    }
}

#[inline(always)]
pub(crate) fn box_(vc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_codec_path::__macro_exports::Box
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(vc_codec_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_codec_path::__macro_exports::auto_register
    }
}

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote! {
        ::core::option::Option
    }
}

#[inline(always)]
pub(crate) fn result_() -> TokenStream {
    quote! {
        ::core::result::Result
    }
}
