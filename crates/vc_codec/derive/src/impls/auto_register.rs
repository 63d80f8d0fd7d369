use proc_macro2::TokenStream;

use super::ContractMeta;

/// Submits the type to the `inventory` collection.
#[cfg(feature = "auto_register")]
pub(crate) fn impl_auto_register(meta: &ContractMeta) -> TokenStream {
    use quote::quote_spanned;

    let Some(span) = meta.attrs.auto_register else {
        return TokenStream::new();
    };

    let info_ = crate::path::info_(&meta.vc_codec);
    let auto_register_ = crate::path::auto_register_(&meta.vc_codec);
    let ident = meta.ident;

    quote_spanned! { span =>
        #auto_register_::inventory::submit! {
            #auto_register_::__AutoRegisterFunc(<#ident as #info_::Typed>::type_info)
        }
    }
}

#[cfg(not(feature = "auto_register"))]
pub(crate) fn impl_auto_register(_: &ContractMeta) -> TokenStream {
    TokenStream::new()
}
