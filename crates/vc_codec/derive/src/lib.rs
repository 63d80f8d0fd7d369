//! See [`Contract`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static CONTRACT_ATTRIBUTE_NAME: &str = "contract";

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Data Contract Derivation
///
/// `#[derive(Contract)]` implements `TypePath`, `Typed`, `Value` and
/// `FromValue`, which is everything the codec needs to encode and decode a
/// type.
///
/// - A struct with named fields becomes a data contract. Every field is a
///   member, written as a child node named after the field.
/// - A fieldless enum is written as its variant name.
/// - A unit struct is a contract without members.
///
/// Generic types, unions and enums with fields are rejected.
///
/// ## Type Attributes
///
/// ```rust, ignore
/// #[derive(Contract)]
/// #[contract(type_path = "shapes::Circle", default, auto_register)]
/// struct Circle {
///     radius: f32,
/// }
/// ```
///
/// - `type_path = "..."`: the type path, which is also the type tag. The
///   default is `module_path!()` followed by the type name.
/// - `default`: the type implements `Default`. Needed to decode a contract
///   without a factory.
/// - `native`: the type implements `NodeCodec`, which replaces member
///   enumeration.
/// - `opaque`: the type is not inspected. Handlers must be registered on the
///   codec or provided with `native`. Required for tuple structs.
/// - `auto_register`: submit the type for `Codec::auto_register`. A no-op
///   when the `auto_register` feature is disabled.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(Contract, Default)]
/// #[contract(default)]
/// struct Label {
///     #[contract(rename = "text")]
///     caption: String,
///     #[contract(skip)]
///     cache: Option<Vec<u8>>,
/// }
/// ```
///
/// - `rename = "..."`: the serialized name, also the child node name.
/// - `skip`: the field is not a member and keeps its default value when
///   decoding.
///
/// Serialized names must be unique within a type.
///
/// ## Variant Attributes
///
/// - `rename = "..."`: the serialized variant name.
#[proc_macro_derive(Contract, attributes(contract))]
pub fn derive_contract(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::impl_contract(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
