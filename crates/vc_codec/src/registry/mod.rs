//! Type registry and handler tables.
//!
//! A [`TypeRegistry`] maps type tags to [`TypeInfo`](crate::info::TypeInfo)
//! and holds the encoder and decoder tables, keyed by [`TypeKey`]. The
//! [`Codec`](crate::Codec) owns one registry and fills the tables lazily as
//! strategy discovery runs.

// -----------------------------------------------------------------------------
// Modules

mod builtin;
mod handlers;
mod type_key;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use handlers::{DecodeFn, EncodeFn, HandlerTable, decode_fn, encode_fn};
pub use type_key::TypeKey;
pub use type_registry::TypeRegistry;
