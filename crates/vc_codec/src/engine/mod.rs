//! The encode and decode engines.
//!
//! An [`Encoder`] or [`Decoder`] lives for one top-level call on a
//! [`Codec`](crate::Codec). Both walk the value or node tree recursively,
//! handle the structural kinds (nullable, sequence, untyped) themselves and
//! hand everything else to a handler from the registry. A missing handler
//! triggers strategy discovery.

// -----------------------------------------------------------------------------
// Modules

mod decoder;
mod discovery;
mod encoder;

// -----------------------------------------------------------------------------
// Exports

pub use decoder::Decoder;
pub use encoder::Encoder;

pub(crate) use discovery::{discover_decoder, discover_encoder};
