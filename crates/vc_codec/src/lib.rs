#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Derive output names `::vc_codec`, which must also resolve inside this crate.
extern crate self as vc_codec;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod codec;
mod config;
mod error;
mod value;

pub mod engine;
pub mod impls;
pub mod info;
pub mod registry;
pub mod types;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use codec::{Codec, Factory};
pub use config::CodecConfig;
pub use engine::{Decoder, Encoder};
pub use error::{CodecError, CodecResult, Direction};
pub use value::{FromValue, Sequence, Value, ValueRef};

pub use vc_codec_derive as derive;
pub use vc_node::Node;
