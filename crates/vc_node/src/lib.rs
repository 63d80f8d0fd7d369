#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

#[cfg(test)]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod node;
mod serde;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::NodeError;
pub use node::{Node, NodeKind};
