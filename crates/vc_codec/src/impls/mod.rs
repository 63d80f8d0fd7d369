//! [`Typed`](crate::info::Typed) and [`Value`](crate::Value) for built-in and
//! foreign types, plus the static cells used to store their type
//! information.

use alloc::string::String;

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod dynamic;
mod node;
mod option;
mod primitives;
mod sequence;

#[cfg(feature = "chrono")]
mod chrono;
#[cfg(feature = "uuid")]
mod uuid;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericInfoCell, GenericPathCell, NonGenericInfoCell};

pub(crate) use primitives::impl_opaque;

// -----------------------------------------------------------------------------
// Helpers

/// Concatenates path fragments into a new `String`.
///
/// Used to build the paths of generic types, such as `alloc::vec::Vec<i32>`.
pub fn concat(parts: &[&str]) -> String {
    let len = parts.iter().map(|part| part.len()).sum();
    let mut path = String::with_capacity(len);
    parts.iter().for_each(|part| path.push_str(part));
    path
}
