//! Value types with built-in handlers.
//!
//! The small geometric types are written as comma-separated text, such as
//! `"1.5,2"` for a [`Point`]. [`Matrix4x4`] and [`FontDescriptor`] are
//! written as child nodes.

// -----------------------------------------------------------------------------
// Modules

mod color;
mod font;
mod geometry;
mod matrix;
mod parse;

// -----------------------------------------------------------------------------
// Exports

pub use color::Color;
pub use font::{FontDescriptor, FontStyle};
pub use geometry::{Point, Rect, Size, Vector2, Vector4};
pub use matrix::Matrix4x4;
pub use parse::ParseValueError;
