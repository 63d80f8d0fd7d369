use crate::derive::Contract;
use crate::types::parse::delimited;

/// An RGBA color, written as `"r,g,b,a"`.
///
/// ```
/// use vc_codec::types::Color;
///
/// let color: Color = "255, 128, 0, 255".parse().unwrap();
/// assert_eq!(color, Color::rgb(255, 128, 0));
/// assert_eq!(color.to_string(), "255,128,0,255");
/// ```
#[derive(Contract, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[contract(opaque, default, type_path = "vc_codec::types::Color")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::BLACK
    }
}

delimited!(Color { r, g, b, a }: u8);
