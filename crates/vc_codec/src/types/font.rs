use alloc::string::String;

use vc_node::Node;

use crate::CodecResult;
use crate::derive::Contract;
use crate::engine::{Decoder, Encoder};
use crate::impls::impl_opaque;
use crate::info::NodeCodec;

bitflags::bitflags! {
    /// Style flags of a font.
    ///
    /// Written in the `bitflags` text form, such as `"BOLD | ITALIC"`. No
    /// flags is written as an empty node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FontStyle: u8 {
        const BOLD = 1;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const STRIKEOUT = 1 << 3;
    }
}

impl Default for FontStyle {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl_opaque!(FontStyle, "vc_codec::types::FontStyle", "FontStyle");

/// A font selection, written as the children `family`, `size` and `style`.
#[derive(Contract, Debug, Clone, PartialEq, Default)]
#[contract(opaque, default, native, type_path = "vc_codec::types::FontDescriptor")]
pub struct FontDescriptor {
    pub family: String,
    pub size: f32,
    pub style: FontStyle,
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            style: FontStyle::empty(),
        }
    }

    #[inline]
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }
}

impl NodeCodec for FontDescriptor {
    fn write_node(&self, node: &mut Node, encoder: &mut Encoder<'_>) -> CodecResult<()> {
        encoder.encode_child(node, "family", &self.family)?;
        encoder.encode_child(node, "size", &self.size)?;
        encoder.encode_child(node, "style", &self.style)
    }

    fn read_node(node: &Node, decoder: &mut Decoder<'_>) -> CodecResult<Self> {
        Ok(Self {
            family: decoder.decode_child(node, "family")?,
            size: decoder.decode_child(node, "size")?,
            style: decoder.decode_child(node, "style")?,
        })
    }
}
