use alloc::format;
use alloc::string::String;

use vc_node::Node;

use crate::derive::Contract;
use crate::engine::{Decoder, Encoder};
use crate::info::NodeCodec;
use crate::types::parse::{parse_components, write_components};
use crate::{CodecError, CodecResult};

const ROWS: [&str; 4] = ["row1", "row2", "row3", "row4"];

/// A row-major 4x4 matrix.
///
/// Written as the four children `row1` to `row4`, each holding four
/// comma-separated components.
#[derive(Contract, Debug, Clone, Copy, PartialEq)]
#[contract(opaque, default, native, type_path = "vc_codec::types::Matrix4x4")]
pub struct Matrix4x4 {
    pub rows: [[f32; 4]; 4],
}

impl Matrix4x4 {
    pub const IDENTITY: Self = Self {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    #[inline]
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { rows }
    }
}

impl Default for Matrix4x4 {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl NodeCodec for Matrix4x4 {
    fn write_node(&self, node: &mut Node, _: &mut Encoder<'_>) -> CodecResult<()> {
        for (name, row) in ROWS.iter().zip(&self.rows) {
            let mut text = String::new();
            write_components(&mut text, row)
                .map_err(|_| CodecError::malformed(node, "cannot format matrix row"))?;
            node.push_child(Node::leaf(*name, text));
        }
        Ok(())
    }

    fn read_node(node: &Node, _: &mut Decoder<'_>) -> CodecResult<Self> {
        let mut rows = [[0.0; 4]; 4];
        for (name, row) in ROWS.iter().zip(&mut rows) {
            let child = node
                .child(name)
                .ok_or_else(|| CodecError::malformed(node, format!("missing child `{name}`")))?;
            let text = child.value().unwrap_or_default();
            *row = parse_components(text).map_err(|err| CodecError::malformed(child, err))?;
        }
        Ok(Self { rows })
    }
}
