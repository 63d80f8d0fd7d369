use alloc::boxed::Box;
use core::fmt;

use vc_node::Node;

use super::Typed;
use crate::engine::{Decoder, Encoder};
use crate::{CodecError, CodecResult, Value};

/// A type that reads and writes its own node representation.
///
/// This is the first strategy discovery tries. Implementors mark the type
/// with `#[contract(native)]` so the hooks end up in its
/// [`TypeInfo`](super::TypeInfo).
///
/// # Examples
///
/// ```
/// use vc_codec::{Codec, CodecResult, Decoder, Encoder, Node};
/// use vc_codec::derive::Contract;
/// use vc_codec::info::NodeCodec;
///
/// #[derive(Contract, Debug, PartialEq)]
/// #[contract(opaque, native)]
/// struct Celsius(f32);
///
/// impl NodeCodec for Celsius {
///     fn write_node(&self, node: &mut Node, _: &mut Encoder<'_>) -> CodecResult<()> {
///         node.set_value(format!("{}C", self.0));
///         Ok(())
///     }
///
///     fn read_node(node: &Node, _: &mut Decoder<'_>) -> CodecResult<Self> {
///         let text = node.value().unwrap_or_default().trim_end_matches('C');
///         text.parse()
///             .map(Celsius)
///             .map_err(|err| vc_codec::CodecError::malformed(node, err))
///     }
/// }
///
/// let codec = Codec::new();
/// let node = codec.encode(&Celsius(21.5), "temp", false).unwrap();
/// assert_eq!(node.value(), Some("21.5C"));
/// assert_eq!(codec.decode::<Celsius>(&node, None).unwrap(), Celsius(21.5));
/// ```
pub trait NodeCodec: Sized {
    /// Writes `self` into `node`, which arrives named and otherwise empty.
    fn write_node(&self, node: &mut Node, encoder: &mut Encoder<'_>) -> CodecResult<()>;

    /// Builds an instance from a non-empty `node`.
    fn read_node(node: &Node, decoder: &mut Decoder<'_>) -> CodecResult<Self>;
}

/// Type-erased [`NodeCodec`] functions.
#[derive(Clone, Copy)]
pub struct NativeHooks {
    write: fn(&dyn Value, &mut Node, &mut Encoder<'_>) -> CodecResult<()>,
    read: fn(&Node, &mut Decoder<'_>) -> CodecResult<Box<dyn Value>>,
}

impl NativeHooks {
    pub fn of<T: NodeCodec + Typed + Value>() -> Self {
        Self {
            write: |value, node, encoder| match value.downcast_ref::<T>() {
                Some(value) => value.write_node(node, encoder),
                None => Err(CodecError::mismatch(T::type_path(), value.type_path())),
            },
            read: |node, decoder| {
                let value = T::read_node(node, decoder)?;
                Ok(Box::new(value) as Box<dyn Value>)
            },
        }
    }

    #[inline]
    pub fn write(&self, value: &dyn Value, node: &mut Node, encoder: &mut Encoder<'_>) -> CodecResult<()> {
        (self.write)(value, node, encoder)
    }

    #[inline]
    pub fn read(&self, node: &Node, decoder: &mut Decoder<'_>) -> CodecResult<Box<dyn Value>> {
        (self.read)(node, decoder)
    }
}

impl fmt::Debug for NativeHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NativeHooks")
    }
}
