use alloc::string::{String, ToString};

use vc_node::Node;

use crate::info::{SequenceInfo, TypeInfo, TypeKind, Typed};
use crate::{Codec, CodecError, CodecResult, Value, ValueRef};

/// Writes values into nodes.
///
/// Handlers and [`NodeCodec`](crate::info::NodeCodec) implementations
/// receive the encoder so they can write nested values through it.
pub struct Encoder<'a> {
    codec: &'a Codec,
    depth: usize,
}

impl<'a> Encoder<'a> {
    #[inline]
    pub(crate) const fn new(codec: &'a Codec) -> Self {
        Self { codec, depth: 0 }
    }

    #[inline]
    pub const fn codec(&self) -> &'a Codec {
        self.codec
    }

    /// Number of values currently being encoded, outermost included.
    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Writes `value` into `node`.
    ///
    /// A null value leaves the node empty and untagged. With
    /// `emit_type_tag` set, the runtime type path is written to the type tag
    /// attribute and the type becomes resolvable by that tag.
    pub fn encode(
        &mut self,
        value: &dyn Value,
        node: &mut Node,
        emit_type_tag: bool,
    ) -> CodecResult<()> {
        let limit = self.codec.config().max_depth();
        if self.depth >= limit {
            return Err(CodecError::DepthExceeded { limit });
        }

        self.depth += 1;
        let result = self.encode_value(value, node, emit_type_tag);
        self.depth -= 1;
        result
    }

    /// Encodes `value` into a new child of `parent` called `name`.
    ///
    /// The child is tagged if `T` is an untyped slot, like
    /// `Box<dyn Value>`.
    pub fn encode_child<T: Typed + Value>(
        &mut self,
        parent: &mut Node,
        name: &str,
        value: &T,
    ) -> CodecResult<()> {
        let mut child = Node::try_new(name)?;
        self.encode_declared(value, &mut child, T::type_info())?;
        parent.push_child(child);
        Ok(())
    }

    /// Writes `value`, held in a slot declared as `declared`.
    ///
    /// Untyped slots are tagged. A null in a slot that is untyped but not
    /// nullable is rejected, since it would decode as a missing value.
    pub(crate) fn encode_declared(
        &mut self,
        value: &dyn Value,
        node: &mut Node,
        declared: &'static TypeInfo,
    ) -> CodecResult<()> {
        if matches!(declared.kind(), TypeKind::Dynamic) && is_null(value) {
            return Err(CodecError::NullInDynamicSlot {
                type_path: value.type_path(),
            });
        }
        self.encode(value, node, declared.is_dynamic())
    }

    fn encode_value(
        &mut self,
        mut value: &dyn Value,
        node: &mut Node,
        emit_type_tag: bool,
    ) -> CodecResult<()> {
        while let ValueRef::Nullable(inner) = value.value_ref() {
            match inner {
                Some(inner) => value = inner,
                None => return Ok(()),
            }
        }

        let info = value.value_info();
        if emit_type_tag {
            node.set_attribute(self.codec.config().type_tag(), info.type_path());
            self.codec.register_info(info);
        }

        if let ValueRef::Sequence(items) = value.value_ref() {
            let item_info = info.as_sequence().map(SequenceInfo::item_info);
            let item_name = item_name(node.name(), self.codec.config().item_name());

            for index in 0..items.len() {
                let Some(item) = items.get(index) else {
                    break;
                };
                let mut child = Node::try_new(item_name.as_str())?;
                let result = match item_info {
                    Some(item_info) => self.encode_declared(item, &mut child, item_info),
                    None => self.encode(item, &mut child, false),
                };
                result.map_err(|err| err.in_element(info.type_path(), index))?;
                node.push_child(child);
            }
            return Ok(());
        }

        let encoder = self.codec.encoder_for(info)?;
        encoder(value, node, self)
    }
}

/// Returns `true` if `value` is null, looking through nested nullables.
fn is_null(mut value: &dyn Value) -> bool {
    loop {
        match value.value_ref() {
            ValueRef::Nullable(Some(inner)) => value = inner,
            ValueRef::Nullable(None) => return true,
            _ => return false,
        }
    }
}

/// Element name for a sequence node: the container name without one
/// trailing `s`, or `placeholder` if nothing would remain.
fn item_name(container: &str, placeholder: &str) -> String {
    match container.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => placeholder.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::item_name;

    #[test]
    fn item_names() {
        assert_eq!(item_name("nums", "item"), "num");
        assert_eq!(item_name("boss", "item"), "bos");
        assert_eq!(item_name("s", "item"), "item");
        assert_eq!(item_name("data", "item"), "item");
        assert_eq!(item_name("values", "entry"), "value");
    }
}
