use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use vc_node::Node;

use crate::info::{SequenceInfo, TypeInfo, TypeKind, Typed};
use crate::{Codec, CodecError, CodecResult, Factory, FromValue, Value};

/// Builds values from nodes.
///
/// Carries the optional factory of the current call. The factory is asked
/// first whenever a base instance is needed, for the top-level target and
/// for every nested value alike.
pub struct Decoder<'a> {
    codec: &'a Codec,
    factory: Option<&'a Factory<'a>>,
    depth: usize,
}

impl<'a> Decoder<'a> {
    #[inline]
    pub(crate) const fn new(codec: &'a Codec, factory: Option<&'a Factory<'a>>) -> Self {
        Self {
            codec,
            factory,
            depth: 0,
        }
    }

    #[inline]
    pub const fn codec(&self) -> &'a Codec {
        self.codec
    }

    #[inline]
    pub const fn factory(&self) -> Option<&'a Factory<'a>> {
        self.factory
    }

    /// Number of nodes currently being decoded, outermost included.
    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Decodes `node` as a value of type `target`.
    pub fn decode(&mut self, node: &Node, target: &'static TypeInfo) -> CodecResult<Box<dyn Value>> {
        self.enter()?;
        let result = self.decode_value(node, target);
        self.depth -= 1;
        result
    }

    /// Decodes `node` as a `T`.
    pub fn decode_as<T: Typed + FromValue>(&mut self, node: &Node) -> CodecResult<T> {
        let value = self.decode(node, T::type_info())?;
        T::from_value(value).map_err(|value| CodecError::mismatch(T::type_path(), value.type_path()))
    }

    /// Decodes the first child of `parent` called `name` as a `T`.
    pub fn decode_child<T: Typed + FromValue>(&mut self, parent: &Node, name: &str) -> CodecResult<T> {
        let child = parent
            .child(name)
            .ok_or_else(|| CodecError::malformed(parent, format!("missing child `{name}`")))?;
        self.decode_as(child)
    }

    /// Decodes a node into an untyped value, using its type tag.
    ///
    /// Returns `None` for an empty node without a tag.
    ///
    /// # Errors
    ///
    /// [`CodecError::UnresolvedTypeTag`] if the tag names an unknown type and
    /// [`CodecError::AmbiguousAny`] if the node has content but no tag.
    pub fn decode_any(&mut self, node: &Node) -> CodecResult<Option<Box<dyn Value>>> {
        self.enter()?;
        let result = self.resolve_any(node);
        self.depth -= 1;
        result
    }

    /// Creates a base instance of `target`.
    ///
    /// Asks the factory first, then falls back to the default constructor.
    pub fn default_instance(&self, target: &'static TypeInfo) -> CodecResult<Box<dyn Value>> {
        if let Some(factory) = self.factory
            && let Some(value) = factory(target)
        {
            if value.value_info().type_id() != target.type_id() {
                return Err(CodecError::mismatch(target.type_path(), value.type_path()));
            }
            return Ok(value);
        }

        target.default_value().ok_or(CodecError::NoDefault {
            type_path: target.type_path(),
        })
    }

    fn enter(&mut self) -> CodecResult<()> {
        let limit = self.codec.config().max_depth();
        if self.depth >= limit {
            return Err(CodecError::DepthExceeded { limit });
        }
        self.depth += 1;
        Ok(())
    }

    fn decode_value(&mut self, node: &Node, target: &'static TypeInfo) -> CodecResult<Box<dyn Value>> {
        match target.kind() {
            TypeKind::Nullable(nullable) => {
                if node.is_empty() && self.type_tag(node).is_none() {
                    return Ok(nullable.none());
                }
                let inner = self.decode_value(node, nullable.inner_info())?;
                nullable.some(inner)
            }
            TypeKind::Dynamic => match self.resolve_any(node)? {
                Some(value) => Ok(value),
                None => Err(CodecError::malformed(node, "expected a tagged value")),
            },
            TypeKind::Sequence(sequence) => self.decode_sequence(node, target, sequence),
            TypeKind::Text if node.is_empty() => Ok(Box::new(String::new()) as Box<dyn Value>),
            _ if node.is_empty() => self.default_instance(target),
            _ => {
                let decoder = self.codec.decoder_for(target, self.factory.is_some())?;
                decoder(node, target, self)
            }
        }
    }

    fn decode_sequence(
        &mut self,
        node: &Node,
        target: &'static TypeInfo,
        sequence: &SequenceInfo,
    ) -> CodecResult<Box<dyn Value>> {
        if node.has_value() {
            return Err(CodecError::malformed(node, "expected item children, found a value"));
        }

        let children = node.children();
        if let Some(len) = sequence.fixed_len()
            && len != children.len()
        {
            return Err(CodecError::malformed(
                node,
                format!("expected {len} items, found {}", children.len()),
            ));
        }

        let item_info = sequence.item_info();
        let items = children
            .iter()
            .enumerate()
            .map(|(index, child)| {
                self.decode(child, item_info)
                    .map_err(|err| err.in_element(target.type_path(), index))
            })
            .collect::<CodecResult<Vec<_>>>()?;

        sequence.build(items)
    }

    fn resolve_any(&mut self, node: &Node) -> CodecResult<Option<Box<dyn Value>>> {
        let Some(tag) = self.type_tag(node) else {
            if node.is_empty() {
                return Ok(None);
            }
            return Err(CodecError::AmbiguousAny {
                node: node.name().to_string(),
            });
        };

        let info = self
            .codec
            .resolve_type_tag(tag)
            .ok_or_else(|| CodecError::UnresolvedTypeTag { tag: tag.to_string() })?;
        if info.is_dynamic() {
            return Err(CodecError::malformed(
                node,
                format!("type tag `{tag}` does not name a concrete type"),
            ));
        }

        self.decode_value(node, info).map(Some)
    }

    #[inline]
    fn type_tag<'n>(&self, node: &'n Node) -> Option<&'n str> {
        node.attribute(self.codec.config().type_tag())
    }
}
