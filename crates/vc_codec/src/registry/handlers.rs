use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use vc_node::Node;
use vc_utils::TypeIdMap;

use super::TypeKey;
use crate::engine::{Decoder, Encoder};
use crate::info::TypeInfo;
use crate::{CodecResult, Value};

/// Writes a value into its node.
///
/// The node arrives named, tagged if requested, and otherwise empty.
pub type EncodeFn =
    Arc<dyn Fn(&dyn Value, &mut Node, &mut Encoder<'_>) -> CodecResult<()> + Send + Sync>;

/// Builds a value of the given type from a non-empty node.
pub type DecodeFn = Arc<
    dyn Fn(&Node, &'static TypeInfo, &mut Decoder<'_>) -> CodecResult<Box<dyn Value>> + Send + Sync,
>;

/// Wraps a closure as an [`EncodeFn`].
#[inline]
pub fn encode_fn<F>(f: F) -> EncodeFn
where
    F: Fn(&dyn Value, &mut Node, &mut Encoder<'_>) -> CodecResult<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wraps a closure as a [`DecodeFn`].
#[inline]
pub fn decode_fn<F>(f: F) -> DecodeFn
where
    F: Fn(&Node, &'static TypeInfo, &mut Decoder<'_>) -> CodecResult<Box<dyn Value>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// Handlers keyed by [`TypeKey`].
///
/// Inserting replaces any previous handler for the key.
#[derive(Clone)]
pub struct HandlerTable<F> {
    types: TypeIdMap<F>,
    enums: Option<F>,
}

impl<F> HandlerTable<F> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            types: TypeIdMap::new(),
            enums: None,
        }
    }

    pub fn get(&self, key: TypeKey) -> Option<&F> {
        match key {
            TypeKey::Type(type_id) => self.types.get(&type_id),
            TypeKey::Enum => self.enums.as_ref(),
        }
    }

    #[inline]
    pub fn contains(&self, key: TypeKey) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `handler`, returning the one it replaced.
    pub fn insert(&mut self, key: TypeKey, handler: F) -> Option<F> {
        match key {
            TypeKey::Type(type_id) => self.types.insert(type_id, handler),
            TypeKey::Enum => self.enums.replace(handler),
        }
    }

    pub fn remove(&mut self, key: TypeKey) -> Option<F> {
        match key {
            TypeKey::Type(type_id) => self.types.remove(&type_id),
            TypeKey::Enum => self.enums.take(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len() + usize::from(self.enums.is_some())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<F> Default for HandlerTable<F> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<F> fmt::Debug for HandlerTable<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("types", &self.types.len())
            .field("enums", &self.enums.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{HandlerTable, TypeKey};

    #[test]
    fn enum_slot_is_separate() {
        let mut table = HandlerTable::<u8>::new();
        assert!(table.is_empty());

        table.insert(TypeKey::exact::<i32>(), 1);
        table.insert(TypeKey::Enum, 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(TypeKey::exact::<i32>()), Some(&1));
        assert_eq!(table.get(TypeKey::Enum), Some(&2));
        assert!(!table.contains(TypeKey::exact::<u32>()));

        assert_eq!(table.insert(TypeKey::Enum, 3), Some(2));
        assert_eq!(table.remove(TypeKey::Enum), Some(3));
        assert_eq!(table.len(), 1);
    }
}
