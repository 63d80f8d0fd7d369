use core::any::TypeId;
use core::fmt;

use vc_utils::TypeIdMap;
use vc_utils::hash::{FixedHashState, HashMap};

use super::{DecodeFn, EncodeFn, HandlerTable, TypeKey};
use crate::info::{TypeInfo, TypeKind, Typed};

/// Known types and their handlers.
///
/// The registry indexes type information by [`TypeId`] and by type path, so
/// type tags can be resolved back into a [`TypeInfo`]. Registering a type
/// also registers the types it is built from: sequence items, nullable inner
/// types and contract members.
///
/// # Examples
///
/// ```
/// use vc_codec::registry::{TypeKey, TypeRegistry};
///
/// let mut registry = TypeRegistry::new();
/// assert!(registry.has_encoder(TypeKey::of::<i32>()));
///
/// registry.register::<Vec<Option<u8>>>();
/// let info = registry.resolve("core::option::Option<u8>").unwrap();
/// assert_eq!(info.type_name(), "Option<u8>");
/// ```
pub struct TypeRegistry {
    types: TypeIdMap<&'static TypeInfo>,
    paths: HashMap<&'static str, &'static TypeInfo>,
    encoders: HandlerTable<EncodeFn>,
    decoders: HandlerTable<DecodeFn>,
}

impl TypeRegistry {
    /// Creates a registry without any types or handlers.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            types: TypeIdMap::new(),
            paths: HashMap::with_hasher(FixedHashState),
            encoders: HandlerTable::new(),
            decoders: HandlerTable::new(),
        }
    }

    /// Creates a registry with the built-in types and handlers.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        super::builtin::install(&mut registry);
        registry
    }

    // -------------------------------------------------------------------------
    // Types

    /// Registers `T` and the types it is built from.
    #[inline]
    pub fn register<T: Typed>(&mut self) {
        self.register_info(T::type_info());
    }

    /// Registers `info` and the types it is built from.
    ///
    /// When another type already uses the same path, the first one keeps
    /// the path and a warning is logged.
    pub fn register_info(&mut self, info: &'static TypeInfo) {
        if self.types.contains(&info.type_id()) {
            return;
        }
        self.types.insert(info.type_id(), info);

        if self.paths.contains_key(info.type_path()) {
            log::warn!(
                "type path `{}` is shared by two types, only the first one resolves by tag",
                info.type_path(),
            );
        } else {
            self.paths.insert(info.type_path(), info);
        }

        match info.kind() {
            TypeKind::Sequence(sequence) => self.register_info(sequence.item_info()),
            TypeKind::Nullable(nullable) => self.register_info(nullable.inner_info()),
            TypeKind::Contract(contract) => {
                for member in contract.members() {
                    self.register_info(member.type_info());
                }
            }
            _ => {}
        }
    }

    /// Resolves a type tag.
    #[inline]
    pub fn resolve(&self, type_path: &str) -> Option<&'static TypeInfo> {
        self.paths.get(type_path).copied()
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.types.get(&type_id).copied()
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.types.contains(&type_id)
    }

    /// Number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates over the registered types in no particular order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static TypeInfo> + '_ {
        self.types.values().copied()
    }

    // -------------------------------------------------------------------------
    // Handlers

    /// Returns a handle to the encoder for `key`.
    #[inline]
    pub fn encoder(&self, key: TypeKey) -> Option<EncodeFn> {
        self.encoders.get(key).cloned()
    }

    /// Returns a handle to the decoder for `key`.
    #[inline]
    pub fn decoder(&self, key: TypeKey) -> Option<DecodeFn> {
        self.decoders.get(key).cloned()
    }

    /// Installs an encoder, returning the one it replaced.
    #[inline]
    pub fn insert_encoder(&mut self, key: TypeKey, encoder: EncodeFn) -> Option<EncodeFn> {
        self.encoders.insert(key, encoder)
    }

    /// Installs a decoder, returning the one it replaced.
    #[inline]
    pub fn insert_decoder(&mut self, key: TypeKey, decoder: DecodeFn) -> Option<DecodeFn> {
        self.decoders.insert(key, decoder)
    }

    #[inline]
    pub fn has_encoder(&self, key: TypeKey) -> bool {
        self.encoders.contains(key)
    }

    #[inline]
    pub fn has_decoder(&self, key: TypeKey) -> bool {
        self.decoders.contains(key)
    }
}

impl Default for TypeRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.types.len())
            .field("encoders", &self.encoders)
            .field("decoders", &self.decoders)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::TypeRegistry;
    use crate::Value;
    use crate::info::Typed;
    use crate::registry::TypeKey;
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn empty_registry_has_nothing() {
        let registry = TypeRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.resolve("i32").is_none());
        assert!(!registry.has_encoder(TypeKey::of::<i32>()));
        assert!(!registry.has_decoder(TypeKey::Enum));
    }

    #[test]
    fn registers_component_types() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Vec<Option<String>>>();

        assert_eq!(registry.len(), 3);
        assert!(registry.resolve("alloc::vec::Vec<core::option::Option<alloc::string::String>>").is_some());
        assert!(registry.resolve("core::option::Option<alloc::string::String>").is_some());
        assert!(registry.contains(core::any::TypeId::of::<String>()));

        // Registering again is a no-op.
        registry.register::<String>();
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn builtins_are_installed() {
        let registry = TypeRegistry::new();
        for key in [
            TypeKey::of::<bool>(),
            TypeKey::of::<u64>(),
            TypeKey::of::<String>(),
            TypeKey::of::<vc_node::Node>(),
            TypeKey::of::<crate::types::Color>(),
            TypeKey::of::<crate::types::FontStyle>(),
            TypeKey::Enum,
        ] {
            assert!(registry.has_encoder(key), "{key:?}");
            assert!(registry.has_decoder(key), "{key:?}");
        }
        assert_eq!(registry.resolve("f64").map(|info| info.type_name()), Some("f64"));
        assert!(registry.get(<Box<dyn Value>>::type_info().type_id()).is_none());
    }
}
