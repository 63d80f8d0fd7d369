use alloc::boxed::Box;
use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use vc_node::Node;

use crate::engine::{Decoder, Encoder, discover_decoder, discover_encoder};
use crate::info::{TypeInfo, TypeKind, Typed};
use crate::registry::{DecodeFn, EncodeFn, TypeKey, TypeRegistry, decode_fn, encode_fn};
use crate::{CodecConfig, CodecError, CodecResult, Direction, FromValue, Value};

/// Builds a base instance for a type during decoding.
///
/// Receives the type to construct and returns `None` to fall back to the
/// type's default constructor. The same factory is asked for the decoded
/// root and every nested value, so it can dispatch on the type.
pub type Factory<'f> = dyn Fn(&TypeInfo) -> Option<Box<dyn Value>> + 'f;

// -----------------------------------------------------------------------------
// Codec

/// Converts values to [`Node`] trees and back.
///
/// A codec owns a [`TypeRegistry`] with the handler tables. Types without a
/// handler are resolved by strategy discovery on first use and the result
/// is cached for the lifetime of the codec. The codec is `Send + Sync`;
/// share it behind an `Arc`.
///
/// # Examples
///
/// ```
/// use vc_codec::Codec;
///
/// let codec = Codec::new();
///
/// let node = codec.encode(&vec![1, 2, 3], "nums", false).unwrap();
/// assert_eq!(node.children().len(), 3);
/// assert_eq!(node.children()[0].name(), "num");
///
/// let nums: Vec<i32> = codec.decode(&node, None).unwrap();
/// assert_eq!(nums, [1, 2, 3]);
/// ```
pub struct Codec {
    config: CodecConfig,
    registry: RwLock<TypeRegistry>,
    discoveries: AtomicUsize,
}

impl Codec {
    /// Creates a codec with the built-in handlers and the default config.
    #[inline]
    pub fn new() -> Self {
        Self::with_config(CodecConfig::new())
    }

    /// Creates a codec with the built-in handlers.
    #[inline]
    pub fn with_config(config: CodecConfig) -> Self {
        Self::with_registry(config, TypeRegistry::new())
    }

    /// Creates a codec without any handlers.
    ///
    /// Only discovery and explicitly registered handlers are available.
    #[inline]
    pub fn empty() -> Self {
        Self::with_registry(CodecConfig::new(), TypeRegistry::empty())
    }

    #[inline]
    pub fn with_registry(config: CodecConfig, registry: TypeRegistry) -> Self {
        Self {
            config,
            registry: RwLock::new(registry),
            discoveries: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Locks the registry for reading.
    ///
    /// Holding the guard while encoding or decoding with this codec
    /// deadlocks if discovery needs to run.
    #[inline]
    pub fn registry(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn registry_mut(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Encode

    /// Encodes `value` into a new node called `name`.
    ///
    /// # Errors
    ///
    /// Fails if `name` is empty or any part of the value cannot be encoded.
    pub fn encode<T: Value>(&self, value: &T, name: &str, emit_type_tag: bool) -> CodecResult<Node> {
        let mut node = Node::try_new(name)?;
        self.encode_into(value, &mut node, emit_type_tag)?;
        Ok(node)
    }

    /// Encodes `value` into an existing node.
    #[inline]
    pub fn encode_into(&self, value: &dyn Value, node: &mut Node, emit_type_tag: bool) -> CodecResult<()> {
        Encoder::new(self).encode(value, node, emit_type_tag)
    }

    // -------------------------------------------------------------------------
    // Decode

    /// Decodes `node` as a `T`.
    ///
    /// The factory, if any, is asked for base instances before default
    /// constructors are used.
    #[inline]
    pub fn decode<T: Typed + FromValue>(&self, node: &Node, factory: Option<&Factory<'_>>) -> CodecResult<T> {
        Decoder::new(self, factory).decode_as(node)
    }

    /// Decodes `node` as a `T`, or returns `default` if there is no node.
    pub fn decode_or_default<T: Typed + FromValue>(
        &self,
        node: Option<&Node>,
        default: T,
        factory: Option<&Factory<'_>>,
    ) -> CodecResult<T> {
        match node {
            Some(node) => self.decode(node, factory),
            None => Ok(default),
        }
    }

    /// Decodes `node` into an untyped value using its type tag.
    ///
    /// Returns `None` for an empty node without a tag.
    #[inline]
    pub fn decode_any(&self, node: &Node, factory: Option<&Factory<'_>>) -> CodecResult<Option<Box<dyn Value>>> {
        Decoder::new(self, factory).decode_any(node)
    }

    /// Decodes `node` as a value of the type described by `info`.
    #[inline]
    pub fn decode_info(
        &self,
        node: &Node,
        info: &'static TypeInfo,
        factory: Option<&Factory<'_>>,
    ) -> CodecResult<Box<dyn Value>> {
        Decoder::new(self, factory).decode(node, info)
    }

    // -------------------------------------------------------------------------
    // Registration

    /// Installs an encoder for `key`, replacing any built-in or discovered one.
    pub fn register_encoder<F>(&self, key: TypeKey, encoder: F)
    where
        F: Fn(&dyn Value, &mut Node, &mut Encoder<'_>) -> CodecResult<()> + Send + Sync + 'static,
    {
        self.registry_mut().insert_encoder(key, encode_fn(encoder));
    }

    /// Installs a decoder for `key`, replacing any built-in or discovered one.
    pub fn register_decoder<F>(&self, key: TypeKey, decoder: F)
    where
        F: Fn(&Node, &'static TypeInfo, &mut Decoder<'_>) -> CodecResult<Box<dyn Value>> + Send + Sync + 'static,
    {
        self.registry_mut().insert_decoder(key, decode_fn(decoder));
    }

    /// Installs an encoder for exactly `T` and registers the type.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_codec::Codec;
    ///
    /// let codec = Codec::new();
    /// codec.register_encoder_for::<bool>(|value, node, _| {
    ///     node.set_value(if *value { "yes" } else { "no" });
    ///     Ok(())
    /// });
    ///
    /// let node = codec.encode(&true, "flag", false).unwrap();
    /// assert_eq!(node.value(), Some("yes"));
    /// ```
    pub fn register_encoder_for<T: Typed + Value>(
        &self,
        write: impl Fn(&T, &mut Node, &mut Encoder<'_>) -> CodecResult<()> + Send + Sync + 'static,
    ) {
        let mut registry = self.registry_mut();
        registry.register::<T>();
        registry.insert_encoder(
            TypeKey::exact::<T>(),
            encode_fn(move |value, node, encoder| match value.downcast_ref::<T>() {
                Some(value) => write(value, node, encoder),
                None => Err(CodecError::mismatch(T::type_path(), value.type_path())),
            }),
        );
    }

    /// Installs a decoder for exactly `T` and registers the type.
    pub fn register_decoder_for<T: Typed + Value>(
        &self,
        read: impl Fn(&Node, &mut Decoder<'_>) -> CodecResult<T> + Send + Sync + 'static,
    ) {
        let mut registry = self.registry_mut();
        registry.register::<T>();
        registry.insert_decoder(
            TypeKey::exact::<T>(),
            decode_fn(move |node, _, decoder| {
                let value = read(node, decoder)?;
                Ok(Box::new(value) as Box<dyn Value>)
            }),
        );
    }

    /// Makes `T` and the types it is built from resolvable by type tag.
    #[inline]
    pub fn register<T: Typed>(&self) {
        self.register_info(T::type_info());
    }

    /// Registers every type marked `#[contract(auto_register)]`.
    ///
    /// Returns `false` if automatic registration is not supported, either
    /// because the `auto_register` feature is disabled or because the
    /// platform does not run the static constructors it relies on.
    pub fn auto_register(&self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            crate::__macro_exports::auto_register::register_types(&mut self.registry_mut())
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Resolves a type tag to the type it names.
    #[inline]
    pub fn resolve_type_tag(&self, tag: &str) -> Option<&'static TypeInfo> {
        self.registry().resolve(tag)
    }

    #[inline]
    pub fn has_encoder(&self, key: TypeKey) -> bool {
        self.registry().has_encoder(key)
    }

    #[inline]
    pub fn has_decoder(&self, key: TypeKey) -> bool {
        self.registry().has_decoder(key)
    }

    /// Number of times strategy discovery ran.
    #[inline]
    pub fn discovery_count(&self) -> usize {
        self.discoveries.load(Ordering::Relaxed)
    }

    // -------------------------------------------------------------------------
    // Engine support

    pub(crate) fn register_info(&self, info: &'static TypeInfo) {
        if !self.registry().contains(info.type_id()) {
            self.registry_mut().register_info(info);
        }
    }

    /// Returns the encoder for `info`, running discovery on a miss.
    pub(crate) fn encoder_for(&self, info: &'static TypeInfo) -> CodecResult<EncodeFn> {
        let cached = lookup(&self.registry(), info, TypeRegistry::encoder);
        if let Some(encoder) = cached {
            return Ok(encoder);
        }

        let mut registry = self.registry_mut();
        if let Some(encoder) = lookup(&registry, info, TypeRegistry::encoder) {
            return Ok(encoder);
        }

        self.discoveries.fetch_add(1, Ordering::Relaxed);
        let Some((encoder, strategy)) = discover_encoder(info) else {
            return Err(CodecError::unsupported(info.type_path(), Direction::Encode));
        };

        log::debug!("discovered {strategy} encoder for `{}`", info.type_path());
        registry.register_info(info);
        registry.insert_encoder(TypeKey::Type(info.type_id()), encoder.clone());
        Ok(encoder)
    }

    /// Returns the decoder for `info`, running discovery on a miss.
    pub(crate) fn decoder_for(&self, info: &'static TypeInfo, with_factory: bool) -> CodecResult<DecodeFn> {
        let cached = lookup(&self.registry(), info, TypeRegistry::decoder);
        if let Some(decoder) = cached {
            return Ok(decoder);
        }

        let mut registry = self.registry_mut();
        if let Some(decoder) = lookup(&registry, info, TypeRegistry::decoder) {
            return Ok(decoder);
        }

        self.discoveries.fetch_add(1, Ordering::Relaxed);
        let Some((decoder, strategy)) = discover_decoder(info, with_factory) else {
            return Err(CodecError::unsupported(info.type_path(), Direction::Decode));
        };

        log::debug!("discovered {strategy} decoder for `{}`", info.type_path());
        registry.register_info(info);
        registry.insert_decoder(TypeKey::Type(info.type_id()), decoder.clone());
        Ok(decoder)
    }
}

/// Finds a handler for `info`: an exact entry first, then the enum slot.
fn lookup<F>(
    registry: &TypeRegistry,
    info: &TypeInfo,
    get: fn(&TypeRegistry, TypeKey) -> Option<F>,
) -> Option<F> {
    get(registry, TypeKey::Type(info.type_id())).or_else(|| match info.kind() {
        TypeKind::Enum(_) => get(registry, TypeKey::Enum),
        _ => None,
    })
}

impl Default for Codec {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("config", &self.config)
            .field("registry", &*self.registry())
            .field("discoveries", &self.discovery_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::fmt::Debug;

    use vc_node::Node;

    use super::Codec;
    use crate::derive::Contract;
    use crate::info::{TypeInfo, Typed};
    use crate::registry::TypeKey;
    use crate::{CodecConfig, CodecError, Direction, FromValue, Value};

    #[derive(Contract, Debug, Clone, Copy, PartialEq, Default)]
    #[contract(default, type_path = "tests::Mode")]
    enum Mode {
        #[default]
        Idle,
        #[contract(rename = "run")]
        Running,
    }

    #[derive(Contract, Debug, Clone, PartialEq, Default)]
    #[contract(default, type_path = "tests::Widget")]
    struct Widget {
        size: u32,
        name: String,
        mode: Mode,
        #[contract(rename = "labels")]
        tags: Vec<String>,
        #[contract(skip)]
        cache: u64,
    }

    #[derive(Contract, Debug, Clone, PartialEq, Default)]
    #[contract(default, type_path = "tests::Tree")]
    struct Tree {
        label: String,
        children: Vec<Tree>,
    }

    #[derive(Contract, Debug, Default)]
    #[contract(default, type_path = "tests::Scene")]
    struct Scene {
        items: Vec<Box<dyn Value>>,
        main: Option<Box<dyn Value>>,
    }

    #[derive(Contract, Debug, PartialEq)]
    #[contract(opaque, type_path = "tests::Secret")]
    struct Secret(u8);

    #[derive(Contract, Default)]
    #[contract(default, auto_register, type_path = "tests::Registered")]
    struct Registered {
        value: i32,
    }

    fn widget() -> Widget {
        Widget {
            size: 3,
            name: "knob".into(),
            mode: Mode::Running,
            tags: vec!["a".into(), "b".into()],
            cache: 0,
        }
    }

    fn names(node: &Node) -> Vec<&str> {
        node.children().iter().map(Node::name).collect()
    }

    fn round_trip<T>(codec: &Codec, value: T)
    where
        T: Typed + Value + FromValue + PartialEq + Debug,
    {
        let node = codec.encode(&value, "value", false).unwrap();
        assert_eq!(codec.decode::<T>(&node, None).unwrap(), value);
    }

    #[test]
    fn scalar_as_leaf() {
        let codec = Codec::new();
        let node = codec.encode(&5_i32, "five", false).unwrap();

        assert_eq!(node.name(), "five");
        assert_eq!(node.value(), Some("5"));
        assert_eq!(node.attributes().len(), 0);
        assert!(!node.has_children());
        assert_eq!(codec.decode::<i32>(&node, None).unwrap(), 5);
    }

    #[test]
    fn null_is_an_empty_untagged_node() {
        let codec = Codec::new();
        let node = codec.encode(&None::<Widget>, "w", true).unwrap();

        assert_eq!(node.name(), "w");
        assert!(node.is_empty());
        assert_eq!(node.attribute("ty"), None);
        assert_eq!(codec.decode::<Option<Widget>>(&node, None).unwrap(), None);
    }

    #[test]
    fn sequence_items_use_singular_name() {
        let codec = Codec::new();
        let node = codec.encode(&vec![1, 2, 3], "nums", false).unwrap();

        assert_eq!(names(&node), ["num", "num", "num"]);
        let values: Vec<_> = node.children().iter().filter_map(Node::value).collect();
        assert_eq!(values, ["1", "2", "3"]);
        assert_eq!(codec.decode::<Vec<i32>>(&node, None).unwrap(), [1, 2, 3]);

        let node = codec.encode(&vec![true], "data", false).unwrap();
        assert_eq!(names(&node), ["item"]);
    }

    #[test]
    fn scalars_round_trip() {
        let codec = Codec::new();
        round_trip(&codec, true);
        round_trip(&codec, 'x');
        round_trip(&codec, -7_i8);
        round_trip(&codec, i64::MIN);
        round_trip(&codec, u128::MAX);
        round_trip(&codec, usize::MAX);
        round_trip(&codec, 0.1_f32);
        round_trip(&codec, -2.5e300_f64);
        round_trip(&codec, String::from("hello world"));
        round_trip(&codec, Some(Some(4_u8)));
        round_trip(&codec, Mode::Idle);
        round_trip(&codec, alloc::collections::VecDeque::from([1_u16, 2]));
    }

    #[test]
    fn contract_members_in_name_order() {
        let codec = Codec::new();
        let node = codec.encode(&widget(), "widget", false).unwrap();

        assert_eq!(names(&node), ["labels", "mode", "name", "size"]);
        assert_eq!(node.child("mode").and_then(Node::value), Some("run"));
        assert_eq!(names(node.child("labels").unwrap()), ["label", "label"]);
        assert_eq!(codec.decode::<Widget>(&node, None).unwrap(), widget());
    }

    #[test]
    fn members_bind_by_name() {
        let codec = Codec::new();
        let mut node = Node::new("widget");
        node.push_child(Node::leaf("size", "1"));
        node.push_child(Node::leaf("unknown", "x"));
        node.push_child(Node::leaf("name", "first"));
        node.push_child(Node::leaf("size", "9"));
        node.push_child(Node::leaf("name", "last"));

        let widget: Widget = codec.decode(&node, None).unwrap();
        assert_eq!(widget.size, 9);
        assert_eq!(widget.name, "last");
        assert_eq!(widget.mode, Mode::Idle);
        assert!(widget.tags.is_empty());
        assert_eq!(widget.cache, 0);
    }

    #[test]
    fn empty_nodes() {
        let codec = Codec::new();
        let empty = Node::new("e");

        assert_eq!(codec.decode::<String>(&empty, None).unwrap(), "");
        assert!(codec.decode::<Vec<i32>>(&empty, None).unwrap().is_empty());
        assert_eq!(codec.decode::<Option<i32>>(&empty, None).unwrap(), None);
        assert_eq!(codec.decode::<u16>(&empty, None).unwrap(), 0);
        assert_eq!(codec.decode::<Widget>(&empty, None).unwrap(), Widget::default());

        let factory = |info: &TypeInfo| -> Option<Box<dyn Value>> {
            info.is::<Widget>().then(|| Box::new(widget()) as Box<dyn Value>)
        };
        assert_eq!(codec.decode::<Widget>(&empty, Some(&factory)).unwrap(), widget());
    }

    #[test]
    fn factory_builds_base_instances() {
        let codec = Codec::new();
        let mut node = Node::new("widget");
        node.push_child(Node::leaf("size", "5"));

        let factory = |info: &TypeInfo| -> Option<Box<dyn Value>> {
            info.is::<Widget>().then(|| Box::new(widget()) as Box<dyn Value>)
        };
        let decoded: Widget = codec.decode(&node, Some(&factory)).unwrap();
        assert_eq!(decoded, Widget { size: 5, ..widget() });

        let wrong = |_: &TypeInfo| -> Option<Box<dyn Value>> { Some(Box::new(1_u8)) };
        let err = codec.decode::<Widget>(&node, Some(&wrong)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::TypeMismatch {
                expected: "tests::Widget",
                found: "u8"
            }
        ));
    }

    #[test]
    fn array_lengths_are_preserved() {
        fn check<const N: usize>(codec: &Codec) {
            let value: [u16; N] = core::array::from_fn(|index| index as u16);
            let node = codec.encode(&value, "values", false).unwrap();
            assert_eq!(node.children().len(), N);
            assert_eq!(codec.decode::<[u16; N]>(&node, None).unwrap(), value);
        }

        let codec = Codec::new();
        check::<0>(&codec);
        check::<1>(&codec);
        check::<2>(&codec);
        check::<5>(&codec);
        check::<16>(&codec);

        let node = codec.encode(&[7_u8, 8, 9], "bytes", false).unwrap();
        assert_eq!(names(&node), ["byte", "byte", "byte"]);

        let err = codec.decode::<[u8; 2]>(&node, None).unwrap_err();
        assert!(matches!(err, CodecError::MalformedNode { .. }));
        let err = codec.decode::<[u8; 2]>(&Node::new("bytes"), None).unwrap_err();
        assert!(matches!(err, CodecError::MalformedNode { .. }));
    }

    #[test]
    fn untyped_values_carry_type_tags() {
        let codec = Codec::new();
        let scene = Scene {
            items: vec![
                Box::new(3_i32) as Box<dyn Value>,
                Box::new(String::from("x")) as Box<dyn Value>,
                Box::new(widget()) as Box<dyn Value>,
            ],
            main: Some(Box::new(Mode::Running)),
        };

        let node = codec.encode(&scene, "scene", false).unwrap();
        let items = node.child("items").unwrap();
        assert_eq!(names(items), ["item", "item", "item"]);
        let tags: Vec<_> = items
            .children()
            .iter()
            .filter_map(|item| item.attribute("ty"))
            .collect();
        assert_eq!(tags, ["i32", "alloc::string::String", "tests::Widget"]);
        assert_eq!(
            node.child("main").and_then(|main| main.attribute("ty")),
            Some("tests::Mode")
        );

        let back: Scene = codec.decode(&node, None).unwrap();
        assert_eq!(back.items.len(), 3);
        assert_eq!(back.items[0].downcast_ref::<i32>(), Some(&3));
        assert_eq!(back.items[1].downcast_ref::<String>().map(String::as_str), Some("x"));
        assert_eq!(back.items[2].downcast_ref::<Widget>(), Some(&widget()));
        assert_eq!(
            back.main.as_ref().and_then(|main| main.downcast_ref::<Mode>()),
            Some(&Mode::Running)
        );

        // Tags only resolve once the type is known to the codec.
        let fresh = Codec::new();
        let err = fresh.decode::<Scene>(&node, None).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            CodecError::UnresolvedTypeTag { tag } if tag == "tests::Widget"
        ));
        fresh.register::<Widget>();
        fresh.register::<Mode>();
        assert!(fresh.decode::<Scene>(&node, None).is_ok());
    }

    #[test]
    fn null_in_untyped_slot_is_rejected() {
        let codec = Codec::new();
        let scene = Scene {
            items: vec![Box::new(None::<i32>) as Box<dyn Value>],
            main: None,
        };
        let err = codec.encode(&scene, "scene", false).unwrap_err();
        assert!(matches!(err, CodecError::Member { member: "items", .. }));
        assert!(matches!(
            err.root_cause(),
            CodecError::NullInDynamicSlot {
                type_path: "core::option::Option<i32>"
            }
        ));

        // An optional untyped slot keeps its null.
        let scene = Scene {
            items: Vec::new(),
            main: Some(Box::new(None::<i32>)),
        };
        let node = codec.encode(&scene, "scene", false).unwrap();
        assert!(node.child("main").unwrap().is_empty());
        assert!(codec.decode::<Scene>(&node, None).unwrap().main.is_none());
    }

    #[test]
    fn decode_any_needs_a_tag() {
        let codec = Codec::new();
        assert!(codec.decode_any(&Node::new("x"), None).unwrap().is_none());

        let err = codec.decode_any(&Node::leaf("x", "5"), None).unwrap_err();
        assert!(matches!(err, CodecError::AmbiguousAny { ref node } if node == "x"));

        let mut tagged = Node::leaf("x", "5");
        tagged.set_attribute("ty", "no::Such");
        assert!(matches!(
            codec.decode_any(&tagged, None),
            Err(CodecError::UnresolvedTypeTag { .. })
        ));

        tagged.set_attribute("ty", "u8");
        let value = codec.decode_any(&tagged, None).unwrap().unwrap();
        assert_eq!(value.downcast_ref::<u8>(), Some(&5));

        let node = codec.encode(&widget(), "w", true).unwrap();
        assert_eq!(node.attribute("ty"), Some("tests::Widget"));
        let value = codec.decode_any(&node, None).unwrap().unwrap();
        assert_eq!(value.take::<Widget>().unwrap(), widget());
    }

    #[test]
    fn configured_names() {
        let config = CodecConfig::new().with_type_tag("type").with_item_name("entry");
        let codec = Codec::with_config(config);

        let node = codec.encode(&vec![1_u8], "data", true).unwrap();
        assert_eq!(node.attribute("type"), Some("alloc::vec::Vec<u8>"));
        assert_eq!(node.attribute("ty"), None);
        assert_eq!(names(&node), ["entry"]);

        let value = codec.decode_any(&node, None).unwrap().unwrap();
        assert_eq!(value.take::<Vec<u8>>().unwrap(), [1]);
    }

    #[test]
    fn discovery_runs_once_per_type() {
        let codec = Codec::new();
        assert_eq!(codec.discovery_count(), 0);
        assert!(!codec.has_encoder(TypeKey::of::<Widget>()));

        let node = codec.encode(&widget(), "w", false).unwrap();
        assert_eq!(codec.discovery_count(), 1);
        assert!(codec.has_encoder(TypeKey::of::<Widget>()));

        codec.encode(&widget(), "w", false).unwrap();
        assert_eq!(codec.discovery_count(), 1);

        codec.decode::<Widget>(&node, None).unwrap();
        codec.decode::<Widget>(&node, None).unwrap();
        assert_eq!(codec.discovery_count(), 2);
        assert!(codec.has_decoder(TypeKey::of::<Widget>()));
    }

    #[test]
    fn concurrent_discovery_runs_once() {
        let codec = Codec::new();
        let tree = Tree {
            label: "root".into(),
            children: vec![Tree {
                label: "leaf".into(),
                children: Vec::new(),
            }],
        };

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let node = codec.encode(&tree, "tree", false).unwrap();
                    assert_eq!(codec.decode::<Tree>(&node, None).unwrap(), tree);
                });
            }
        });

        assert_eq!(codec.discovery_count(), 2);
    }

    #[test]
    fn depth_limit() {
        let mut tree = Tree::default();
        for index in 0..10 {
            tree = Tree {
                label: index.to_string(),
                children: vec![tree],
            };
        }

        let codec = Codec::with_config(CodecConfig::new().with_max_depth(8));
        let err = codec.encode(&tree, "tree", false).unwrap_err();
        assert!(matches!(err.root_cause(), CodecError::DepthExceeded { limit: 8 }));

        let deep = Codec::new().encode(&tree, "tree", false).unwrap();
        let err = codec.decode::<Tree>(&deep, None).unwrap_err();
        assert!(matches!(err.root_cause(), CodecError::DepthExceeded { limit: 8 }));
        assert_eq!(Codec::new().decode::<Tree>(&deep, None).unwrap(), tree);
    }

    #[test]
    fn opaque_types_without_handlers() {
        let codec = Codec::new();

        let err = codec.encode(&Secret(1), "s", false).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnsupportedType {
                type_path: "tests::Secret",
                direction: Direction::Encode
            }
        ));

        let err = codec.decode::<Secret>(&Node::leaf("s", "1"), None).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnsupportedType {
                direction: Direction::Decode,
                ..
            }
        ));
        assert!(matches!(
            codec.decode::<Secret>(&Node::new("s"), None),
            Err(CodecError::NoDefault { .. })
        ));

        let factory = |info: &TypeInfo| -> Option<Box<dyn Value>> {
            info.is::<Secret>().then(|| Box::new(Secret(9)) as Box<dyn Value>)
        };
        let secret = codec.decode::<Secret>(&Node::leaf("s", "1"), Some(&factory)).unwrap();
        assert_eq!(secret, Secret(9));

        // The fallback stays installed but still needs a factory.
        let err = codec.decode::<Secret>(&Node::leaf("s", "1"), None).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnsupportedType {
                direction: Direction::Decode,
                ..
            }
        ));
    }

    #[test]
    fn registered_handlers_take_priority() {
        let codec = Codec::new();
        codec.register_encoder_for::<Secret>(|secret, node, _| {
            node.set_value(format!("#{}", secret.0));
            Ok(())
        });
        codec.register_decoder_for::<Secret>(|node, _| {
            let text = node.value().unwrap_or_default().trim_start_matches('#');
            text.parse().map(Secret).map_err(|err| CodecError::malformed(node, err))
        });

        let node = codec.encode(&Secret(4), "s", false).unwrap();
        assert_eq!(node.value(), Some("#4"));
        assert_eq!(codec.decode::<Secret>(&node, None).unwrap(), Secret(4));
        assert_eq!(
            codec.resolve_type_tag("tests::Secret").map(TypeInfo::type_name),
            Some("Secret")
        );

        codec.register_encoder_for::<u32>(|value, node, _| {
            node.set_value(format!("{value:#x}"));
            Ok(())
        });
        let node = codec.encode(&widget(), "w", false).unwrap();
        assert_eq!(node.child("size").and_then(Node::value), Some("0x3"));

        codec.register_encoder_for::<Mode>(|mode, node, _| {
            node.set_value(if *mode == Mode::Idle { "i" } else { "r" });
            Ok(())
        });
        let node = codec.encode(&Mode::Running, "m", false).unwrap();
        assert_eq!(node.value(), Some("r"));
    }

    #[test]
    fn empty_codec_has_no_builtins() {
        let codec = Codec::empty();
        let err = codec.encode(&5_i32, "five", false).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedType { type_path: "i32", .. }));

        let node = codec.encode(&Vec::<i32>::new(), "nums", false).unwrap();
        assert!(node.is_empty());
        assert!(codec.resolve_type_tag("i32").is_none());
    }

    #[test]
    fn decode_or_default() {
        let codec = Codec::new();
        assert_eq!(codec.decode_or_default(None, 7_u8, None).unwrap(), 7);

        let node = Node::leaf("n", "9");
        assert_eq!(codec.decode_or_default(Some(&node), 7_u8, None).unwrap(), 9);
    }

    #[test]
    fn untyped_entry_points() {
        let codec = Codec::new();
        let mut node = Node::new("size");
        codec.encode_into(&Some(12_u32), &mut node, true).unwrap();
        assert_eq!(node.value(), Some("12"));
        assert_eq!(node.attribute("ty"), Some("u32"));

        let value = codec.decode_info(&node, u32::type_info(), None).unwrap();
        assert_eq!(value.downcast_ref::<u32>(), Some(&12));
    }

    #[test]
    fn malformed_text() {
        let codec = Codec::new();

        let err = codec.decode::<i32>(&Node::leaf("n", "abc"), None).unwrap_err();
        assert!(matches!(err, CodecError::MalformedNode { ref node, .. } if node == "n"));

        let err = codec.decode::<Mode>(&Node::leaf("m", "Sleeping"), None).unwrap_err();
        assert!(matches!(err, CodecError::MalformedNode { .. }));
        assert_eq!(codec.decode::<Mode>(&Node::leaf("m", "run"), None).unwrap(), Mode::Running);

        let mut node = Node::new("w");
        node.push_child(Node::leaf("size", "-1"));
        let err = codec.decode::<Widget>(&node, None).unwrap_err();
        assert!(matches!(err, CodecError::Member { member: "size", .. }));
        assert!(matches!(err.root_cause(), CodecError::MalformedNode { .. }));
    }

    #[test]
    fn nodes_are_embedded() {
        let codec = Codec::new();
        let mut inner = Node::leaf("raw", "text");
        inner.set_attribute("k", "v");

        let node = codec.encode(&inner, "payload", false).unwrap();
        assert_eq!(node.children(), [inner.clone()]);
        assert_eq!(codec.decode::<Node>(&node, None).unwrap(), inner);
    }

    #[test]
    fn value_types() {
        use crate::types::{Color, FontDescriptor, FontStyle, Matrix4x4, Point, Rect, Size};

        let codec = Codec::new();

        let node = codec.encode(&Color::rgb(255, 0, 10), "color", false).unwrap();
        assert_eq!(node.value(), Some("255,0,10,255"));
        assert_eq!(codec.decode::<Color>(&node, None).unwrap(), Color::rgb(255, 0, 10));

        let rect = Rect::new(Point { x: 1.0, y: 2.0 }, Size { width: 3.5, height: 4.0 });
        let node = codec.encode(&rect, "bounds", false).unwrap();
        assert_eq!(node.value(), Some("1,2,3.5,4"));
        assert_eq!(codec.decode::<Rect>(&node, None).unwrap(), rect);

        let matrix = Matrix4x4::from_rows([[1.0, 2.0, 3.0, 4.0], [0.0; 4], [0.5; 4], [-1.0; 4]]);
        let node = codec.encode(&matrix, "transform", false).unwrap();
        assert_eq!(names(&node), ["row1", "row2", "row3", "row4"]);
        assert_eq!(node.child("row1").and_then(Node::value), Some("1,2,3,4"));
        assert_eq!(codec.decode::<Matrix4x4>(&node, None).unwrap(), matrix);
        assert_eq!(
            codec.decode::<Matrix4x4>(&Node::new("transform"), None).unwrap(),
            Matrix4x4::IDENTITY
        );

        let mut broken = Node::new("transform");
        broken.push_child(Node::leaf("row1", "1,0,0,0"));
        let err = codec.decode::<Matrix4x4>(&broken, None).unwrap_err();
        assert!(matches!(err, CodecError::MalformedNode { ref reason, .. } if reason.contains("row2")));

        let font = FontDescriptor::new("Sans", 11.5).with_style(FontStyle::BOLD | FontStyle::ITALIC);
        let node = codec.encode(&font, "font", false).unwrap();
        assert_eq!(names(&node), ["family", "size", "style"]);
        assert_eq!(node.child("style").and_then(Node::value), Some("BOLD | ITALIC"));
        assert_eq!(codec.decode::<FontDescriptor>(&node, None).unwrap(), font);

        let plain = FontDescriptor::new("Mono", 9.0);
        let node = codec.encode(&plain, "font", false).unwrap();
        assert!(node.child("style").unwrap().is_empty());
        assert_eq!(codec.decode::<FontDescriptor>(&node, None).unwrap(), plain);
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn date_times() {
        use ::chrono::{DateTime, FixedOffset, Utc};

        let codec = Codec::new();
        let text = "2024-05-06T07:08:09.250+02:00";
        let local = DateTime::parse_from_rfc3339(text).unwrap();

        let node = codec.encode(&local, "at", false).unwrap();
        assert_eq!(node.value(), Some(text));
        assert_eq!(codec.decode::<DateTime<FixedOffset>>(&node, None).unwrap(), local);

        let utc = local.with_timezone(&Utc);
        let node = codec.encode(&utc, "at", false).unwrap();
        assert_eq!(node.value(), Some("2024-05-06T05:08:09.250+00:00"));
        assert_eq!(codec.decode::<DateTime<Utc>>(&node, None).unwrap(), utc);
    }

    #[cfg(feature = "uuid")]
    #[test]
    fn uuids() {
        let codec = Codec::new();
        let id = ::uuid::Uuid::from_u128(0x1234_5678_9abc_def0_1234_5678_9abc_def0);

        let node = codec.encode(&id, "id", false).unwrap();
        assert_eq!(node.value(), Some("12345678-9abc-def0-1234-56789abcdef0"));
        assert_eq!(codec.decode::<::uuid::Uuid>(&node, None).unwrap(), id);
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn auto_register_collects_marked_types() {
        let codec = Codec::new();
        assert!(codec.resolve_type_tag("tests::Registered").is_none());
        assert!(codec.auto_register());

        let info = codec.resolve_type_tag("tests::Registered").unwrap();
        assert!(info.is::<Registered>());
        assert_eq!(info.as_contract().map(|contract| contract.len()), Some(1));
    }
}
