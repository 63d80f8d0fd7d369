use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use super::{ContractInfo, EnumInfo, NativeHooks, NodeCodec, NullableInfo, SequenceInfo};
use super::{Type, TypePath, Typed};
use crate::Value;

// -----------------------------------------------------------------------------
// TypeKind

/// How the engines treat a type before consulting the registry.
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// Written and read by a registry handler, such as the numeric types.
    Opaque,
    /// `String`. Never iterated; an empty node decodes to `""`.
    Text,
    /// A fieldless enum, written as its variant name.
    Enum(EnumInfo),
    /// An ordered collection, written as one child per item.
    Sequence(SequenceInfo),
    /// An optional value, written as an empty node when null.
    Nullable(NullableInfo),
    /// A data contract, written as one child per member.
    Contract(ContractInfo),
    /// An untyped value, `Box<dyn Value>`. Resolved through the type tag.
    Dynamic,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time description of a type, as returned by [`Typed::type_info`].
///
/// # Examples
///
/// ```
/// use vc_codec::info::{TypeKind, Typed};
///
/// let info = <Vec<Option<i32>>>::type_info();
/// assert_eq!(info.type_path(), "alloc::vec::Vec<core::option::Option<i32>>");
///
/// let TypeKind::Sequence(items) = info.kind() else { unreachable!() };
/// assert!(matches!(items.item_info().kind(), TypeKind::Nullable(_)));
/// ```
pub struct TypeInfo {
    ty: Type,
    kind: TypeKind,
    default: Option<fn() -> Box<dyn Value>>,
    native: Option<NativeHooks>,
}

impl TypeInfo {
    /// Describes `T` with the given kind, no default and no native hooks.
    #[inline]
    pub fn new<T: TypePath>(kind: TypeKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
            default: None,
            native: None,
        }
    }

    /// Records `T::default` as the default constructor.
    pub fn with_default<T: Default + Value>(mut self) -> Self {
        debug_assert!(self.ty.is::<T>(), "default constructor of another type");
        self.default = Some(|| -> Box<dyn Value> { Box::new(T::default()) });
        self
    }

    /// Records the [`NodeCodec`] implementation of `T`.
    pub fn with_native<T: NodeCodec + Typed + Value>(mut self) -> Self {
        debug_assert!(self.ty.is::<T>(), "native hooks of another type");
        self.native = Some(NativeHooks::of::<T>());
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    /// Returns `true` if this describes `T`.
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.ty.is::<T>()
    }

    #[inline]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    #[inline]
    pub const fn native(&self) -> Option<&NativeHooks> {
        self.native.as_ref()
    }

    #[inline]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Creates a value with the default constructor, if there is one.
    #[inline]
    pub fn default_value(&self) -> Option<Box<dyn Value>> {
        self.default.map(|f| f())
    }

    /// Returns `true` for untyped values, also behind a nullable wrapper.
    ///
    /// Values declared this way are written with a type tag.
    pub fn is_dynamic(&self) -> bool {
        match &self.kind {
            TypeKind::Dynamic => true,
            TypeKind::Nullable(info) => info.inner_info().is_dynamic(),
            _ => false,
        }
    }

    #[inline]
    pub const fn as_enum(&self) -> Option<&EnumInfo> {
        match &self.kind {
            TypeKind::Enum(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_sequence(&self) -> Option<&SequenceInfo> {
        match &self.kind {
            TypeKind::Sequence(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_nullable(&self) -> Option<&NullableInfo> {
        match &self.kind {
            TypeKind::Nullable(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_contract(&self) -> Option<&ContractInfo> {
        match &self.kind {
            TypeKind::Contract(info) => Some(info),
            _ => None,
        }
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("type_path", &self.type_path())
            .field("kind", &self.kind)
            .field("default", &self.has_default())
            .field("native", &self.native.is_some())
            .finish()
    }
}
