use core::any::TypeId;
use core::fmt;

use super::TypeInfo;

// -----------------------------------------------------------------------------
// TypePath

/// A stable, fully qualified name for a type.
///
/// The path doubles as the type tag written by the encoder, so it must be
/// unique among the types registered in one codec. Generic types include
/// their parameters, as in `alloc::vec::Vec<i32>`.
pub trait TypePath: 'static {
    /// Fully qualified path, such as `alloc::string::String`.
    fn type_path() -> &'static str;

    /// Short name, such as `String`.
    fn type_name() -> &'static str;
}

/// Provides the static [`TypeInfo`] of a type.
pub trait Typed: TypePath {
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// Type

/// Identity of a type: its [`TypeId`] and its paths.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
    name: &'static str,
}

impl Type {
    #[inline]
    pub fn of<T: TypePath>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: T::type_path(),
            name: T::type_name(),
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}
