//! Static storage for type information.
//!
//! A `static` inside a generic function is shared by every instantiation,
//! so generic types store their data per [`TypeId`] in a
//! [`GenericInfoCell`] or [`GenericPathCell`]. Non-generic types use the
//! cheaper [`NonGenericInfoCell`].

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use vc_utils::TypeIdMap;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericInfoCell

/// Holds the [`TypeInfo`] of one non-generic type.
///
/// ```ignore
/// impl Typed for Meters {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericInfoCell = NonGenericInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::new::<Self>(TypeKind::Opaque))
///     }
/// }
/// ```
pub struct NonGenericInfoCell(OnceLock<TypeInfo>);

impl NonGenericInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericCell

/// Per-type storage shared by all instantiations of a generic function.
///
/// Entries are leaked on first use and live for the rest of the program.
pub struct GenericCell<T: 'static>(RwLock<TypeIdMap<&'static T>>);

/// Holds the [`TypeInfo`] of every instantiation of a generic type.
pub type GenericInfoCell = GenericCell<TypeInfo>;

/// Holds the type path (or name) of every instantiation of a generic type.
pub type GenericPathCell = GenericCell<String>;

impl<T: Send + Sync + 'static> GenericCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the entry of `G`, creating it with `f` on first use.
    ///
    /// `f` runs without holding the lock, so it may touch other cells.
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &'static T {
        let type_id = TypeId::of::<G>();

        let cached = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();
        if let Some(value) = cached {
            return value;
        }

        let value = f();
        let mut map = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *map.get_or_insert_with(type_id, || Box::leak(Box::new(value)))
    }
}
