use core::any::TypeId;

use crate::info::{TypeInfo, TypeKind, Typed};

/// Key of the handler tables.
///
/// Every enum shares the [`TypeKey::Enum`] slot, so one handler pair covers
/// all enums by name. Other types are keyed by their [`TypeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Type(TypeId),
    Enum,
}

impl TypeKey {
    /// Key of `T`. Enums map to [`TypeKey::Enum`].
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self::of_info(T::type_info())
    }

    pub fn of_info(info: &TypeInfo) -> Self {
        match info.kind() {
            TypeKind::Enum(_) => Self::Enum,
            _ => Self::Type(info.type_id()),
        }
    }

    /// Key of `T` that never falls back to the enum slot.
    #[inline]
    pub fn exact<T: 'static>() -> Self {
        Self::Type(TypeId::of::<T>())
    }
}
