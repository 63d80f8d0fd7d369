use alloc::boxed::Box;
use core::any::Any;

use crate::impls::{GenericInfoCell, GenericPathCell, concat};
use crate::info::{NullableInfo, TypeInfo, TypeKind, TypePath, Typed};
use crate::{CodecError, FromValue, Value, ValueRef};

impl<T: Typed + Value + FromValue> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["core::option::Option<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Option<", T::type_name(), ">"]))
    }
}

impl<T: Typed + Value + FromValue> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericInfoCell = GenericInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let info = NullableInfo::new::<T>(
                || -> Box<dyn Value> { Box::new(None::<T>) },
                |inner| -> Result<Box<dyn Value>, CodecError> {
                    match T::from_value(inner) {
                        Ok(inner) => Ok(Box::new(Some(inner))),
                        Err(inner) => Err(CodecError::mismatch(T::type_path(), inner.type_path())),
                    }
                },
            );
            TypeInfo::new::<Self>(TypeKind::Nullable(info)).with_default::<Self>()
        })
    }
}

impl<T: Typed + Value + FromValue> Value for Option<T> {
    #[inline]
    fn value_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Nullable(self.as_ref().map(|value| value as &dyn Value))
    }
}

impl<T: Typed + Value + FromValue> FromValue for Option<T> {
    #[inline]
    fn from_value(value: Box<dyn Value>) -> Result<Self, Box<dyn Value>> {
        value.take::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use crate::info::{TypePath, Typed};
    use crate::{Value, ValueRef};
    use alloc::boxed::Box;

    #[test]
    fn paths() {
        assert_eq!(<Option<u8>>::type_path(), "core::option::Option<u8>");
        assert_eq!(<Option<Option<u8>>>::type_name(), "Option<Option<u8>>");
    }

    #[test]
    fn wrap_and_unwrap() {
        let info = <Option<u8>>::type_info().as_nullable().unwrap();
        assert_eq!(info.inner_info().type_path(), "u8");

        let none = info.none();
        assert_eq!(none.downcast_ref::<Option<u8>>(), Some(&None));

        let some = info.some(Box::new(4_u8)).unwrap();
        assert_eq!(some.downcast_ref::<Option<u8>>(), Some(&Some(4)));
        assert!(info.some(Box::new(4_i64)).is_err());
    }

    #[test]
    fn value_ref_exposes_inner() {
        let value: Option<u8> = Some(9);
        let ValueRef::Nullable(Some(inner)) = value.value_ref() else {
            panic!("expected a present nullable");
        };
        assert_eq!(inner.downcast_ref::<u8>(), Some(&9));
        assert!(matches!(None::<u8>.value_ref(), ValueRef::Nullable(None)));
    }
}
