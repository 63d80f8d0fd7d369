use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::any::Any;

use crate::impls::{GenericInfoCell, GenericPathCell, concat};
use crate::info::{SequenceInfo, TypeInfo, TypeKind, TypePath, Typed};
use crate::{CodecError, CodecResult, FromValue, Sequence, Value, ValueRef};

fn collect_items<T: Typed + FromValue>(items: Vec<Box<dyn Value>>) -> CodecResult<Vec<T>> {
    items
        .into_iter()
        .map(|item| {
            T::from_value(item).map_err(|item| CodecError::mismatch(T::type_path(), item.type_path()))
        })
        .collect()
}

macro_rules! impl_sequence_value {
    () => {
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
            ValueRef::Sequence(self)
        }
    };
}

// -----------------------------------------------------------------------------
// Vec<T>

impl<T: Typed + Value + FromValue> TypePath for Vec<T> {
    fn type_path() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["alloc::vec::Vec<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Vec<", T::type_name(), ">"]))
    }
}

impl<T: Typed + Value + FromValue> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericInfoCell = GenericInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let info = SequenceInfo::new::<T>(|items| -> CodecResult<Box<dyn Value>> {
                Ok(Box::new(collect_items::<T>(items)?))
            });
            TypeInfo::new::<Self>(TypeKind::Sequence(info)).with_default::<Self>()
        })
    }
}

impl<T: Typed + Value + FromValue> Sequence for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Value> {
        self.as_slice().get(index).map(|item| item as &dyn Value)
    }
}

impl<T: Typed + Value + FromValue> Value for Vec<T> {
    impl_sequence_value!();
}

impl<T: Typed + Value + FromValue> FromValue for Vec<T> {
    #[inline]
    fn from_value(value: Box<dyn Value>) -> Result<Self, Box<dyn Value>> {
        value.take::<Self>()
    }
}

// -----------------------------------------------------------------------------
// VecDeque<T>

impl<T: Typed + Value + FromValue> TypePath for VecDeque<T> {
    fn type_path() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["alloc::collections::VecDeque<", T::type_path(), ">"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["VecDeque<", T::type_name(), ">"]))
    }
}

impl<T: Typed + Value + FromValue> Typed for VecDeque<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericInfoCell = GenericInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let info = SequenceInfo::new::<T>(|items| -> CodecResult<Box<dyn Value>> {
                Ok(Box::new(VecDeque::from(collect_items::<T>(items)?)))
            });
            TypeInfo::new::<Self>(TypeKind::Sequence(info)).with_default::<Self>()
        })
    }
}

impl<T: Typed + Value + FromValue> Sequence for VecDeque<T> {
    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Value> {
        VecDeque::get(self, index).map(|item| item as &dyn Value)
    }
}

impl<T: Typed + Value + FromValue> Value for VecDeque<T> {
    impl_sequence_value!();
}

impl<T: Typed + Value + FromValue> FromValue for VecDeque<T> {
    #[inline]
    fn from_value(value: Box<dyn Value>) -> Result<Self, Box<dyn Value>> {
        value.take::<Self>()
    }
}

// -----------------------------------------------------------------------------
// [T; N]

impl<T: Typed + Value + FromValue, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| {
            let len = N.to_string();
            concat(&["[", T::type_path(), "; ", &len, "]"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| {
            let len = N.to_string();
            concat(&["[", T::type_name(), "; ", &len, "]"])
        })
    }
}

impl<T: Typed + Value + FromValue, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericInfoCell = GenericInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let info = SequenceInfo::fixed::<T>(N, |items| -> CodecResult<Box<dyn Value>> {
                let items = collect_items::<T>(items)?;
                let found = items.len();
                match <[T; N]>::try_from(items) {
                    Ok(array) => Ok(Box::new(array)),
                    Err(_) => Err(CodecError::LengthMismatch { expected: N, found }),
                }
            });
            TypeInfo::new::<Self>(TypeKind::Sequence(info))
        })
    }
}

impl<T: Typed + Value + FromValue, const N: usize> Sequence for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Value> {
        self.as_slice().get(index).map(|item| item as &dyn Value)
    }
}

impl<T: Typed + Value + FromValue, const N: usize> Value for [T; N] {
    impl_sequence_value!();
}

impl<T: Typed + Value + FromValue, const N: usize> FromValue for [T; N] {
    #[inline]
    fn from_value(value: Box<dyn Value>) -> Result<Self, Box<dyn Value>> {
        value.take::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use crate::info::{TypePath, Typed};
    use crate::{CodecError, Sequence, Value};
    use alloc::boxed::Box;
    use alloc::collections::VecDeque;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn paths() {
        assert_eq!(<Vec<i32>>::type_path(), "alloc::vec::Vec<i32>");
        assert_eq!(<[u8; 4]>::type_path(), "[u8; 4]");
        assert_eq!(<VecDeque<bool>>::type_name(), "VecDeque<bool>");
        assert_eq!(<Vec<[f32; 2]>>::type_name(), "Vec<[f32; 2]>");
    }

    #[test]
    fn indexed_access() {
        let values = vec![1_i32, 2, 3];
        assert_eq!(Sequence::len(&values), 3);
        assert_eq!(Sequence::get(&values, 1).and_then(|v| v.downcast_ref::<i32>()), Some(&2));
        assert!(Sequence::get(&values, 3).is_none());
    }

    #[test]
    fn array_builder_checks_length() {
        let info = <[u8; 2]>::type_info().as_sequence().unwrap();
        assert_eq!(info.fixed_len(), Some(2));

        let items: Vec<Box<dyn Value>> = vec![Box::new(1_u8), Box::new(2_u8)];
        let array = info.build(items).unwrap();
        assert_eq!(array.downcast_ref::<[u8; 2]>(), Some(&[1, 2]));

        let items: Vec<Box<dyn Value>> = vec![Box::new(1_u8)];
        assert!(matches!(
            info.build(items),
            Err(CodecError::LengthMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn builder_rejects_wrong_items() {
        let info = <Vec<u8>>::type_info().as_sequence().unwrap();
        let items: Vec<Box<dyn Value>> = vec![Box::new(1_u16)];
        assert!(matches!(info.build(items), Err(CodecError::TypeMismatch { .. })));
    }
}
