use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Value

/// A value the codec can encode.
///
/// `Value` is object safe; the engines work on `&dyn Value` and
/// `Box<dyn Value>`. Implementations are generated by
/// [`derive::Contract`](crate::derive::Contract) or provided by this crate for
/// primitives, strings, sequences, `Option` and a few foreign types.
///
/// `Box<dyn Value>` is itself a `Value` and forwards every method to the boxed
/// value, so it reports the runtime type, not `Box`.
pub trait Value: Any + Send + Sync {
    /// Returns the type information of the runtime type.
    fn value_info(&self) -> &'static TypeInfo;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Exposes the structure the engines handle without a registry lookup.
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Opaque
    }
}

/// Structural view of a value.
pub enum ValueRef<'a> {
    /// Handled by the registry, keyed by runtime type.
    Opaque,
    /// An enum in the given variant.
    Enum(&'static str),
    /// An ordered collection of values.
    Sequence(&'a dyn Sequence),
    /// A nullable wrapper, `None` for null.
    Nullable(Option<&'a dyn Value>),
}

/// Indexed access to the elements of a sequence value.
pub trait Sequence {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&dyn Value>;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl dyn Value {
    /// Returns the type path of the runtime type.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.value_info().type_path()
    }

    /// Returns `true` if the runtime type is `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Downcasts the box, handing it back unchanged on failure.
    pub fn downcast<T: Any>(self: Box<Self>) -> Result<Box<T>, Box<Self>> {
        if self.is::<T>() {
            match self.into_any().downcast::<T>() {
                Ok(value) => Ok(value),
                Err(_) => unreachable!("type was checked before the downcast"),
            }
        } else {
            Err(self)
        }
    }

    /// Downcasts and unboxes, handing the box back unchanged on failure.
    #[inline]
    pub fn take<T: Any>(self: Box<Self>) -> Result<T, Box<Self>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({})", self.type_path())
    }
}

// -----------------------------------------------------------------------------
// FromValue

/// Recovers a concrete value from a decoded `Box<dyn Value>`.
///
/// Returns the box unchanged if it holds another type.
pub trait FromValue: Sized {
    fn from_value(value: Box<dyn Value>) -> Result<Self, Box<dyn Value>>;
}

#[cfg(test)]
mod tests {
    use crate::Value;
    use alloc::boxed::Box;
    use alloc::string::String;

    #[test]
    fn downcasting() {
        let mut value: Box<dyn Value> = Box::new(7_i32);
        assert!(value.is::<i32>());
        assert_eq!(value.type_path(), "i32");
        assert_eq!(value.downcast_ref::<i32>(), Some(&7));

        *value.downcast_mut::<i32>().unwrap() = 8;

        let value = value.take::<String>().unwrap_err();
        assert_eq!(value.take::<i32>().unwrap(), 8);
    }

    #[test]
    fn boxed_value_forwards() {
        let inner: Box<dyn Value> = Box::new(String::from("x"));
        let outer: Box<dyn Value> = Box::new(inner);
        assert_eq!(outer.type_path(), "alloc::string::String");
        assert_eq!(outer.take::<String>().unwrap(), "x");
    }
}
