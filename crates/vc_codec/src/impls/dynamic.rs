use alloc::boxed::Box;
use core::any::Any;

use crate::impls::NonGenericInfoCell;
use crate::info::{TypeInfo, TypeKind, TypePath, Typed};
use crate::{FromValue, Value, ValueRef};

// `Box<dyn Value>` is the untyped slot. Its static info is `Dynamic`, while
// every runtime query is forwarded to the boxed value.

impl TypePath for Box<dyn Value> {
    #[inline]
    fn type_path() -> &'static str {
        "alloc::boxed::Box<dyn vc_codec::Value>"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Box<dyn Value>"
    }
}

impl Typed for Box<dyn Value> {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericInfoCell = NonGenericInfoCell::new();
        CELL.get_or_init(|| TypeInfo::new::<Self>(TypeKind::Dynamic))
    }
}

impl Value for Box<dyn Value> {
    #[inline]
    fn value_info(&self) -> &'static TypeInfo {
        <dyn Value as Value>::value_info(&**self)
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        <dyn Value as Value>::as_any(&**self)
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        <dyn Value as Value>::as_any_mut(&mut **self)
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        <dyn Value as Value>::into_any(*self)
    }

    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        <dyn Value as Value>::value_ref(&**self)
    }
}

impl FromValue for Box<dyn Value> {
    #[inline]
    fn from_value(value: Box<dyn Value>) -> Result<Self, Box<dyn Value>> {
        Ok(value)
    }
}
