use alloc::boxed::Box;
use core::any::Any;

use vc_node::Node;

use crate::impls::NonGenericInfoCell;
use crate::info::{TypeInfo, TypeKind, TypePath, Typed};
use crate::{FromValue, Value};

// A node value is embedded as the single child of its own node.

impl TypePath for Node {
    #[inline]
    fn type_path() -> &'static str {
        "vc_node::Node"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Node"
    }
}

impl Typed for Node {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericInfoCell = NonGenericInfoCell::new();
        CELL.get_or_init(|| TypeInfo::new::<Self>(TypeKind::Opaque))
    }
}

impl Value for Node {
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
}

impl FromValue for Node {
    #[inline]
    fn from_value(value: Box<dyn Value>) -> Result<Self, Box<dyn Value>> {
        value.take::<Self>()
    }
}
