use alloc::boxed::Box;
use core::fmt;

use super::{TypeInfo, Typed};
use crate::{CodecResult, Value};

/// A wrapper that is either null or holds one inner value, like `Option<T>`.
#[derive(Clone, Copy)]
pub struct NullableInfo {
    inner: fn() -> &'static TypeInfo,
    none: fn() -> Box<dyn Value>,
    some: fn(Box<dyn Value>) -> CodecResult<Box<dyn Value>>,
}

impl NullableInfo {
    /// `none` builds the null value, `some` wraps a decoded inner value.
    #[inline]
    pub fn new<T: Typed>(
        none: fn() -> Box<dyn Value>,
        some: fn(Box<dyn Value>) -> CodecResult<Box<dyn Value>>,
    ) -> Self {
        Self {
            inner: T::type_info,
            none,
            some,
        }
    }

    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner)()
    }

    #[inline]
    pub fn none(&self) -> Box<dyn Value> {
        (self.none)()
    }

    #[inline]
    pub fn some(&self, inner: Box<dyn Value>) -> CodecResult<Box<dyn Value>> {
        (self.some)(inner)
    }
}

impl fmt::Debug for NullableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NullableInfo")
            .field("inner", &self.inner_info().type_path())
            .finish_non_exhaustive()
    }
}
