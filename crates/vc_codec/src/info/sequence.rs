use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use super::{TypeInfo, Typed};
use crate::{CodecResult, Value};

/// Builds a sequence value from decoded items.
pub type SequenceBuilder = fn(Vec<Box<dyn Value>>) -> CodecResult<Box<dyn Value>>;

/// An ordered collection of items of one declared type.
#[derive(Clone, Copy)]
pub struct SequenceInfo {
    item: fn() -> &'static TypeInfo,
    fixed_len: Option<usize>,
    build: SequenceBuilder,
}

impl SequenceInfo {
    /// A growable sequence of `T`.
    #[inline]
    pub fn new<T: Typed>(build: SequenceBuilder) -> Self {
        Self {
            item: T::type_info,
            fixed_len: None,
            build,
        }
    }

    /// A sequence of exactly `len` items of `T`, such as `[T; N]`.
    #[inline]
    pub fn fixed<T: Typed>(len: usize, build: SequenceBuilder) -> Self {
        Self {
            item: T::type_info,
            fixed_len: Some(len),
            build,
        }
    }

    /// Declared item type.
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item)()
    }

    #[inline]
    pub const fn fixed_len(&self) -> Option<usize> {
        self.fixed_len
    }

    #[inline]
    pub fn build(&self, items: Vec<Box<dyn Value>>) -> CodecResult<Box<dyn Value>> {
        (self.build)(items)
    }
}

impl fmt::Debug for SequenceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceInfo")
            .field("item", &self.item_info().type_path())
            .field("fixed_len", &self.fixed_len)
            .finish_non_exhaustive()
    }
}
