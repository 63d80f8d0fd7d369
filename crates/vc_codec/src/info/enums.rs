use alloc::boxed::Box;
use core::fmt;

use crate::Value;

/// Variant names of a fieldless enum.
///
/// Enums are written as the bare variant name and parsed back by
/// [`EnumInfo::from_name`].
#[derive(Clone, Copy)]
pub struct EnumInfo {
    variants: &'static [&'static str],
    from_name: fn(&str) -> Option<Box<dyn Value>>,
}

impl EnumInfo {
    #[inline]
    pub const fn new(
        variants: &'static [&'static str],
        from_name: fn(&str) -> Option<Box<dyn Value>>,
    ) -> Self {
        Self {
            variants,
            from_name,
        }
    }

    /// Serialized variant names in declaration order.
    #[inline]
    pub const fn variant_names(&self) -> &'static [&'static str] {
        self.variants
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.variants.contains(&name)
    }

    /// Creates the variant called `name`.
    #[inline]
    pub fn from_name(&self, name: &str) -> Option<Box<dyn Value>> {
        (self.from_name)(name)
    }
}

impl fmt::Debug for EnumInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumInfo")
            .field("variants", &self.variants)
            .finish_non_exhaustive()
    }
}
