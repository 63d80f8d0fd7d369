//! Scalars and `String`.

use alloc::string::String;

/// Implements `TypePath`, `Typed`, `Value` and `FromValue` for a
/// non-generic type with a `Default`.
///
/// The kind defaults to `Opaque`.
macro_rules! impl_opaque {
    ($ty:ty, $path:expr, $name:expr) => {
        $crate::impls::impl_opaque!($ty, $path, $name, Opaque);
    };
    ($ty:ty, $path:expr, $name:expr, $kind:ident) => {
        impl $crate::info::TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }
        }

        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::impls::NonGenericInfoCell =
                    $crate::impls::NonGenericInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::new::<Self>($crate::info::TypeKind::$kind)
                        .with_default::<Self>()
                })
            }
        }

        impl $crate::Value for $ty {
            #[inline]
            fn value_info(&self) -> &'static $crate::info::TypeInfo {
                <Self as $crate::info::Typed>::type_info()
            }

            #[inline]
            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            #[inline]
            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            #[inline]
            fn into_any(
                self: ::alloc::boxed::Box<Self>,
            ) -> ::alloc::boxed::Box<dyn ::core::any::Any> {
                self
            }
        }

        impl $crate::FromValue for $ty {
            #[inline]
            fn from_value(
                value: ::alloc::boxed::Box<dyn $crate::Value>,
            ) -> Result<Self, ::alloc::boxed::Box<dyn $crate::Value>> {
                value.take::<Self>()
            }
        }
    };
}

pub(crate) use impl_opaque;

macro_rules! impl_primitives {
    ($($ty:ident)*) => {$(
        impl_opaque!($ty, stringify!($ty), stringify!($ty));
    )*};
}

impl_primitives!(bool char f32 f64);
impl_primitives!(i8 i16 i32 i64 i128 isize);
impl_primitives!(u8 u16 u32 u64 u128 usize);

impl_opaque!(String, "alloc::string::String", "String", Text);
