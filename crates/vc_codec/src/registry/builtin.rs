//! Handlers installed by [`TypeRegistry::new`].

use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use core::fmt::Display;
use core::str::FromStr;

use vc_node::Node;

use super::{TypeKey, TypeRegistry, decode_fn, encode_fn};
use crate::info::{NativeHooks, NodeCodec, Typed};
use crate::types::{Color, FontDescriptor, FontStyle, Matrix4x4, Point, Rect, Size, Vector2, Vector4};
use crate::{CodecError, CodecResult, Value, ValueRef};

pub(super) fn install(registry: &mut TypeRegistry) {
    macro_rules! scalars {
        ($($ty:ty),* $(,)?) => {$(
            scalar::<$ty>(registry);
        )*};
    }

    scalars!(bool, char, f32, f64, String);
    scalars!(i8, i16, i32, i64, i128, isize);
    scalars!(u8, u16, u32, u64, u128, usize);
    scalars!(Color, Point, Size, Rect, Vector2, Vector4);

    textual::<FontStyle, _>(registry, write_font_style, bitflags::parser::from_str::<FontStyle>);

    native::<Matrix4x4>(registry);
    native::<FontDescriptor>(registry);

    enums(registry);
    node(registry);

    #[cfg(feature = "chrono")]
    date_times(registry);

    #[cfg(feature = "uuid")]
    scalar::<::uuid::Uuid>(registry);
}

/// Returns the value text of a leaf.
fn leaf_text(node: &Node) -> CodecResult<&str> {
    node.value()
        .ok_or_else(|| CodecError::malformed(node, "expected a value"))
}

fn downcast<T: Typed>(value: &dyn Value) -> CodecResult<&T> {
    value
        .downcast_ref::<T>()
        .ok_or_else(|| CodecError::mismatch(T::type_path(), value.type_path()))
}

// -----------------------------------------------------------------------------
// Text

/// A type written as a single text value.
fn textual<T, E>(registry: &mut TypeRegistry, write: fn(&T) -> String, read: fn(&str) -> Result<T, E>)
where
    T: Typed + Value,
    E: Display + 'static,
{
    registry.register::<T>();
    let key = TypeKey::of::<T>();

    registry.insert_encoder(
        key,
        encode_fn(move |value, node, _| {
            node.set_value(write(downcast::<T>(value)?));
            Ok(())
        }),
    );
    registry.insert_decoder(
        key,
        decode_fn(move |node, _, _| {
            let text = leaf_text(node)?;
            match read(text) {
                Ok(value) => Ok(Box::new(value) as Box<dyn Value>),
                Err(err) => Err(CodecError::malformed(
                    node,
                    format!("invalid {} `{text}`: {err}", T::type_name()),
                )),
            }
        }),
    );
}

/// A type written with `Display` and read with `FromStr`.
#[inline]
fn scalar<T>(registry: &mut TypeRegistry)
where
    T: Typed + Value + Display + FromStr,
    T::Err: Display + 'static,
{
    textual::<T, T::Err>(registry, T::to_string, str::parse::<T>);
}

fn write_font_style(style: &FontStyle) -> String {
    let mut text = String::new();
    // Writing into a `String` does not fail.
    let _ = bitflags::parser::to_writer(style, &mut text);
    text
}

#[cfg(feature = "chrono")]
fn date_times(registry: &mut TypeRegistry) {
    use ::chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

    textual::<DateTime<FixedOffset>, _>(
        registry,
        |value| value.to_rfc3339_opts(SecondsFormat::AutoSi, false),
        DateTime::parse_from_rfc3339,
    );
    textual::<DateTime<Utc>, _>(
        registry,
        |value| value.to_rfc3339_opts(SecondsFormat::AutoSi, false),
        |text| DateTime::parse_from_rfc3339(text).map(|value| value.with_timezone(&Utc)),
    );
}

// -----------------------------------------------------------------------------
// Structured

/// A type with its own [`NodeCodec`].
fn native<T: NodeCodec + Typed + Value>(registry: &mut TypeRegistry) {
    registry.register::<T>();
    let key = TypeKey::of::<T>();
    let hooks = NativeHooks::of::<T>();

    registry.insert_encoder(
        key,
        encode_fn(move |value, node, encoder| hooks.write(value, node, encoder)),
    );
    registry.insert_decoder(key, decode_fn(move |node, _, decoder| hooks.read(node, decoder)));
}

/// Every enum, written as its variant name.
fn enums(registry: &mut TypeRegistry) {
    registry.insert_encoder(
        TypeKey::Enum,
        encode_fn(|value, node, _| match value.value_ref() {
            ValueRef::Enum(name) => {
                node.set_value(name);
                Ok(())
            }
            _ => Err(CodecError::mismatch("enum", value.type_path())),
        }),
    );
    registry.insert_decoder(
        TypeKey::Enum,
        decode_fn(|node, target, _| {
            let Some(info) = target.as_enum() else {
                return Err(CodecError::mismatch("enum", target.type_path()));
            };
            let name = leaf_text(node)?;
            info.from_name(name).ok_or_else(|| {
                CodecError::malformed(
                    node,
                    format!("`{name}` is not a variant of `{}`", target.type_path()),
                )
            })
        }),
    );
}

/// `Node` values, embedded as the single child of their node.
fn node(registry: &mut TypeRegistry) {
    registry.register::<Node>();
    let key = TypeKey::of::<Node>();

    registry.insert_encoder(
        key,
        encode_fn(|value, node, _| {
            node.push_child(downcast::<Node>(value)?.clone());
            Ok(())
        }),
    );
    registry.insert_decoder(
        key,
        decode_fn(|node, _, _| match node.children() {
            [child] => Ok(Box::new(child.clone()) as Box<dyn Value>),
            children => Err(CodecError::malformed(
                node,
                format!("expected one embedded node, found {}", children.len()),
            )),
        }),
    );
}
