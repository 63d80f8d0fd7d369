//! Static type information.
//!
//! Every codec-aware type implements [`TypePath`] and [`Typed`]. The
//! [`TypeInfo`] returned by [`Typed::type_info`] describes how the engines
//! treat the type: its [`TypeKind`], an optional default constructor and
//! optional [`NativeHooks`].

// -----------------------------------------------------------------------------
// Modules

mod contract;
mod enums;
mod native;
mod nullable;
mod sequence;
mod type_info;
mod type_path;

// -----------------------------------------------------------------------------
// Exports

pub use contract::{ContractInfo, MemberGetter, MemberInfo, MemberSetter};
pub use enums::EnumInfo;
pub use native::{NativeHooks, NodeCodec};
pub use nullable::NullableInfo;
pub use sequence::{SequenceBuilder, SequenceInfo};
pub use type_info::{TypeInfo, TypeKind};
pub use type_path::{Type, TypePath, Typed};
