use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt;

use thiserror::Error;
use vc_node::{Node, NodeError};

// -----------------------------------------------------------------------------
// Direction

/// Which half of the codec raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Encode,
    Decode,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => f.write_str("encode"),
            Self::Decode => f.write_str("decode"),
        }
    }
}

// -----------------------------------------------------------------------------
// CodecError

/// Errors raised while encoding or decoding.
///
/// A failure aborts the whole operation. Errors raised below a contract
/// member or a sequence element are wrapped in [`CodecError::Member`] and
/// [`CodecError::Element`] so the message points at the failing location;
/// [`CodecError::root_cause`] strips those wrappers again.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// A type tag names a type the registry does not know.
    #[error("type tag `{tag}` does not name a registered type")]
    UnresolvedTypeTag { tag: String },

    /// Every discovery probe failed for a type.
    #[error("no {direction} strategy for type `{type_path}`")]
    UnsupportedType {
        type_path: &'static str,
        direction: Direction,
    },

    /// A node does not have the shape its target type needs.
    #[error("malformed node `{node}`: {reason}")]
    MalformedNode { node: String, reason: String },

    /// A node with content was decoded into an untyped target without a type tag.
    #[error("node `{node}` has content but no type tag to decode an untyped value")]
    AmbiguousAny { node: String },

    /// A null was written into a `Box<dyn Value>` slot.
    ///
    /// The slot would be left empty and untagged, which cannot be decoded.
    /// Declare the slot as `Option<Box<dyn Value>>` instead.
    #[error("null `{type_path}` in an untyped slot, use `Option<Box<dyn Value>>` for optional values")]
    NullInDynamicSlot { type_path: &'static str },

    /// Nesting went deeper than the configured limit.
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthExceeded { limit: usize },

    /// An instance was needed but neither the factory nor a default constructor produced one.
    #[error("cannot create an instance of `{type_path}`: no factory result and no default")]
    NoDefault { type_path: &'static str },

    /// A handler received or produced a value of the wrong type.
    #[error("type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A fixed-size sequence was built from the wrong number of items.
    #[error("expected {expected} items, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A node could not be created.
    #[error(transparent)]
    Node(#[from] NodeError),

    /// Raised while processing a contract member.
    #[error("in member `{member}` of `{owner}`: {source}")]
    Member {
        owner: &'static str,
        member: &'static str,
        #[source]
        source: Box<CodecError>,
    },

    /// Raised while processing a sequence element.
    #[error("in element {index} of `{owner}`: {source}")]
    Element {
        owner: &'static str,
        index: usize,
        #[source]
        source: Box<CodecError>,
    },
}

/// Shorthand for `Result<T, CodecError>`.
pub type CodecResult<T> = Result<T, CodecError>;

impl CodecError {
    /// Creates a [`CodecError::MalformedNode`] for `node`.
    pub fn malformed(node: &Node, reason: impl fmt::Display) -> Self {
        Self::MalformedNode {
            node: node.name().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a [`CodecError::TypeMismatch`].
    #[inline]
    pub const fn mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch { expected, found }
    }

    /// Creates a [`CodecError::UnsupportedType`].
    #[inline]
    pub const fn unsupported(type_path: &'static str, direction: Direction) -> Self {
        Self::UnsupportedType {
            type_path,
            direction,
        }
    }

    pub(crate) fn in_member(self, owner: &'static str, member: &'static str) -> Self {
        Self::Member {
            owner,
            member,
            source: Box::new(self),
        }
    }

    pub(crate) fn in_element(self, owner: &'static str, index: usize) -> Self {
        Self::Element {
            owner,
            index,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping member and element context.
    pub fn root_cause(&self) -> &CodecError {
        let mut err = self;
        while let Self::Member { source, .. } | Self::Element { source, .. } = err {
            err = &**source;
        }
        err
    }
}
