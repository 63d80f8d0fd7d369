use thiserror::Error;

/// Errors raised while building a [`Node`](crate::Node).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NodeError {
    /// Node names must be non-empty.
    #[error("node name must not be empty")]
    EmptyName,
}
