//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Errors raised by tree construction and traversal.
///
/// Every variant is a caller-input violation: the failing operation is
/// aborted before any mutation, so the tree keeps its prior state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("tree has no root")]
    NoRoot,

    #[error("no node with value {parent} in tree")]
    ParentNotFound { parent: String },

    #[error("node already has the maximum of {max_children} children")]
    CapacityExceeded { max_children: usize },

    #[error("child value type {found} does not match tree value type {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("maximum number of children must be positive")]
    ZeroArity,

    #[error("in-order traversal requires a binary tree, this tree allows {max_children} children")]
    InOrderRequiresBinary { max_children: usize },

    #[error("cursor is exhausted")]
    CursorExhausted,
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
