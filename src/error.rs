//! Error types for the B-tree index.

use thiserror::Error;

/// Result type alias for tree operations
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors that can occur when configuring or mutating a tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Tree constructed with a minimum degree below 2
    #[error("invalid configuration: minimum degree must be at least 2, got {min_degree}")]
    InvalidConfiguration { min_degree: usize },

    /// Strict insertion of a key that is already present
    #[error("duplicate key")]
    DuplicateKey,
}
