//! B-tree implementation.
//!
//! This module provides an in-memory B-tree that supports:
//! - Point lookups (get/contains)
//! - Insertions (insert/try_insert)
//! - Deletions (delete)
//! - In-order traversal (iter)

mod iter;
mod node;
mod tree;

pub use iter::Iter;
pub use tree::BTree;
