//! # B-tree Index
//!
//! An in-memory ordered key index built on a B-tree of configurable
//! minimum degree `t`. Every non-root node holds between `t - 1` and
//! `2t - 1` keys, all leaves sit at the same depth, and search, insert,
//! and delete each walk a single root-to-leaf path.
//!
//! ## Architecture
//!
//! The crate is composed of small, layered components:
//!
//! - **Node Layer** (`btree::node`): key/child storage plus the
//!   split/merge/borrow structural primitives
//! - **Tree Layer** (`btree::tree`): single-pass descent logic for
//!   search, insert, and delete, with proactive rebalancing
//! - **Traversal** (`btree::iter`): lazy, restartable in-order iteration
//! - **Shared Handle** (`Index`): lock-serialized access for owners that
//!   share one tree across threads
//!
//! ## Usage
//!
//! ```rust,ignore
//! use btree_index::BTree;
//!
//! let mut tree = BTree::new(2)?;
//!
//! // Insert some keys
//! tree.insert(10);
//! tree.insert(20);
//!
//! // Look one up
//! assert!(tree.contains(&10));
//!
//! // Walk all keys in ascending order
//! for key in &tree {
//!     println!("{key}");
//! }
//!
//! // Delete a key
//! assert!(tree.delete(&10));
//! ```

pub mod btree;
pub mod error;
pub mod types;

pub use error::{Result, TreeError};
pub use types::{BTreeConfig, TreeNode, DEFAULT_MIN_DEGREE, MIN_DEGREE_FLOOR};

// Re-export main public API
pub use btree::{BTree, Iter};

use parking_lot::RwLock;

/// Shared handle to a B-tree, serializing all access with a lock
///
/// The tree itself provides no internal synchronization: splits and
/// merges rewire parent/child links in ways that must never interleave.
/// This handle is the external exclusive lock for owners that share one
/// tree between threads; lookups take the read lock, mutations the
/// write lock.
pub struct Index<K> {
    tree: RwLock<BTree<K>>,
}

impl<K: Ord> Index<K> {
    /// Create an index with the given minimum degree
    pub fn new(min_degree: usize) -> Result<Self> {
        Self::with_config(BTreeConfig::new(min_degree))
    }

    /// Create an index from a configuration
    pub fn with_config(config: BTreeConfig) -> Result<Self> {
        Ok(Self {
            tree: RwLock::new(BTree::with_config(config)?),
        })
    }

    /// Check whether a key is present
    pub fn contains(&self, key: &K) -> bool {
        self.tree.read().contains(key)
    }

    /// Insert a key, rejecting duplicates as a no-op
    ///
    /// Returns `true` if the key was inserted.
    pub fn insert(&self, key: K) -> bool {
        self.tree.write().insert(key)
    }

    /// Insert a key, signalling a duplicate explicitly
    pub fn try_insert(&self, key: K) -> Result<()> {
        self.tree.write().try_insert(key)
    }

    /// Delete a key
    ///
    /// Returns `true` if the key existed and was removed.
    pub fn delete(&self, key: &K) -> bool {
        self.tree.write().delete(key)
    }

    /// Remove all keys
    pub fn clear(&self) {
        self.tree.write().clear()
    }

    /// Snapshot all keys in ascending order
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.tree.read().iter().cloned().collect()
    }

    /// Get statistics about the index
    pub fn stats(&self) -> IndexStats {
        let tree = self.tree.read();
        IndexStats {
            key_count: tree.len(),
            height: tree.height(),
            min_degree: tree.min_degree(),
        }
    }

    /// Export the tree structure for visualization
    pub fn export_tree(&self) -> TreeNode<K>
    where
        K: Clone,
    {
        self.tree.read().export()
    }
}

/// Index statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of keys stored
    pub key_count: usize,
    /// Height of the B-tree (1 for a lone leaf root)
    pub height: usize,
    /// Configured minimum degree
    pub min_degree: usize,
}
