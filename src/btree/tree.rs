//! B-tree core implementation.
//!
//! This module provides the main BTree struct with operations for:
//! - get/contains: Point lookups
//! - insert: Keyed insertion with proactive splitting
//! - delete: Removal with borrow/merge rebalancing
//! - iter: Lazy in-order traversal
//!
//! Every operation enters at the root and walks a single root-to-leaf
//! path, so each call visits O(log n) nodes. Insert splits any full
//! child *before* descending into it; delete guarantees every child it
//! descends into holds at least `t` keys. Neither ever needs to walk
//! back up to repair an ancestor.

use std::fmt;

use crate::btree::iter::Iter;
use crate::btree::node::Node;
use crate::error::{Result, TreeError};
use crate::types::{BTreeConfig, TreeNode};

/// An in-memory B-tree holding a set of ordered keys
pub struct BTree<K> {
    /// Root node; replaced wholesale when the tree grows or shrinks in height
    root: Box<Node<K>>,
    /// Occupancy configuration, fixed at construction
    config: BTreeConfig,
    /// Number of keys currently stored
    len: usize,
    /// Number of node levels (1 for a lone leaf root)
    height: usize,
}

impl<K: Ord> BTree<K> {
    /// Create an empty tree with the given minimum degree
    ///
    /// Fails with [`TreeError::InvalidConfiguration`] if `min_degree < 2`.
    pub fn new(min_degree: usize) -> Result<Self> {
        Self::with_config(BTreeConfig::new(min_degree))
    }

    /// Create an empty tree from a configuration
    pub fn with_config(config: BTreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            root: Box::new(Node::new_leaf(&config)),
            config,
            len: 0,
            height: 1,
        })
    }

    /// Get the tree's configuration
    pub fn config(&self) -> BTreeConfig {
        self.config
    }

    /// Get the minimum degree `t`
    pub fn min_degree(&self) -> usize {
        self.config.min_degree
    }

    /// Number of keys in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of node levels; 1 for a tree that is a single leaf
    pub fn height(&self) -> usize {
        self.height
    }

    /// Look up a key, returning a reference to the stored key if present
    pub fn get(&self, key: &K) -> Option<&K> {
        let mut node = self.root.as_ref();
        loop {
            match node.keys.binary_search(key) {
                Ok(idx) => return Some(&node.keys[idx]),
                Err(idx) => {
                    if node.leaf {
                        return None;
                    }
                    node = &node.children[idx];
                }
            }
        }
    }

    /// Check whether a key is present
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Insert a key, rejecting duplicates as a no-op
    ///
    /// Returns `true` if the key was inserted, `false` if it was already
    /// present (the stored key set is unchanged either way).
    pub fn insert(&mut self, key: K) -> bool {
        self.try_insert(key).is_ok()
    }

    /// Insert a key, signalling a duplicate explicitly
    ///
    /// A rejected duplicate is an exact no-op: the tree structure is
    /// probed first, so no proactive split runs for a key that will be
    /// refused.
    pub fn try_insert(&mut self, key: K) -> Result<()> {
        if self.contains(&key) {
            return Err(TreeError::DuplicateKey);
        }

        if self.root.is_full(&self.config) {
            // The only way the tree grows in height: push a fresh root
            // above the old one and split the old root under it.
            let old_root = std::mem::replace(&mut self.root, Box::new(Node::new_leaf(&self.config)));
            let mut new_root = Node::new_root_over(old_root, &self.config);
            new_root.split_child(0, &self.config);
            self.root = Box::new(new_root);
            self.height += 1;
        }

        insert_non_full(&mut self.root, key, &self.config)?;
        self.len += 1;
        Ok(())
    }

    /// Delete a key from the tree
    ///
    /// Returns `true` if the key was found and removed. An absent key is
    /// a no-op returning `false`; the tree is left untouched.
    pub fn delete(&mut self, key: &K) -> bool {
        // An absent key must leave the tree untouched, so probe before
        // the mutating descent applies any borrow/merge fix-up.
        if !self.contains(key) {
            return false;
        }

        let removed = delete_from(&mut self.root, key, &self.config);
        debug_assert!(removed, "probed key vanished during descent");
        self.len -= 1;

        // The only way the tree shrinks in height: a merge emptied the
        // root, leaving its single remaining child as the new root.
        if self.root.keys.is_empty() && !self.root.leaf {
            let new_root = self.root.children.remove(0);
            self.root = new_root;
            self.height -= 1;
        }
        true
    }

    /// Remove all keys, resetting to a single empty leaf root
    pub fn clear(&mut self) {
        self.root = Box::new(Node::new_leaf(&self.config));
        self.len = 0;
        self.height = 1;
    }

    /// Iterate over all keys in ascending order
    ///
    /// The iterator borrows the tree and is lazy; it can be recreated
    /// from the root at any time since traversal never mutates.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.root, self.len)
    }

    /// Export the tree structure for visualization
    pub fn export(&self) -> TreeNode<K>
    where
        K: Clone,
    {
        export_node(&self.root)
    }

    #[cfg(test)]
    pub(crate) fn root_node(&self) -> &Node<K> {
        &self.root
    }
}

impl<'a, K: Ord> IntoIterator for &'a BTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord + fmt::Debug> fmt::Display for BTree<K> {
    /// Render one line per node, indented two spaces per level
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_node(&self.root, 0, f)
    }
}

fn fmt_node<K: fmt::Debug>(node: &Node<K>, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for _ in 0..depth {
        write!(f, "  ")?;
    }
    for key in &node.keys {
        write!(f, "{:?} ", key)?;
    }
    writeln!(f)?;
    for child in &node.children {
        fmt_node(child, depth + 1, f)?;
    }
    Ok(())
}

fn export_node<K: Clone>(node: &Node<K>) -> TreeNode<K> {
    TreeNode {
        is_leaf: node.leaf,
        keys: node.keys.clone(),
        children: node.children.iter().map(|c| export_node(c)).collect(),
    }
}

/// Recursive insert into a node known to have room
///
/// Any full child is split before descent, so the leaf finally reached
/// always has a free slot.
fn insert_non_full<K: Ord>(node: &mut Node<K>, key: K, config: &BTreeConfig) -> Result<()> {
    match node.keys.binary_search(&key) {
        Ok(_) => Err(TreeError::DuplicateKey),
        Err(mut idx) => {
            if node.leaf {
                node.keys.insert(idx, key);
                return Ok(());
            }

            if node.children[idx].is_full(config) {
                node.split_child(idx, config);
                // Re-choose against the promoted median.
                match key.cmp(&node.keys[idx]) {
                    std::cmp::Ordering::Less => {}
                    std::cmp::Ordering::Greater => idx += 1,
                    std::cmp::Ordering::Equal => return Err(TreeError::DuplicateKey),
                }
            }
            insert_non_full(&mut node.children[idx], key, config)
        }
    }
}

/// Recursive delete from a node holding at least `t` keys (or the root)
///
/// Returns `true` if the key was found and removed somewhere in this
/// subtree.
fn delete_from<K: Ord>(node: &mut Node<K>, key: &K, config: &BTreeConfig) -> bool {
    let t = config.min_degree;
    match node.keys.binary_search(key) {
        Ok(idx) => {
            if node.leaf {
                node.keys.remove(idx);
                true
            } else if node.children[idx].keys.len() >= t {
                // Replace with the in-order predecessor pulled out of
                // the left subtree.
                let pred = remove_max(&mut node.children[idx], config);
                node.keys[idx] = pred;
                true
            } else if node.children[idx + 1].keys.len() >= t {
                let succ = remove_min(&mut node.children[idx + 1], config);
                node.keys[idx] = succ;
                true
            } else {
                // Neither neighbor can spare a key: pull this key down
                // into the merged child and delete it there.
                node.merge_children(idx);
                delete_from(&mut node.children[idx], key, config)
            }
        }
        Err(idx) => {
            if node.leaf {
                return false;
            }
            let idx = node.fill_child(idx, config);
            delete_from(&mut node.children[idx], key, config)
        }
    }
}

/// Remove and return the maximum key of a subtree whose root holds at
/// least `t` keys
fn remove_max<K: Ord>(node: &mut Node<K>, config: &BTreeConfig) -> K {
    if node.leaf {
        return node.keys.remove(node.keys.len() - 1);
    }
    let last = node.children.len() - 1;
    let idx = node.fill_child(last, config);
    remove_max(&mut node.children[idx], config)
}

/// Remove and return the minimum key of a subtree whose root holds at
/// least `t` keys
fn remove_min<K: Ord>(node: &mut Node<K>, config: &BTreeConfig) -> K {
    if node.leaf {
        return node.keys.remove(0);
    }
    let idx = node.fill_child(0, config);
    remove_min(&mut node.children[idx], config)
}
