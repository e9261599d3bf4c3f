//! B-tree node representation and structural primitives.
//!
//! A node owns its keys and (for internal nodes) its children outright;
//! there are no parent back-references. All structural surgery on a
//! subtree (split, merge, borrow) is expressed as a method on the
//! *parent* node, which is the only holder of a mutable reference to
//! the children involved.

use crate::types::BTreeConfig;

/// A single B-tree node
///
/// Invariants (enforced by the tree, checked in tests):
/// - `keys` is strictly ascending with no duplicates
/// - `children` is empty iff `leaf` is true
/// - for internal nodes, `children.len() == keys.len() + 1`
pub(crate) struct Node<K> {
    /// Keys in ascending order
    pub(crate) keys: Vec<K>,
    /// Child subtrees; `children[i]` brackets below `keys[i]`
    pub(crate) children: Vec<Box<Node<K>>>,
    /// Whether this node is a leaf
    pub(crate) leaf: bool,
}

impl<K: Ord> Node<K> {
    /// Create an empty leaf node with capacity for a full complement of keys
    pub(crate) fn new_leaf(config: &BTreeConfig) -> Self {
        Self {
            keys: Vec::with_capacity(config.max_keys()),
            children: Vec::new(),
            leaf: true,
        }
    }

    /// Create a new internal root above `child` (used when the root splits)
    pub(crate) fn new_root_over(child: Box<Node<K>>, config: &BTreeConfig) -> Self {
        let mut children = Vec::with_capacity(config.max_children());
        children.push(child);
        Self {
            keys: Vec::with_capacity(config.max_keys()),
            children,
            leaf: false,
        }
    }

    /// Whether this node holds the maximum `2t - 1` keys
    pub(crate) fn is_full(&self, config: &BTreeConfig) -> bool {
        self.keys.len() >= config.max_keys()
    }

    /// Split the full child at `idx` into two half-full siblings,
    /// promoting its median key into this node at `idx`.
    ///
    /// The child must hold exactly `2t - 1` keys. Afterwards both halves
    /// hold `t - 1` keys and this node has gained one key and one child.
    pub(crate) fn split_child(&mut self, idx: usize, config: &BTreeConfig) {
        let t = config.min_degree;
        let child = &mut self.children[idx];
        debug_assert_eq!(child.keys.len(), config.max_keys());

        // Upper t-1 keys (and upper t children) move to the new sibling;
        // the median at t-1 moves up into this node.
        let upper_keys = child.keys.split_off(t);
        let median = child.keys.remove(t - 1);
        let upper_children = if child.leaf {
            Vec::new()
        } else {
            child.children.split_off(t)
        };

        let sibling = Box::new(Node {
            keys: upper_keys,
            children: upper_children,
            leaf: child.leaf,
        });

        self.keys.insert(idx, median);
        self.children.insert(idx + 1, sibling);
    }

    /// Merge the child at `idx` with its right sibling, pulling the
    /// separating key at `idx` down between them.
    ///
    /// Both children must hold `t - 1` keys; the merged node ends with
    /// `2t - 1`. The right sibling is consumed.
    pub(crate) fn merge_children(&mut self, idx: usize) {
        let separator = self.keys.remove(idx);
        let mut right = self.children.remove(idx + 1);
        let left = &mut self.children[idx];

        left.keys.push(separator);
        left.keys.append(&mut right.keys);
        if !left.leaf {
            left.children.append(&mut right.children);
        }
    }

    /// Rotate one key from the left sibling through this node into the
    /// child at `idx` (which is at minimum occupancy).
    pub(crate) fn borrow_from_left(&mut self, idx: usize) {
        let (head, tail) = self.children.split_at_mut(idx);
        let left = &mut head[idx - 1];
        let child = &mut tail[0];

        let moved_key = left.keys.remove(left.keys.len() - 1);
        let separator = std::mem::replace(&mut self.keys[idx - 1], moved_key);
        child.keys.insert(0, separator);

        if !child.leaf {
            let moved_child = left.children.remove(left.children.len() - 1);
            child.children.insert(0, moved_child);
        }
    }

    /// Rotate one key from the right sibling through this node into the
    /// child at `idx` (which is at minimum occupancy).
    pub(crate) fn borrow_from_right(&mut self, idx: usize) {
        let (head, tail) = self.children.split_at_mut(idx + 1);
        let child = &mut head[idx];
        let right = &mut tail[0];

        let moved_key = right.keys.remove(0);
        let separator = std::mem::replace(&mut self.keys[idx], moved_key);
        child.keys.push(separator);

        if !child.leaf {
            let moved_child = right.children.remove(0);
            child.children.push(moved_child);
        }
    }

    /// Ensure the child at `idx` holds at least `t` keys before a delete
    /// descends into it, borrowing from an adjacent sibling when one has
    /// keys to spare and merging otherwise.
    ///
    /// Returns the index of the (possibly merged) child to descend into.
    pub(crate) fn fill_child(&mut self, idx: usize, config: &BTreeConfig) -> usize {
        let t = config.min_degree;
        if self.children[idx].keys.len() >= t {
            return idx;
        }

        if idx > 0 && self.children[idx - 1].keys.len() >= t {
            self.borrow_from_left(idx);
            idx
        } else if idx + 1 < self.children.len() && self.children[idx + 1].keys.len() >= t {
            self.borrow_from_right(idx);
            idx
        } else if idx > 0 {
            // Deficient child is the rightmost of the pair
            self.merge_children(idx - 1);
            idx - 1
        } else {
            self.merge_children(idx);
            idx
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_with(keys: Vec<i32>) -> Box<Node<i32>> {
        Box::new(Node {
            keys,
            children: Vec::new(),
            leaf: true,
        })
    }

    #[test]
    fn test_split_child_promotes_median() {
        let config = BTreeConfig::new(2);
        let mut parent = Node {
            keys: vec![100],
            children: vec![leaf_with(vec![10, 20, 30]), leaf_with(vec![200])],
            leaf: false,
        };

        parent.split_child(0, &config);

        assert_eq!(parent.keys, vec![20, 100]);
        assert_eq!(parent.children.len(), 3);
        assert_eq!(parent.children[0].keys, vec![10]);
        assert_eq!(parent.children[1].keys, vec![30]);
        assert_eq!(parent.children[2].keys, vec![200]);
    }

    #[test]
    fn test_split_internal_child_moves_children() {
        let config = BTreeConfig::new(2);
        let grandchildren: Vec<Box<Node<i32>>> = vec![
            leaf_with(vec![5]),
            leaf_with(vec![15]),
            leaf_with(vec![25]),
            leaf_with(vec![35]),
        ];
        let full_internal = Box::new(Node {
            keys: vec![10, 20, 30],
            children: grandchildren,
            leaf: false,
        });
        let mut parent = Node {
            keys: vec![],
            children: vec![full_internal],
            leaf: false,
        };

        parent.split_child(0, &config);

        assert_eq!(parent.keys, vec![20]);
        assert_eq!(parent.children[0].keys, vec![10]);
        assert_eq!(parent.children[0].children.len(), 2);
        assert_eq!(parent.children[1].keys, vec![30]);
        assert_eq!(parent.children[1].children.len(), 2);
    }

    #[test]
    fn test_merge_children_pulls_separator_down() {
        let mut parent = Node {
            keys: vec![20],
            children: vec![leaf_with(vec![10]), leaf_with(vec![30])],
            leaf: false,
        };

        parent.merge_children(0);

        assert!(parent.keys.is_empty());
        assert_eq!(parent.children.len(), 1);
        assert_eq!(parent.children[0].keys, vec![10, 20, 30]);
    }

    #[test]
    fn test_borrow_rotates_through_parent() {
        let mut parent = Node {
            keys: vec![20],
            children: vec![leaf_with(vec![5, 10]), leaf_with(vec![30])],
            leaf: false,
        };

        parent.borrow_from_left(1);

        assert_eq!(parent.keys, vec![10]);
        assert_eq!(parent.children[0].keys, vec![5]);
        assert_eq!(parent.children[1].keys, vec![20, 30]);
    }

    #[test]
    fn test_fill_child_prefers_borrow_over_merge() {
        let config = BTreeConfig::new(2);
        let mut parent = Node {
            keys: vec![20, 40],
            children: vec![
                leaf_with(vec![10]),
                leaf_with(vec![30]),
                leaf_with(vec![50, 60]),
            ],
            leaf: false,
        };

        // Right sibling has a spare key, so no merge happens.
        let idx = parent.fill_child(1, &config);
        assert_eq!(idx, 1);
        assert_eq!(parent.children.len(), 3);
        assert_eq!(parent.children[1].keys, vec![30, 40]);
        assert_eq!(parent.keys, vec![20, 50]);
    }

    #[test]
    fn test_fill_child_merges_when_no_sibling_can_spare() {
        let config = BTreeConfig::new(2);
        let mut parent = Node {
            keys: vec![20],
            children: vec![leaf_with(vec![10]), leaf_with(vec![30])],
            leaf: false,
        };

        let idx = parent.fill_child(1, &config);
        assert_eq!(idx, 0);
        assert_eq!(parent.children.len(), 1);
        assert_eq!(parent.children[0].keys, vec![10, 20, 30]);
    }
}
