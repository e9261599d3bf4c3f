//! Lazy in-order traversal over a B-tree.
//!
//! The iterator keeps an explicit stack of (node, next key index)
//! frames for the path from the root to the current position. A frame
//! at index `i` means children `0..=i` of that node have already been
//! visited and `keys[i]` is the next key it owes.

use std::iter::FusedIterator;

use crate::btree::node::Node;

/// Borrowing iterator over a tree's keys in ascending order
pub struct Iter<'a, K> {
    /// Path from the root to the current position
    stack: Vec<(&'a Node<K>, usize)>,
    /// Keys not yet yielded
    remaining: usize,
}

impl<'a, K: Ord> Iter<'a, K> {
    pub(crate) fn new(root: &'a Node<K>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        if len > 0 {
            iter.descend_to_leftmost(root);
        }
        iter
    }

    /// Push the path to the leftmost leaf of `node` onto the stack
    fn descend_to_leftmost(&mut self, mut node: &'a Node<K>) {
        loop {
            self.stack.push((node, 0));
            if node.leaf {
                return;
            }
            node = &node.children[0];
        }
    }
}

impl<'a, K: Ord> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        loop {
            let (node, idx) = self.stack.last_mut()?;
            let node = *node;

            if *idx < node.keys.len() {
                let i = *idx;
                *idx += 1;
                if !node.leaf {
                    self.descend_to_leftmost(&node.children[i + 1]);
                }
                self.remaining -= 1;
                return Some(&node.keys[i]);
            }

            // Node exhausted; resume in its parent.
            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Ord> ExactSizeIterator for Iter<'_, K> {}

impl<K: Ord> FusedIterator for Iter<'_, K> {}

#[cfg(test)]
mod tests {
    use crate::btree::BTree;
    use crate::error::Result;

    #[test]
    fn test_iterator_is_lazy_and_restartable() -> Result<()> {
        let mut tree = BTree::new(2)?;
        for key in [4, 2, 6, 1, 3, 5, 7] {
            tree.insert(key);
        }

        let mut first = tree.iter();
        assert_eq!(first.next(), Some(&1));
        assert_eq!(first.next(), Some(&2));

        // A fresh traversal starts over from the root.
        let second: Vec<i32> = tree.iter().copied().collect();
        assert_eq!(second, vec![1, 2, 3, 4, 5, 6, 7]);

        let rest: Vec<i32> = first.copied().collect();
        assert_eq!(rest, vec![3, 4, 5, 6, 7]);
        Ok(())
    }

    #[test]
    fn test_exact_size() -> Result<()> {
        let mut tree = BTree::new(3)?;
        for key in 0..40 {
            tree.insert(key);
        }

        let mut iter = tree.iter();
        assert_eq!(iter.len(), 40);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 38);
        assert_eq!(iter.size_hint(), (38, Some(38)));
        Ok(())
    }

    #[test]
    fn test_into_iterator_for_ref() -> Result<()> {
        let mut tree = BTree::new(2)?;
        for key in [3, 1, 2] {
            tree.insert(key);
        }

        let mut seen = Vec::new();
        for key in &tree {
            seen.push(*key);
        }
        assert_eq!(seen, vec![1, 2, 3]);
        Ok(())
    }
}
