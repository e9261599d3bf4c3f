//! Common types used throughout the index.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TreeError};

/// Smallest legal minimum degree (t). A B-tree with t < 2 cannot split.
pub const MIN_DEGREE_FLOOR: usize = 2;

/// Default minimum degree (visualization-friendly: nodes hold 1..=3 keys)
pub const DEFAULT_MIN_DEGREE: usize = 2;

/// B-tree configuration for customizable node occupancy
///
/// The minimum degree `t` fixes every node's key count to `[t-1, 2t-1]`
/// (the root may hold fewer) and an internal node's child count to
/// `[t, 2t]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BTreeConfig {
    /// Minimum degree `t`, fixed at construction
    pub min_degree: usize,
}

impl Default for BTreeConfig {
    fn default() -> Self {
        Self {
            min_degree: DEFAULT_MIN_DEGREE,
        }
    }
}

impl BTreeConfig {
    /// Create a new config with a custom minimum degree
    pub fn new(min_degree: usize) -> Self {
        Self { min_degree }
    }

    /// Check that the configured degree is usable
    pub fn validate(&self) -> Result<()> {
        if self.min_degree < MIN_DEGREE_FLOOR {
            return Err(TreeError::InvalidConfiguration {
                min_degree: self.min_degree,
            });
        }
        Ok(())
    }

    /// Minimum keys per non-root node (`t - 1`)
    pub fn min_keys(&self) -> usize {
        self.min_degree - 1
    }

    /// Maximum keys per node (`2t - 1`)
    pub fn max_keys(&self) -> usize {
        2 * self.min_degree - 1
    }

    /// Maximum children per internal node (`2t`)
    pub fn max_children(&self) -> usize {
        2 * self.min_degree
    }
}

/// Node type for visualization
///
/// A plain owned snapshot of one tree node and its subtree, detached from
/// the live tree so it can be serialized or inspected freely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode<K> {
    /// Whether this is a leaf node
    pub is_leaf: bool,
    /// Keys in this node, in ascending order
    pub keys: Vec<K>,
    /// Child subtrees (empty for leaves)
    pub children: Vec<TreeNode<K>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_capacities() {
        let config = BTreeConfig::new(3);
        assert_eq!(config.min_keys(), 2);
        assert_eq!(config.max_keys(), 5);
        assert_eq!(config.max_children(), 6);
    }

    #[test]
    fn test_config_validation() {
        assert!(BTreeConfig::default().validate().is_ok());
        assert_eq!(
            BTreeConfig::new(1).validate(),
            Err(TreeError::InvalidConfiguration { min_degree: 1 })
        );
        assert_eq!(
            BTreeConfig::new(0).validate(),
            Err(TreeError::InvalidConfiguration { min_degree: 0 })
        );
    }
}
