//! Tree analysis operations: depth, node counts, type checks, and traversal.

use super::error::RegionError;
use super::key::{AxisKey, PositionMap};
use super::region::Region;
use super::RegionNode;
use std::collections::HashSet;
use std::sync::Arc;

impl<K: AxisKey> RegionNode<K> {
    /// Returns the depth of this region tree.
    ///
    /// - Leaf nodes have depth 1
    /// - Combinators have depth = 1 + max(child depths)
    pub fn depth(&self) -> usize {
        match self.children() {
            None => 1,
            Some((left, right)) => 1 + left.depth().max(right.depth()),
        }
    }

    /// Returns the total number of nodes in this region tree.
    pub fn node_count(&self) -> usize {
        match self.children() {
            None => 1,
            Some((left, right)) => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Returns the number of leaf nodes in this region tree.
    pub fn leaf_count(&self) -> usize {
        match self.children() {
            None => 1,
            Some((left, right)) => left.leaf_count() + right.leaf_count(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, RegionNode::Leaf(_))
    }

    pub fn is_union(&self) -> bool {
        matches!(self, RegionNode::Union(..))
    }

    pub fn is_intersection(&self) -> bool {
        matches!(self, RegionNode::Intersection(..))
    }

    pub fn is_difference(&self) -> bool {
        matches!(self, RegionNode::Difference(..))
    }

    pub fn is_symmetric_difference(&self) -> bool {
        matches!(self, RegionNode::SymmetricDifference(..))
    }

    /// Returns `(left, right)` if this is a combinator node.
    pub fn children(&self) -> Option<(&RegionNode<K>, &RegionNode<K>)> {
        match self {
            RegionNode::Leaf(_) => None,
            RegionNode::Union(left, right)
            | RegionNode::Intersection(left, right)
            | RegionNode::Difference(left, right)
            | RegionNode::SymmetricDifference(left, right) => Some((&**left, &**right)),
        }
    }

    /// Visits all nodes in the tree in pre-order (depth-first, left first).
    pub fn visit_preorder<F>(&self, visitor: &mut F)
    where
        F: FnMut(&RegionNode<K>),
    {
        visitor(self);
        if let Some((left, right)) = self.children() {
            left.visit_preorder(visitor);
            right.visit_preorder(visitor);
        }
    }

    /// Visits all leaf regions in the tree, left to right.
    pub fn visit_leaves<F>(&self, visitor: &mut F)
    where
        F: FnMut(&Arc<dyn Region<K>>),
    {
        match self {
            RegionNode::Leaf(region) => visitor(region),
            _ => {
                if let Some((left, right)) = self.children() {
                    left.visit_leaves(visitor);
                    right.visit_leaves(visitor);
                }
            }
        }
    }

    /// Every axis key read anywhere in the tree.
    pub fn axis_keys(&self) -> HashSet<K> {
        let mut keys = HashSet::new();
        self.visit_leaves(&mut |region| keys.extend(region.axis_keys()));
        keys
    }

    /// Fails with [`RegionError::MissingAxisKey`] if `positions` lacks any
    /// key the tree reads, without evaluating anything.
    pub fn check_positions(&self, positions: &PositionMap<K>) -> Result<(), RegionError> {
        let mut missing = None;
        self.visit_leaves(&mut |region| {
            if missing.is_some() {
                return;
            }
            missing = region
                .axis_keys()
                .into_iter()
                .find(|key| !positions.contains_key(key))
                .map(|key| RegionError::MissingAxisKey {
                    region: region.stringify(),
                    key: format!("{key:?}"),
                });
        });
        missing.map_or(Ok(()), Err)
    }
}
