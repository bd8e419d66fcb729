//! Independent invariant checker.
//!
//! Re-derives every red-black invariant by full traversal, without
//! trusting any cached state: colors legal at the root and sentinel, no
//! red node with a red child, equal black count on every root-to-leaf
//! path, parent links consistent with child links, in-order keys
//! non-decreasing, and reachable node count matching the tracked length.
//!
//! Primarily a test aid, but exposed publicly so embedding engines can
//! audit an index after a suspect operation sequence.

use crate::common::{Error, NodeId, Result};
use crate::tree::node::Color;
use crate::tree::rbtree::RedBlackTree;

/// Structural summary returned by a successful check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    /// Number of reachable nodes.
    pub node_count: usize,
    /// Black nodes on any path from the root down to and including the
    /// sentinel leaf.
    pub black_height: usize,
    /// Nodes on the longest root-to-leaf path (0 for an empty tree).
    pub height: usize,
}

impl RedBlackTree {
    /// Verify all five red-black invariants plus link and length
    /// consistency.
    ///
    /// O(n) traversal; never mutates the tree.
    ///
    /// # Errors
    /// Returns the structural [`Error`] variant describing the first
    /// violation found.
    pub fn check_invariants(&self) -> Result<TreeStats> {
        if self.color(NodeId::SENTINEL) != Color::Black {
            return Err(Error::SentinelNotBlack);
        }

        if self.root().is_sentinel() {
            if self.len() != 0 {
                return Err(Error::NodeCountMismatch {
                    expected: self.len(),
                    found: 0,
                });
            }
            return Ok(TreeStats {
                node_count: 0,
                black_height: 0,
                height: 0,
            });
        }

        if self.color(self.root()) != Color::Black {
            return Err(Error::RootNotBlack);
        }
        if !self.arena[self.root()].parent.is_sentinel() {
            return Err(Error::BrokenParentLink(self.root()));
        }

        let mut walk = Walk::default();
        let black_height = walk.check(self, self.root(), None, None, 1)?;

        if walk.node_count != self.len() {
            return Err(Error::NodeCountMismatch {
                expected: self.len(),
                found: walk.node_count,
            });
        }

        Ok(TreeStats {
            node_count: walk.node_count,
            black_height,
            height: walk.max_depth,
        })
    }
}

/// Accumulator for the recursive traversal.
#[derive(Default)]
struct Walk {
    node_count: usize,
    max_depth: usize,
}

impl Walk {
    /// Check the subtree rooted at `node`, returning its black-height:
    /// black nodes on any path down to the sentinel, counting the
    /// sentinel and excluding `node` itself.
    ///
    /// `low`/`high` are inclusive key bounds: rotations can move an
    /// equal key to either side of its duplicate, so only the
    /// non-decreasing in-order sequence is checkable, not strict BST
    /// ordering.
    fn check(
        &mut self,
        tree: &RedBlackTree,
        node: NodeId,
        low: Option<u64>,
        high: Option<u64>,
        depth: usize,
    ) -> Result<usize> {
        if node.is_sentinel() {
            // Leaf paths count the sentinel as one black node.
            return Ok(1);
        }

        self.node_count += 1;
        self.max_depth = self.max_depth.max(depth);

        let slot = &tree.arena[node];

        if low.is_some_and(|bound| slot.key < bound) || high.is_some_and(|bound| slot.key > bound) {
            return Err(Error::OutOfOrder(node));
        }

        for child in [slot.left, slot.right] {
            if !child.is_sentinel() {
                if tree.arena[child].parent != node {
                    return Err(Error::BrokenParentLink(child));
                }
                if slot.color == Color::Red && tree.arena[child].color == Color::Red {
                    return Err(Error::RedRedViolation(node));
                }
            }
        }

        let left = self.check(tree, slot.left, low, Some(slot.key), depth + 1)?;
        let right = self.check(tree, slot.right, Some(slot.key), high, depth + 1)?;
        if left != right {
            return Err(Error::BlackHeightMismatch { node, left, right });
        }

        Ok(left + usize::from(slot.color == Color::Black))
    }
}
