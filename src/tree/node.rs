//! Node slot representation.
//!
//! A [`Node`] is one slot in the tree's arena. Its link fields are
//! [`NodeId`]s that always hold a value — an empty child link points at
//! the sentinel slot rather than being optional — which is what lets the
//! rebalancing algorithms run without emptiness checks.

use crate::common::NodeId;

/// Node color. Red-black invariant 1: every node is one of these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Lifecycle state of an arena slot.
///
/// Tracked so that `insert` / `remove` can reject stale or reused
/// handles instead of corrupting the structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotState {
    /// The slot is on the arena's free list.
    Free,
    /// Allocated by `create_node` but not yet linked into the tree.
    Detached,
    /// Linked into the tree (or the sentinel itself).
    Attached,
}

/// One slot in the node arena.
///
/// `parent` does double duty: for a [`SlotState::Free`] slot it holds
/// the next entry of the intrusive free list instead of a tree link.
#[derive(Debug)]
pub(crate) struct Node {
    pub key: u64,
    pub color: Color,
    pub left: NodeId,
    pub right: NodeId,
    pub parent: NodeId,
    pub state: SlotState,
}

impl Node {
    /// A freshly allocated node: red, all links at the sentinel.
    ///
    /// New nodes are red by convention — a red insertion can only
    /// violate the "no red-red parent/child" invariant, never the
    /// black-height invariant, which keeps insertion fixup local.
    pub(crate) fn detached(key: u64) -> Self {
        Self {
            key,
            color: Color::Red,
            left: NodeId::SENTINEL,
            right: NodeId::SENTINEL,
            parent: NodeId::SENTINEL,
            state: SlotState::Detached,
        }
    }

    /// The sentinel slot: black, content never read.
    pub(crate) fn sentinel() -> Self {
        Self {
            key: 0,
            color: Color::Black,
            left: NodeId::SENTINEL,
            right: NodeId::SENTINEL,
            parent: NodeId::SENTINEL,
            state: SlotState::Attached,
        }
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub(crate) fn is_black(&self) -> bool {
        self.color == Color::Black
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_node_is_red_with_sentinel_links() {
        let node = Node::detached(42);
        assert_eq!(node.key, 42);
        assert!(node.is_red());
        assert_eq!(node.left, NodeId::SENTINEL);
        assert_eq!(node.right, NodeId::SENTINEL);
        assert_eq!(node.parent, NodeId::SENTINEL);
        assert_eq!(node.state, SlotState::Detached);
    }

    #[test]
    fn test_sentinel_is_black() {
        let s = Node::sentinel();
        assert!(s.is_black());
        assert!(!s.is_red());
    }
}
