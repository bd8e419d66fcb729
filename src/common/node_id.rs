//! Node handle type.

use std::fmt;

/// Identifies a node slot in the tree's arena.
///
/// Using `usize` because:
/// 1. Nodes are stored in `Vec<Node>`
/// 2. Direct indexing without casting: `slots[node_id.0]`
/// 3. Matches Rust idioms for array/vector indexing
///
/// Slot 0 is permanently reserved for the tree's sentinel, so
/// [`NodeId::SENTINEL`] doubles as the "no node" / "not found" value.
/// Every link field in the tree holds a `NodeId` — never an option —
/// which keeps the rebalancing algorithms free of emptiness checks.
///
/// # Example
/// ```
/// use rbindex::NodeId;
///
/// let id = NodeId::new(5);
/// assert!(!id.is_sentinel());
/// assert!(NodeId::SENTINEL.is_sentinel());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The reserved sentinel slot.
    ///
    /// Stands in for every empty child link, for the parent of the
    /// root, and for the "not found" result of a search.
    pub const SENTINEL: NodeId = NodeId(0);

    /// Create a new NodeId.
    #[inline]
    pub fn new(id: usize) -> Self {
        NodeId(id)
    }

    /// Check whether this handle is the sentinel.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sentinel() {
            write!(f, "Node(SENTINEL)")
        } else {
            write!(f, "Node({})", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_new() {
        let id = NodeId::new(10);
        assert_eq!(id.0, 10);
    }

    #[test]
    fn test_node_id_equality() {
        assert_eq!(NodeId::new(5), NodeId::new(5));
        assert_ne!(NodeId::new(5), NodeId::new(6));
    }

    #[test]
    fn test_sentinel_is_slot_zero() {
        assert_eq!(NodeId::SENTINEL, NodeId::new(0));
        assert!(NodeId::SENTINEL.is_sentinel());
        assert!(!NodeId::new(1).is_sentinel());
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(format!("{}", NodeId::new(42)), "Node(42)");
        assert_eq!(format!("{}", NodeId::SENTINEL), "Node(SENTINEL)");
    }
}
