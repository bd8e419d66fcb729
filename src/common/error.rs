//! Error types for rbindex.

use thiserror::Error;

use crate::common::NodeId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in rbindex.
///
/// The tree has no recoverable failure modes of its own — every variant
/// here is a caller precondition surfaced as a typed error instead of
/// silent structural corruption. The `Handle misuse` group is returned
/// by `insert` / `remove`; the `Structural` group is only produced by
/// the invariant checker in [`crate::tree::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    // ------------------------------------------------------------------
    // Handle misuse
    // ------------------------------------------------------------------
    /// The handle is the sentinel or does not name a slot in the arena.
    #[error("invalid node handle: {0}")]
    InvalidHandle(NodeId),

    /// `insert` was given a node that is already linked into the tree.
    #[error("{0} is already attached to the tree")]
    AlreadyAttached(NodeId),

    /// `remove` was given a node that is not currently linked into the
    /// tree (never inserted, or its slot was recycled by an earlier
    /// removal).
    #[error("{0} is not attached to the tree")]
    NotAttached(NodeId),

    // ------------------------------------------------------------------
    // Structural violations (invariant checker only)
    // ------------------------------------------------------------------
    /// The root of a non-empty tree is red.
    #[error("root is not black")]
    RootNotBlack,

    /// The sentinel slot lost its black color.
    #[error("sentinel is not black")]
    SentinelNotBlack,

    /// A red node has a red child.
    #[error("red node {0} has a red child")]
    RedRedViolation(NodeId),

    /// Two root-to-leaf paths through this node cross different numbers
    /// of black nodes.
    #[error("black-height mismatch at {node}: left {left}, right {right}")]
    BlackHeightMismatch {
        node: NodeId,
        left: usize,
        right: usize,
    },

    /// A child's parent link does not point back at its actual parent.
    #[error("broken parent link at {0}")]
    BrokenParentLink(NodeId),

    /// In-order key sequence is not non-decreasing at this node.
    #[error("key out of order at {0}")]
    OutOfOrder(NodeId),

    /// The number of reachable nodes disagrees with the tracked length.
    #[error("node count mismatch: tree reports {expected}, traversal found {found}")]
    NodeCountMismatch { expected: usize, found: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidHandle(NodeId::SENTINEL);
        assert_eq!(format!("{}", err), "invalid node handle: Node(SENTINEL)");

        let err = Error::AlreadyAttached(NodeId::new(3));
        assert_eq!(format!("{}", err), "Node(3) is already attached to the tree");

        let err = Error::BlackHeightMismatch {
            node: NodeId::new(7),
            left: 2,
            right: 3,
        };
        assert_eq!(
            format!("{}", err),
            "black-height mismatch at Node(7): left 2, right 3"
        );
    }

    #[test]
    fn test_result_type_alias() {
        // This function returns our Result type
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }
}
