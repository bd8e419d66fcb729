//! rbindex - An ordered red-black tree index primitive.
//!
//! A self-balancing binary search tree over `u64` keys with logarithmic
//! worst-case insert, remove, and exact-key lookup. Intended as the
//! in-memory indexing building block inside higher-level storage
//! engines.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         rbindex                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │              Engine (tree/rbtree)                    │   │
//! │  │   search │ insert + fixup │ remove + fixup           │   │
//! │  │          rotate_left / rotate_right                  │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! │                              ↓                              │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │            Node arena (tree/arena)                   │   │
//! │  │  Vec<Node> · slot 0 = shared black sentinel          │   │
//! │  │  links are NodeId indices · freed slots recycled     │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! │                              ↓                              │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │       Common primitives (common/)                    │   │
//! │  │          NodeId · Error · config                     │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`tree`] - The red-black tree engine and invariant checker
//!
//! # Quick Start
//! ```
//! use rbindex::RedBlackTree;
//!
//! let mut tree = RedBlackTree::new();
//! for key in [10, 20, 30, 15, 25] {
//!     tree.insert_key(key);
//! }
//!
//! assert!(tree.contains(15));
//! assert_eq!(tree.remove_key(20), Some(20));
//! assert!(!tree.contains(20));
//!
//! // Ordered walk via minimum + successor.
//! let mut node = tree.minimum(tree.root());
//! let mut keys = Vec::new();
//! while !node.is_sentinel() {
//!     keys.push(tree.key(node));
//!     node = tree.successor(node);
//! }
//! assert_eq!(keys, [10, 15, 25, 30]);
//! ```
//!
//! # Concurrency
//! Single-threaded by design: every operation runs to completion with no
//! internal locking. Callers needing concurrent access must serialize
//! externally.

pub mod common;
pub mod tree;

// Re-export commonly used items at crate root for convenience
pub use common::config::{max_height, DEFAULT_CAPACITY};
pub use common::{Error, NodeId, Result};
pub use tree::{Color, RedBlackTree, TreeStats};
