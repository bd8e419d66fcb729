//! The red-black tree engine.
//!
//! # Components
//! - [`RedBlackTree`] - The ordered index structure
//! - [`Color`] - Node color (red or black)
//! - [`TreeStats`] - Structural summary from the invariant checker
//! - `arena` - Index-addressed node storage with slot recycling
//! - [`validate`] - Independent invariant checking traversal

pub(crate) mod arena;
mod node;
mod rbtree;
pub mod validate;

pub use node::Color;
pub use rbtree::RedBlackTree;
pub use validate::TreeStats;
