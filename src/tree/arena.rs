//! Arena storage for tree nodes.
//!
//! Parent back-references make a red-black tree a cyclic graph, which
//! doesn't fit an owning-pointer representation. The arena sidesteps
//! that: the tree owns one `Vec<Node>` and every link is a [`NodeId`]
//! index into it. Slot 0 is reserved for the sentinel at construction
//! and never recycled.
//!
//! Removed slots are chained into an intrusive free list through their
//! `parent` field, so node storage is reused across insert/remove
//! cycles without unsafe code.

use std::ops::{Index, IndexMut};

use crate::common::NodeId;
use crate::tree::node::{Node, SlotState};

/// Fixed-sentinel node arena.
pub(crate) struct NodeArena {
    slots: Vec<Node>,

    /// Head of the free list, or the sentinel when the list is empty.
    /// (The sentinel slot itself can never be freed, so it is safe as
    /// the end-of-list marker.)
    free_head: NodeId,
}

impl NodeArena {
    /// Create an arena with the sentinel installed in slot 0.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.max(1));
        slots.push(Node::sentinel());
        Self {
            slots,
            free_head: NodeId::SENTINEL,
        }
    }

    /// Allocate a detached red node, reusing a freed slot when one exists.
    pub(crate) fn alloc(&mut self, key: u64) -> NodeId {
        if self.free_head.is_sentinel() {
            self.slots.push(Node::detached(key));
            return NodeId::new(self.slots.len() - 1);
        }

        let id = self.free_head;
        self.free_head = self.slots[id.0].parent;
        self.slots[id.0] = Node::detached(key);
        id
    }

    /// Return a slot to the free list.
    ///
    /// The caller must have already unlinked the node from the tree.
    pub(crate) fn release(&mut self, id: NodeId) {
        debug_assert!(!id.is_sentinel(), "sentinel slot is never released");
        let slot = &mut self.slots[id.0];
        slot.state = SlotState::Free;
        slot.parent = self.free_head;
        self.free_head = id;
    }

    /// Bounds-checked slot access, for vetting caller-supplied handles.
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0)
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.slots[id.0]
    }
}

impl IndexMut<NodeId> for NodeArena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.slots[id.0]
    }
}
