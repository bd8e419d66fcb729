//! Red-black tree engine — the core ordered index structure.
//!
//! The [`RedBlackTree`] keeps `u64` keys in a self-balancing binary
//! search tree with logarithmic worst-case depth. Balance is maintained
//! by three algorithmic units, all operating on the shared arena:
//! - the rotation primitives (`rotate_left` / `rotate_right`)
//! - insertion fixup (three-case recolor/rotate analysis)
//! - deletion fixup (four-case "double black" analysis)
//!
//! # Invariants
//! Before and after every public operation:
//! 1. Every node is red or black.
//! 2. The root is black (or the tree is empty).
//! 3. The sentinel is black.
//! 4. A red node has two black children.
//! 5. Every path from a node down to the sentinel crosses the same
//!    number of black nodes.
//!
//! # The sentinel
//! Slot 0 of the arena is a shared black placeholder standing in for
//! every empty child link and for the parent of the root, so
//! `parent == SENTINEL` means "is root". The algorithms freely overwrite
//! the sentinel's parent field during deletion splicing — its fields are
//! placeholder-only and its color is re-blackened by the fixup exit —
//! which is what keeps the hot loops free of emptiness branches.

use crate::common::config::DEFAULT_CAPACITY;
use crate::common::{Error, NodeId, Result};
use crate::tree::arena::NodeArena;
use crate::tree::node::{Color, SlotState};

/// An ordered red-black tree over `u64` keys.
///
/// # Architecture
/// ```text
/// ┌───────────────────────────────────────────────────────────┐
/// │                      RedBlackTree                         │
/// │  ┌──────────┐   ┌─────────────────────────────────────┐   │
/// │  │   root   │──▶│        arena: Vec<Node>             │   │
/// │  │  NodeId  │   │ [sentinel] [Node1] [Node2] ...      │   │
/// │  └──────────┘   │     ▲  left/right/parent links      │   │
/// │                 │     └── every empty link aims here  │   │
/// │                 └─────────────────────────────────────┘   │
/// └───────────────────────────────────────────────────────────┘
/// ```
///
/// # Usage
/// ```
/// use rbindex::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// let node = tree.create_node(42);
/// tree.insert(node).unwrap();
///
/// assert!(tree.contains(42));
/// assert_eq!(tree.remove(node).unwrap(), 42);
/// assert!(tree.is_empty());
/// ```
///
/// # Duplicate keys
/// Equal keys sort together: the descent goes right only for a strictly
/// greater key, so a duplicate lands in the left subtree of its equal.
///
/// # Handle aliasing on removal
/// Removing a node with two children splices out its in-order successor
/// and copies the successor's key into the targeted slot. The slot that
/// is physically recycled is therefore **not necessarily the one whose
/// handle was passed in**: after such a removal the passed handle still
/// names a live slot (now carrying the successor's key) while the
/// successor's old handle is stale. Callers holding long-lived handles
/// must account for this; `remove` reports which key left the tree.
pub struct RedBlackTree {
    pub(crate) arena: NodeArena,

    /// Topmost node, or the sentinel when the tree is empty.
    pub(crate) root: NodeId,

    /// Number of attached nodes.
    pub(crate) len: usize,
}

impl RedBlackTree {
    /// Create an empty tree with the default arena capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty tree with room for `capacity` node slots
    /// (one of which is the sentinel).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: NodeArena::with_capacity(capacity),
            root: NodeId::SENTINEL,
            len: 0,
        }
    }

    // ========================================================================
    // Public API: Accessors
    // ========================================================================

    /// Handle of the root node, or the sentinel when empty.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of keys in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys (root is the sentinel).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_sentinel()
    }

    /// Key stored at `node`.
    ///
    /// # Panics
    /// Panics if `node` is the sentinel or not currently attached.
    #[inline]
    pub fn key(&self, node: NodeId) -> u64 {
        self.assert_attached(node);
        self.arena[node].key
    }

    /// Color of `node`. The sentinel is always black.
    ///
    /// # Panics
    /// Panics if `node` does not name a live arena slot.
    #[inline]
    pub fn color(&self, node: NodeId) -> Color {
        assert!(
            self.arena.get(node).is_some(),
            "{node} is out of range"
        );
        self.arena[node].color
    }

    // ========================================================================
    // Public API: Search
    // ========================================================================

    /// Exact-key lookup.
    ///
    /// Descends from the root comparing `key` against each visited node.
    /// Returns the sentinel when the key is absent — compare the result
    /// with [`NodeId::SENTINEL`] (or use [`find`](Self::find)) to detect
    /// a miss. O(log n); never mutates the tree.
    pub fn search(&self, key: u64) -> NodeId {
        let mut p = self.root;
        while !p.is_sentinel() {
            let node = &self.arena[p];
            if node.key == key {
                break;
            }
            p = if key > node.key { node.right } else { node.left };
        }
        p
    }

    /// `search` with an `Option` result instead of the sentinel signal.
    #[inline]
    pub fn find(&self, key: u64) -> Option<NodeId> {
        let node = self.search(key);
        (!node.is_sentinel()).then_some(node)
    }

    /// Whether `key` is present.
    #[inline]
    pub fn contains(&self, key: u64) -> bool {
        !self.search(key).is_sentinel()
    }

    // ========================================================================
    // Public API: Ordered-traversal helpers
    // ========================================================================

    /// Leftmost node of the subtree rooted at `node`.
    ///
    /// Returns the sentinel when given the sentinel (empty subtree).
    ///
    /// # Panics
    /// Panics if `node` names a slot that is not currently attached.
    pub fn minimum(&self, node: NodeId) -> NodeId {
        if node.is_sentinel() {
            return NodeId::SENTINEL;
        }
        self.assert_attached(node);

        let mut p = node;
        while !self.arena[p].left.is_sentinel() {
            p = self.arena[p].left;
        }
        p
    }

    /// Node with the next key in in-order sequence, or the sentinel when
    /// `node` holds the maximum.
    ///
    /// If `node` has a right child the successor is the minimum of that
    /// subtree; otherwise it is the first ancestor reached from a left
    /// child.
    ///
    /// # Panics
    /// Panics if `node` names a slot that is not currently attached.
    pub fn successor(&self, node: NodeId) -> NodeId {
        if node.is_sentinel() {
            return NodeId::SENTINEL;
        }
        self.assert_attached(node);

        let right = self.arena[node].right;
        if !right.is_sentinel() {
            return self.minimum(right);
        }

        let mut n = node;
        let mut p = self.arena[n].parent;
        while !p.is_sentinel() && n == self.arena[p].right {
            n = p;
            p = self.arena[n].parent;
        }
        p
    }

    // ========================================================================
    // Public API: Insertion
    // ========================================================================

    /// Allocate a detached red node carrying `key`, all links at the
    /// sentinel. Recycles a previously removed slot when one exists.
    ///
    /// The node is not part of the key-set until passed to
    /// [`insert`](Self::insert).
    pub fn create_node(&mut self, key: u64) -> NodeId {
        self.arena.alloc(key)
    }

    /// Attach a node created by [`create_node`](Self::create_node).
    ///
    /// An empty tree adopts the node directly as a black root. Otherwise
    /// the node is attached red at the leaf position found by BST
    /// descent, and fixup restores the invariants. O(log n).
    ///
    /// # Errors
    /// - [`Error::InvalidHandle`] if `node` is the sentinel, out of
    ///   range, or a recycled slot
    /// - [`Error::AlreadyAttached`] if `node` is already in the tree
    pub fn insert(&mut self, node: NodeId) -> Result<()> {
        match self.arena.get(node) {
            None => return Err(Error::InvalidHandle(node)),
            Some(_) if node.is_sentinel() => return Err(Error::InvalidHandle(node)),
            Some(slot) => match slot.state {
                SlotState::Free => return Err(Error::InvalidHandle(node)),
                SlotState::Attached => return Err(Error::AlreadyAttached(node)),
                SlotState::Detached => {}
            },
        }

        self.arena[node].state = SlotState::Attached;
        self.len += 1;
        self.attach(node);
        Ok(())
    }

    /// Convenience: allocate and insert in one call, returning the new
    /// node's handle.
    pub fn insert_key(&mut self, key: u64) -> NodeId {
        let node = self.create_node(key);
        self.arena[node].state = SlotState::Attached;
        self.len += 1;
        self.attach(node);
        node
    }

    /// BST descent and attachment; assumes `node` is a fresh red node.
    fn attach(&mut self, node: NodeId) {
        if self.root.is_sentinel() {
            // First node: black root, invariants hold trivially.
            self.arena[node].color = Color::Black;
            self.root = node;
            return;
        }

        let key = self.arena[node].key;
        let mut p = self.root;
        loop {
            // Strictly greater goes right, so equal keys land in the
            // left subtree of their equal (stable tie-break).
            if key > self.arena[p].key {
                let right = self.arena[p].right;
                if !right.is_sentinel() {
                    p = right;
                } else {
                    self.arena[p].right = node;
                    self.arena[node].parent = p;
                    break;
                }
            } else {
                let left = self.arena[p].left;
                if !left.is_sentinel() {
                    p = left;
                } else {
                    self.arena[p].left = node;
                    self.arena[node].parent = p;
                    break;
                }
            }
        }

        self.insert_fixup(node);
    }

    /// Restore invariant 4 after attaching a red node.
    ///
    /// Loop invariant: the only possible violation is `node` and its
    /// parent both red. Three cases per side, mirrored:
    /// 1. uncle red — recolor parent/uncle black, grandparent red,
    ///    continue from the grandparent;
    /// 2. uncle black, `node` is the inner grandchild — rotate at the
    ///    parent to reduce to case 3;
    /// 3. uncle black, `node` is the outer grandchild — recolor and
    ///    rotate at the grandparent, which terminates the loop.
    fn insert_fixup(&mut self, mut node: NodeId) {
        // The sentinel is black and the root's parent is the sentinel,
        // so the condition also terminates the walk at the root.
        while self.arena[self.arena[node].parent].is_red() {
            let parent = self.arena[node].parent;
            let grand = self.arena[parent].parent;

            if parent == self.arena[grand].left {
                let uncle = self.arena[grand].right;
                if self.arena[uncle].is_red() {
                    // Case 1: push the violation two levels up.
                    self.arena[parent].color = Color::Black;
                    self.arena[uncle].color = Color::Black;
                    self.arena[grand].color = Color::Red;
                    node = grand;
                } else {
                    if node == self.arena[parent].right {
                        // Case 2: make node the outer grandchild.
                        node = parent;
                        self.rotate_left(node);
                    }
                    // Case 3.
                    let parent = self.arena[node].parent;
                    let grand = self.arena[parent].parent;
                    self.arena[parent].color = Color::Black;
                    self.arena[grand].color = Color::Red;
                    self.rotate_right(grand);
                }
            } else {
                let uncle = self.arena[grand].left;
                if self.arena[uncle].is_red() {
                    self.arena[parent].color = Color::Black;
                    self.arena[uncle].color = Color::Black;
                    self.arena[grand].color = Color::Red;
                    node = grand;
                } else {
                    if node == self.arena[parent].left {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.arena[node].parent;
                    let grand = self.arena[parent].parent;
                    self.arena[parent].color = Color::Black;
                    self.arena[grand].color = Color::Red;
                    self.rotate_left(grand);
                }
            }
        }

        // Case 1 can propagate redness all the way up; re-establish
        // invariant 2 unconditionally.
        let root = self.root;
        self.arena[root].color = Color::Black;
    }

    // ========================================================================
    // Public API: Removal
    // ========================================================================

    /// Unlink a node from the tree, returning the key that left the
    /// key-set. O(log n).
    ///
    /// If `node` has two children, the in-order successor is the slot
    /// physically spliced out and its key is copied into `node` — see
    /// the type-level note on handle aliasing. The recycled slot goes
    /// back to the arena's free list for reuse by later insertions.
    ///
    /// # Errors
    /// - [`Error::InvalidHandle`] if `node` is the sentinel or out of range
    /// - [`Error::NotAttached`] if `node` is not currently in the tree
    pub fn remove(&mut self, node: NodeId) -> Result<u64> {
        match self.arena.get(node) {
            None => return Err(Error::InvalidHandle(node)),
            Some(_) if node.is_sentinel() => return Err(Error::InvalidHandle(node)),
            Some(slot) if slot.state != SlotState::Attached => {
                return Err(Error::NotAttached(node))
            }
            Some(_) => {}
        }

        let z = node;

        // y is the slot physically spliced out: z itself when it has at
        // most one real child, otherwise z's successor (whose left child
        // is guaranteed to be the sentinel).
        let y = if self.arena[z].left.is_sentinel() || self.arena[z].right.is_sentinel() {
            z
        } else {
            self.successor(z)
        };

        // x takes y's place; it may be the sentinel.
        let x = if !self.arena[y].left.is_sentinel() {
            self.arena[y].left
        } else {
            self.arena[y].right
        };

        // Splice y out. The parent write happens even when x is the
        // sentinel — the sentinel's parent field is placeholder-only,
        // and delete_fixup relies on it to walk upward.
        let y_parent = self.arena[y].parent;
        self.arena[x].parent = y_parent;
        if y_parent.is_sentinel() {
            self.root = x;
        } else if y == self.arena[y_parent].left {
            self.arena[y_parent].left = x;
        } else {
            self.arena[y_parent].right = x;
        }

        let removed_key = self.arena[z].key;
        if y != z {
            // z keeps its position; only its key changes.
            self.arena[z].key = self.arena[y].key;
        }

        // Splicing out a black node shorts every path through x by one
        // black node, breaking invariant 5.
        if self.arena[y].is_black() {
            self.delete_fixup(x);
        }

        self.arena.release(y);
        self.len -= 1;
        Ok(removed_key)
    }

    /// Convenience: search for `key` and remove its node.
    ///
    /// Returns the removed key, or `None` when absent. With duplicates
    /// present, exactly one instance is removed.
    pub fn remove_key(&mut self, key: u64) -> Option<u64> {
        let node = self.find(key)?;
        // The handle came from our own search, so remove cannot fail.
        self.remove(node).ok()
    }

    /// Restore invariant 5 after splicing out a black node.
    ///
    /// `x` carries a "double black" deficiency. Four cases per side on
    /// x's sibling `w`, mirrored:
    /// 1. `w` red — recolor and rotate at the parent so the sibling is
    ///    black, then re-examine;
    /// 2. `w` black with two black children — recolor `w` red and move
    ///    the deficiency up;
    /// 3. `w` black, far child black, near child red — recolor and
    ///    rotate at `w`, reducing to case 4;
    /// 4. `w` black, far child red — recolor, rotate at the parent, and
    ///    terminate.
    fn delete_fixup(&mut self, mut x: NodeId) {
        while x != self.root && self.arena[x].is_black() {
            let parent = self.arena[x].parent;

            if x == self.arena[parent].left {
                let mut w = self.arena[parent].right;
                if self.arena[w].is_red() {
                    // Case 1.
                    self.arena[w].color = Color::Black;
                    self.arena[parent].color = Color::Red;
                    self.rotate_left(parent);
                    w = self.arena[parent].right;
                }
                let (w_left, w_right) = (self.arena[w].left, self.arena[w].right);
                if self.arena[w_left].is_black() && self.arena[w_right].is_black() {
                    // Case 2.
                    self.arena[w].color = Color::Red;
                    x = self.arena[x].parent;
                } else {
                    if self.arena[w_right].is_black() {
                        // Case 3.
                        self.arena[w_left].color = Color::Black;
                        self.arena[w].color = Color::Red;
                        self.rotate_right(w);
                        w = self.arena[parent].right;
                    }
                    // Case 4.
                    self.arena[w].color = self.arena[parent].color;
                    self.arena[parent].color = Color::Black;
                    let far = self.arena[w].right;
                    self.arena[far].color = Color::Black;
                    self.rotate_left(parent);
                    x = self.root;
                }
            } else {
                let mut w = self.arena[parent].left;
                if self.arena[w].is_red() {
                    self.arena[w].color = Color::Black;
                    self.arena[parent].color = Color::Red;
                    self.rotate_right(parent);
                    w = self.arena[parent].left;
                }
                let (w_left, w_right) = (self.arena[w].left, self.arena[w].right);
                if self.arena[w_left].is_black() && self.arena[w_right].is_black() {
                    self.arena[w].color = Color::Red;
                    x = self.arena[x].parent;
                } else {
                    if self.arena[w_left].is_black() {
                        self.arena[w_right].color = Color::Black;
                        self.arena[w].color = Color::Red;
                        self.rotate_left(w);
                        w = self.arena[parent].left;
                    }
                    self.arena[w].color = self.arena[parent].color;
                    self.arena[parent].color = Color::Black;
                    let far = self.arena[w].left;
                    self.arena[far].color = Color::Black;
                    self.rotate_right(parent);
                    x = self.root;
                }
            }
        }

        // A red x absorbs the deficiency by recoloring; this also
        // re-blackens the sentinel when x ended up being it.
        self.arena[x].color = Color::Black;
    }

    // ========================================================================
    // Internal: Rotation primitives
    // ========================================================================

    /// Left rotation around `x`:
    ///
    /// ```text
    ///     |                |
    ///     x      ──▶       y
    ///    / \              / \
    ///   a   y            x   c
    ///      / \          / \
    ///     b   c        a   b
    /// ```
    ///
    /// O(1), touches only local links, never changes colors, preserves
    /// the in-order key sequence.
    fn rotate_left(&mut self, x: NodeId) {
        let y = self.arena[x].right;

        // y's left subtree moves under x.
        let b = self.arena[y].left;
        self.arena[x].right = b;
        self.arena[b].parent = x;

        // y replaces x in x's parent (or as root).
        let x_parent = self.arena[x].parent;
        self.arena[y].parent = x_parent;
        if x_parent.is_sentinel() {
            self.root = y;
        } else if x == self.arena[x_parent].left {
            self.arena[x_parent].left = y;
        } else {
            self.arena[x_parent].right = y;
        }

        self.arena[y].left = x;
        self.arena[x].parent = y;
    }

    /// Right rotation around `y` — the structural inverse of
    /// [`rotate_left`](Self::rotate_left).
    fn rotate_right(&mut self, y: NodeId) {
        let x = self.arena[y].left;

        let b = self.arena[x].right;
        self.arena[y].left = b;
        self.arena[b].parent = y;

        let y_parent = self.arena[y].parent;
        self.arena[x].parent = y_parent;
        if y_parent.is_sentinel() {
            self.root = x;
        } else if y == self.arena[y_parent].left {
            self.arena[y_parent].left = x;
        } else {
            self.arena[y_parent].right = x;
        }

        self.arena[x].right = y;
        self.arena[y].parent = x;
    }

    // ========================================================================
    // Internal: Precondition assertions
    // ========================================================================

    fn assert_attached(&self, node: NodeId) {
        let slot = self
            .arena
            .get(node)
            .unwrap_or_else(|| panic!("{node} is out of range"));
        assert!(!node.is_sentinel(), "sentinel passed where a node is required");
        assert!(
            slot.state == SlotState::Attached,
            "{node} is not attached to the tree"
        );
    }
}

impl Default for RedBlackTree {
    fn default() -> Self {
        Self::new()
    }
}
