//! Configuration constants for rbindex.

/// Default arena capacity (in node slots) for [`crate::RedBlackTree::new`].
///
/// Slot 0 is always the sentinel, so this leaves room for 15 keys before
/// the backing `Vec` reallocates. Callers that know their working set
/// should use `with_capacity` instead.
pub const DEFAULT_CAPACITY: usize = 16;

/// Height bound guaranteed by the red-black invariants.
///
/// A red-black tree holding `n` keys is never deeper than
/// `2 * ceil(log2(n + 1))` — at most every other node on a root-to-leaf
/// path is red. Computed with integer arithmetic.
pub fn max_height(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    2 * (n + 1).next_power_of_two().trailing_zeros() as usize
}
