//! Property-based tests for the red-black tree engine.
//!
//! A `BTreeMap<u64, usize>` multiset is the oracle: after every
//! operation the tree must agree with it on membership and ordering, and
//! the independent invariant checker must pass.

use std::collections::BTreeMap;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use rbindex::{max_height, RedBlackTree};

/// One step of a randomized workload.
#[derive(Debug, Clone)]
enum Op {
    Insert(u64),
    Remove(u64),
    Search(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // Small key space so inserts, removes, and searches collide often.
    let key = 0u64..64;
    prop_oneof![
        3 => key.clone().prop_map(Op::Insert),
        2 => key.clone().prop_map(Op::Remove),
        1 => key.prop_map(Op::Search),
    ]
}

/// Multiset membership count in the oracle.
fn oracle_count(oracle: &BTreeMap<u64, usize>, key: u64) -> usize {
    oracle.get(&key).copied().unwrap_or(0)
}

/// In-order keys via the minimum/successor walk.
fn in_order(tree: &RedBlackTree) -> Vec<u64> {
    let mut keys = Vec::new();
    let mut node = tree.minimum(tree.root());
    while !node.is_sentinel() {
        keys.push(tree.key(node));
        node = tree.successor(node);
    }
    keys
}

fn oracle_in_order(oracle: &BTreeMap<u64, usize>) -> Vec<u64> {
    oracle
        .iter()
        .flat_map(|(&key, &count)| std::iter::repeat(key).take(count))
        .collect()
}

proptest! {
    /// Invariants survive arbitrary insert/remove/search interleavings,
    /// and the tree's contents always match the oracle multiset.
    #[test]
    fn prop_invariants_hold_under_churn(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let mut tree = RedBlackTree::new();
        let mut oracle: BTreeMap<u64, usize> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    tree.insert_key(key);
                    *oracle.entry(key).or_insert(0) += 1;
                }
                Op::Remove(key) => {
                    let expected = oracle_count(&oracle, key) > 0;
                    prop_assert_eq!(tree.remove_key(key).is_some(), expected);
                    if expected {
                        *oracle.get_mut(&key).unwrap() -= 1;
                        if oracle[&key] == 0 {
                            oracle.remove(&key);
                        }
                    }
                }
                Op::Search(key) => {
                    let expected = oracle_count(&oracle, key) > 0;
                    prop_assert_eq!(tree.contains(key), expected);
                }
            }

            tree.check_invariants().map_err(|e| {
                TestCaseError::fail(format!("invariant violation: {e}"))
            })?;
        }

        prop_assert_eq!(in_order(&tree), oracle_in_order(&oracle));
    }

    /// Inserting a key set then removing it in any order empties the tree
    /// without ever breaking an invariant.
    #[test]
    fn prop_insert_remove_round_trip(
        keys in prop::collection::vec(0u64..1000, 1..100),
        seed in any::<u64>(),
    ) {
        let mut tree = RedBlackTree::new();
        for &key in &keys {
            tree.insert_key(key);
            tree.check_invariants().map_err(|e| {
                TestCaseError::fail(format!("invariant violation: {e}"))
            })?;
        }

        // Removal order: deterministic shuffle from the seed.
        let mut order = keys.clone();
        let mut state = seed | 1;
        for i in (1..order.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            order.swap(i, (state >> 33) as usize % (i + 1));
        }

        for key in order {
            prop_assert_eq!(tree.remove_key(key), Some(key));
            tree.check_invariants().map_err(|e| {
                TestCaseError::fail(format!("invariant violation: {e}"))
            })?;
        }

        prop_assert!(tree.is_empty());
    }

    /// The balance bound holds for every prefix of a bulk load.
    #[test]
    fn prop_height_within_balance_bound(keys in prop::collection::vec(any::<u64>(), 1..300)) {
        let mut tree = RedBlackTree::new();
        for (i, &key) in keys.iter().enumerate() {
            tree.insert_key(key);
            let stats = tree.check_invariants().map_err(|e| {
                TestCaseError::fail(format!("invariant violation: {e}"))
            })?;
            prop_assert!(stats.height <= max_height(i + 1));
        }
    }

    /// Search never mutates: the validated structure is bit-for-bit the
    /// same before and after a burst of lookups.
    #[test]
    fn prop_search_is_readonly(
        keys in prop::collection::vec(0u64..128, 1..64),
        probes in prop::collection::vec(0u64..128, 1..64),
    ) {
        let mut tree = RedBlackTree::new();
        for &key in &keys {
            tree.insert_key(key);
        }

        let before = tree.check_invariants().unwrap();
        let snapshot = in_order(&tree);

        for &probe in &probes {
            let first = tree.search(probe);
            prop_assert_eq!(tree.search(probe), first);
        }

        prop_assert_eq!(tree.check_invariants().unwrap(), before);
        prop_assert_eq!(in_order(&tree), snapshot);
    }
}
