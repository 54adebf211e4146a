/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Property-based tests for the AVL index using `proptest`.

#[cfg(not(miri))]
mod proptests {
    use std::collections::BTreeMap;

    use avl_index::AvlIndex;
    use proptest::prelude::*;

    proptest::proptest! {
        #[test]
        fn prop_btreemap_equivalence(
            // Keys are drawn from a small range so that inserts, duplicate
            // inserts, deletes and misses all occur.
            ops in proptest::collection::vec((any::<bool>(), -50i64..50), 1..200)
        ) {
            let mut model = BTreeMap::new();
            let mut index = AvlIndex::new();

            for (insert, key) in ops {
                if insert {
                    let fresh = model.insert(key, key).is_none();
                    prop_assert_eq!(index.insert(key, key).is_ok(), fresh);
                } else {
                    let present = model.remove(&key).is_some();
                    prop_assert_eq!(index.delete(key).is_ok(), present);
                }

                index.check_tree_invariants();
                prop_assert_eq!(index.len(), model.len());
            }

            let keys: Vec<i64> = index.keys().collect();
            let expected: Vec<i64> = model.keys().copied().collect();
            prop_assert_eq!(keys, expected);
        }

        #[test]
        fn prop_insertions_stay_balanced_and_counted(
            keys in proptest::collection::btree_set(-10_000i64..10_000, 1..300)
        ) {
            let mut index = AvlIndex::new();
            for (count, key) in keys.iter().enumerate() {
                index.insert(*key, ()).unwrap();
                index.check_tree_invariants();
                prop_assert_eq!(index.len(), count + 1);
            }

            let sorted: Vec<i64> = keys.into_iter().collect();
            prop_assert_eq!(index.keys().collect::<Vec<_>>(), sorted);
        }

        #[test]
        fn prop_split_join_round_trip(
            keys in proptest::collection::btree_set(-1000i64..1000, 1..100),
            pivot_choice in any::<proptest::sample::Index>()
        ) {
            let keys: Vec<i64> = keys.into_iter().collect();
            let pivot = keys[pivot_choice.index(keys.len())];

            let mut index = AvlIndex::new();
            for &key in &keys {
                index.insert(key, key).unwrap();
            }

            let (lower, upper) = index.split(pivot);
            lower.check_tree_invariants();
            upper.check_tree_invariants();

            prop_assert!(lower.keys().all(|key| key < pivot));
            prop_assert!(upper.keys().all(|key| key > pivot));
            prop_assert_eq!(lower.len() + upper.len() + 1, keys.len());

            let mut rejoined = lower;
            rejoined.join(pivot, pivot, upper);
            rejoined.check_tree_invariants();

            prop_assert_eq!(rejoined.keys().collect::<Vec<_>>(), keys);
        }

        #[test]
        fn prop_join_cost_is_the_rank_gap(
            left_len in 0usize..80,
            right_len in 0usize..80,
        ) {
            let mut left = AvlIndex::new();
            for key in 0..left_len as i64 {
                left.insert(key, ()).unwrap();
            }
            let mut right = AvlIndex::new();
            for key in 0..right_len as i64 {
                right.insert(1000 + key, ()).unwrap();
            }

            let expected = left.rank().abs_diff(right.rank()) as usize + 1;
            let cost = left.join(500, (), right);
            left.check_tree_invariants();

            prop_assert_eq!(cost, expected);
            prop_assert_eq!(left.len(), left_len + right_len + 1);
        }
    }
}
