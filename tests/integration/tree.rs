/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Scenario tests for the basic index operations.

use avl_index::{AvlIndex, Error};

use crate::helpers::{build_index, collect_keys};

#[test]
fn empty_index_queries() {
    let index: AvlIndex<i64> = AvlIndex::new();

    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
    assert_eq!(index.rank(), -1);
    assert_eq!(index.get(1), None);
    assert_eq!(index.min(), None);
    assert_eq!(index.max(), None);
    assert_eq!(index.keys().count(), 0);
    index.check_tree_invariants();
}

#[test]
fn insert_sequence_keeps_order_and_balance() {
    let index = build_index([5, 3, 8, 1, 4, 7, 9]);

    assert_eq!(collect_keys(&index), vec![1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(index.len(), 7);
    assert_eq!(index.min(), Some(&10));
    assert_eq!(index.max(), Some(&90));
}

#[test]
fn delete_root_splices_in_the_successor() {
    let mut index = build_index([5, 3, 8, 1, 4, 7, 9]);

    index.delete(5).unwrap();
    index.check_tree_invariants();

    assert_eq!(index.len(), 6);
    assert_eq!(collect_keys(&index), vec![1, 3, 4, 7, 8, 9]);

    // The in-order successor of 5 takes over the root position.
    let root = index.root_index().unwrap();
    assert_eq!(index.node(root).key(), 7);
    assert_eq!(index.get(7), Some(&70));
}

#[test]
fn duplicate_insert_leaves_the_index_unchanged() {
    let mut index = build_index([5, 3, 8]);
    let before = collect_keys(&index);

    assert_eq!(index.insert(3, 999), Err(Error::DuplicateKey(3)));
    index.check_tree_invariants();

    assert_eq!(index.len(), 3);
    assert_eq!(collect_keys(&index), before);
    assert_eq!(index.get(3), Some(&30));
}

#[test]
fn delete_of_an_absent_key_leaves_the_index_unchanged() {
    let mut index = build_index([5, 3, 8]);
    let before = collect_keys(&index);

    assert_eq!(index.delete(4), Err(Error::KeyNotFound(4)));
    index.check_tree_invariants();

    assert_eq!(index.len(), 3);
    assert_eq!(collect_keys(&index), before);
}

#[test]
fn insert_then_delete_round_trips_to_empty() {
    let mut index = AvlIndex::new();
    assert_eq!(index.insert(7, "seven"), Ok(0));
    index.delete(7).unwrap();

    assert_eq!(index.len(), 0);
    assert_eq!(index.min(), None);
    assert_eq!(index.max(), None);
    index.check_tree_invariants();
}

#[test]
fn min_and_max_track_deletions() {
    let mut index = build_index([5, 3, 8, 1, 9]);

    assert_eq!(index.min_key(), Some(1));
    assert_eq!(index.max_key(), Some(9));

    index.delete(1).unwrap();
    index.check_tree_invariants();
    assert_eq!(index.min_key(), Some(3));

    index.delete(9).unwrap();
    index.check_tree_invariants();
    assert_eq!(index.max_key(), Some(8));
}

#[test]
fn descending_and_alternating_insertions_stay_balanced() {
    let index = build_index((1..=64).rev());
    assert_eq!(collect_keys(&index), (1..=64).collect::<Vec<_>>());

    // Alternate from both ends towards the middle.
    let mut keys = Vec::new();
    for i in 0..32 {
        keys.push(i);
        keys.push(100 - i);
    }
    let index = build_index(keys);
    assert_eq!(index.len(), 64);
}

#[test]
fn deleting_every_key_in_insertion_order() {
    let keys = [5, 3, 8, 1, 4, 7, 9, 2, 6];
    let mut index = build_index(keys);

    for (i, key) in keys.iter().enumerate() {
        index.delete(*key).unwrap();
        index.check_tree_invariants();
        assert_eq!(index.len(), keys.len() - i - 1);
        assert_eq!(index.get(*key), None);
    }
    assert!(index.is_empty());
}

#[test]
fn get_mut_updates_in_place() {
    let mut index = build_index([1, 2, 3]);

    *index.get_mut(2).unwrap() = 999;
    assert_eq!(index.get(2), Some(&999));
    assert_eq!(index.len(), 3);
}

#[test]
fn clear_empties_the_index() {
    let mut index = build_index([1, 2, 3]);
    index.clear();

    assert!(index.is_empty());
    assert_eq!(index.min(), None);
    index.check_tree_invariants();

    index.insert(4, 40).unwrap();
    assert_eq!(collect_keys(&index), vec![4]);
}

#[test]
fn extend_replaces_on_duplicate_keys() {
    let mut index: AvlIndex<i64> = [(1, 10), (2, 20)].into_iter().collect();
    index.extend([(2, 99), (3, 30)]);
    index.check_tree_invariants();

    assert_eq!(index.len(), 3);
    assert_eq!(index.get(2), Some(&99));
    assert_eq!(index.get(3), Some(&30));
}

#[test]
fn mem_usage_grows_with_the_index() {
    let empty: AvlIndex<i64> = AvlIndex::new();
    let full = build_index(1..=128);

    assert!(full.mem_usage() > empty.mem_usage());
}

#[test]
fn rank_reflects_logarithmic_height() {
    let index = build_index(1..=127);

    // 127 sequential keys settle into a complete tree of height 6.
    assert_eq!(index.rank(), 6);
}
