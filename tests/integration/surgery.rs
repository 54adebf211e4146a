/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Scenario tests for split and join.

use avl_index::AvlIndex;

use crate::helpers::{build_index, collect_keys};

#[test]
fn split_partitions_around_the_key() {
    let index = build_index(1..=7);

    let (lower, upper) = index.split(4);
    lower.check_tree_invariants();
    upper.check_tree_invariants();

    assert_eq!(collect_keys(&lower), vec![1, 2, 3]);
    assert_eq!(collect_keys(&upper), vec![5, 6, 7]);
    assert_eq!(lower.get(3), Some(&30));
    assert_eq!(upper.get(5), Some(&50));
}

#[test]
fn split_at_the_minimum_leaves_the_lower_half_empty() {
    let index = build_index(1..=7);

    let (lower, upper) = index.split(1);
    lower.check_tree_invariants();
    upper.check_tree_invariants();

    assert!(lower.is_empty());
    assert_eq!(collect_keys(&upper), vec![2, 3, 4, 5, 6, 7]);
}

#[test]
fn split_at_the_maximum_leaves_the_upper_half_empty() {
    let index = build_index(1..=7);

    let (lower, upper) = index.split(7);
    lower.check_tree_invariants();
    upper.check_tree_invariants();

    assert_eq!(collect_keys(&lower), vec![1, 2, 3, 4, 5, 6]);
    assert!(upper.is_empty());
}

#[test]
fn split_of_a_singleton_yields_two_empty_halves() {
    let index = build_index([42]);

    let (lower, upper) = index.split(42);
    assert!(lower.is_empty());
    assert!(upper.is_empty());
}

#[test]
fn split_deep_in_a_large_index() {
    let index = build_index(1..=100);

    let (lower, upper) = index.split(37);
    lower.check_tree_invariants();
    upper.check_tree_invariants();

    assert_eq!(collect_keys(&lower), (1..=36).collect::<Vec<_>>());
    assert_eq!(collect_keys(&upper), (38..=100).collect::<Vec<_>>());
    assert_eq!(lower.min_key(), Some(1));
    assert_eq!(lower.max_key(), Some(36));
    assert_eq!(upper.min_key(), Some(38));
    assert_eq!(upper.max_key(), Some(100));
}

#[test]
fn join_of_two_empty_indexes_yields_a_singleton() {
    let mut index: AvlIndex<i64> = AvlIndex::new();
    let other = AvlIndex::new();

    let cost = index.join(5, 50, other);

    assert_eq!(cost, 1);
    assert_eq!(collect_keys(&index), vec![5]);
    assert_eq!(index.min(), Some(&50));
    assert_eq!(index.max(), Some(&50));
}

#[test]
fn join_with_an_empty_side_attaches_the_connector_as_an_extreme() {
    let mut index = build_index(10..=20);
    let rank = index.rank();

    let cost = index.join(5, 50, AvlIndex::new());
    index.check_tree_invariants();

    assert_eq!(cost, rank.unsigned_abs() as usize + 2);
    assert_eq!(index.min_key(), Some(5));
    assert_eq!(collect_keys(&index)[..3], [5, 10, 11]);

    let rank = index.rank();
    let cost = index.join(42, 420, AvlIndex::new());
    index.check_tree_invariants();

    assert_eq!(cost, rank.unsigned_abs() as usize + 2);
    assert_eq!(index.max_key(), Some(42));
}

#[test]
fn join_through_a_separating_connector() {
    let mut lower = build_index(1..=10);
    let upper = build_index(20..=40);

    let expected_cost = lower.rank().abs_diff(upper.rank()) as usize + 1;
    let cost = lower.join(15, 150, upper);
    lower.check_tree_invariants();

    assert_eq!(cost, expected_cost);
    assert_eq!(lower.len(), 32);
    assert_eq!(lower.get(15), Some(&150));

    let mut expected: Vec<i64> = (1..=10).collect();
    expected.push(15);
    expected.extend(20..=40);
    assert_eq!(collect_keys(&lower), expected);
}

#[test]
fn join_accepts_the_taller_tree_on_either_side() {
    // Taller receiver on the left.
    let mut left = build_index(1..=50);
    let right = build_index(100..=103);
    left.join(60, 600, right);
    left.check_tree_invariants();
    assert_eq!(left.len(), 55);

    // Taller argument on the left.
    let mut right = build_index(100..=103);
    let left = build_index(1..=50);
    right.join(60, 600, left);
    right.check_tree_invariants();
    assert_eq!(right.len(), 55);
    assert_eq!(right.min_key(), Some(1));
    assert_eq!(right.max_key(), Some(103));
}

#[test]
fn join_of_equal_rank_trees_roots_the_connector() {
    let mut lower = build_index(1..=7);
    let upper = build_index(11..=17);
    assert_eq!(lower.rank(), upper.rank());

    let cost = lower.join(9, 90, upper);
    lower.check_tree_invariants();

    assert_eq!(cost, 1);
    let root = lower.root_index().unwrap();
    assert_eq!(lower.node(root).key(), 9);
}

#[test]
fn split_then_join_reconstructs_the_original_key_set() {
    let keys = [5, 3, 8, 1, 4, 7, 9, 2, 6, 10, 12, 11];
    let index = build_index(keys);
    let original = collect_keys(&index);

    let (lower, upper) = index.split(7);
    let mut rejoined = lower;
    rejoined.join(7, 70, upper);
    rejoined.check_tree_invariants();

    assert_eq!(collect_keys(&rejoined), original);
}
