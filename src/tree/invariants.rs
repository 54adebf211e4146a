/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Structural invariant checks for the AVL index.
//!
//! [`check_tree_invariants`](AvlIndex::check_tree_invariants) walks the
//! whole tree and independently recomputes every cached field, comparing
//! against the memoized values. It is always available as a debugging aid
//! and runs automatically after every mutation when the `unittest` feature
//! is enabled.

use crate::arena::NodeIndex;
use crate::node::RankDiff;
use crate::tree::{find, AvlIndex};

impl<V> AvlIndex<V> {
    /// Verify every structural invariant of the index.
    ///
    /// Panics with a descriptive message if any invariant is violated:
    /// BST ordering, the AVL rank-difference invariant, cached height,
    /// rank-difference and size consistency, parent-link symmetry, the
    /// cached min/max handles, and arena exactness (the arena holds
    /// exactly the tree's nodes).
    pub fn check_tree_invariants(&self) {
        let Some(root) = self.root else {
            assert!(
                self.min.is_none() && self.max.is_none(),
                "empty index must not cache min/max handles",
            );
            assert_eq!(self.nodes.len(), 0, "empty index must have an empty arena");
            return;
        };

        assert!(
            self.nodes[root].parent.is_none(),
            "root node {root:?} must not have a parent",
        );

        let mut count = 0;
        self.check_node_invariants(root, None, None, &mut count);

        assert_eq!(
            count,
            self.nodes.len(),
            "arena must hold exactly the tree's nodes",
        );

        assert_eq!(
            self.min,
            Some(find::min_in_subtree(&self.nodes, root)),
            "cached min handle is stale",
        );
        assert_eq!(
            self.max,
            Some(find::max_in_subtree(&self.nodes, root)),
            "cached max handle is stale",
        );
    }

    /// Recursively check the subtree under `idx` against the exclusive key
    /// bounds `(low, high)`. Returns the ground-truth `(height, size)`.
    fn check_node_invariants(
        &self,
        idx: NodeIndex,
        low: Option<i64>,
        high: Option<i64>,
        count: &mut usize,
    ) -> (i32, usize) {
        let node = &self.nodes[idx];
        *count += 1;

        if let Some(low) = low {
            assert!(
                node.key > low,
                "BST ordering violated: key {} is not above bound {low}",
                node.key,
            );
        }
        if let Some(high) = high {
            assert!(
                node.key < high,
                "BST ordering violated: key {} is not below bound {high}",
                node.key,
            );
        }

        let (left_height, left_size) = match node.left {
            Some(left) => {
                assert_eq!(
                    self.nodes[left].parent,
                    Some(idx),
                    "left child of key {} has a stale parent link",
                    node.key,
                );
                self.check_node_invariants(left, low, Some(node.key), count)
            }
            None => (-1, 0),
        };

        let (right_height, right_size) = match node.right {
            Some(right) => {
                assert_eq!(
                    self.nodes[right].parent,
                    Some(idx),
                    "right child of key {} has a stale parent link",
                    node.key,
                );
                self.check_node_invariants(right, Some(node.key), high, count)
            }
            None => (-1, 0),
        };

        assert_eq!(
            node.height,
            left_height.max(right_height) + 1,
            "height mismatch at key {}: stored {}, computed {}",
            node.key,
            node.height,
            left_height.max(right_height) + 1,
        );

        assert_eq!(
            node.size,
            left_size + right_size + 1,
            "size mismatch at key {}: stored {}, computed {}",
            node.key,
            node.size,
            left_size + right_size + 1,
        );

        let expected = RankDiff::new(node.height - left_height, node.height - right_height);
        assert_eq!(
            node.diff, expected,
            "cached rank difference stale at key {}",
            node.key,
        );
        assert!(
            expected.is_valid(),
            "rank difference ({},{}) outside the valid set at key {}",
            expected.left(),
            expected.right(),
            node.key,
        );

        (node.height, node.size)
    }
}
