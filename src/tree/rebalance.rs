/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! The balancing engine: the rank-difference case table.
//!
//! Every mutation (insert, delete, join splice) hands the engine one
//! "anchor" node whose rank-difference pair may have just become invalid.
//! The engine climbs from the anchor to the root; at each node it
//! recomputes the cached rank-difference pair and dispatches on it. The
//! three valid pairs `(1,1)`, `(2,1)`, `(1,2)` are a no-op arm; the invalid
//! pairs fire one case each: a promotion, a demotion, or a single or double
//! rotation with the compensating height adjustments.
//!
//! The climb deliberately runs all the way to the root rather than stopping
//! at the first balanced node. Stopping early is unsound for this table:
//! a join splice can leave the anchor itself balanced while its parent is
//! `(0,2)`, and the height-shrinking delete rotations leave the new subtree
//! root balanced while its grandparent may newly be `(3,1)`. Climbing to
//! the root also refreshes every ancestor's cached subtree size, which a
//! structural edit below invalidates even where no case fires.
//!
//! Functions here take the arena and a root slot rather than the whole
//! tree, so the same engine serves the public operations and the
//! subtree-level surgery of split and join.

use crate::arena::{Link, NodeArena, NodeIndex};
use crate::node::{link_height, link_size, RankDiff};

/// Recompute a node's cached rank-difference pair from its children.
pub(crate) fn refresh_diff<V>(nodes: &mut NodeArena<V>, idx: NodeIndex) {
    let left = link_height(nodes, nodes[idx].left);
    let right = link_height(nodes, nodes[idx].right);
    let height = nodes[idx].height;
    nodes[idx].diff = RankDiff::new(height - left, height - right);
}

/// Recompute a node's cached subtree size from its children.
pub(crate) fn refresh_size<V>(nodes: &mut NodeArena<V>, idx: NodeIndex) {
    let size = link_size(nodes, nodes[idx].left) + link_size(nodes, nodes[idx].right) + 1;
    nodes[idx].size = size;
}

/// Recompute both cached fields of a node.
pub(crate) fn refresh_caches<V>(nodes: &mut NodeArena<V>, idx: NodeIndex) {
    refresh_diff(nodes, idx);
    refresh_size(nodes, idx);
}

/// Recompute a node's height from its children.
///
/// Only the surgery paths use this: within the case table, heights move
/// exclusively through [`promote`] and [`demote`].
pub(crate) fn refresh_height<V>(nodes: &mut NodeArena<V>, idx: NodeIndex) {
    let left = link_height(nodes, nodes[idx].left);
    let right = link_height(nodes, nodes[idx].right);
    nodes[idx].height = left.max(right) + 1;
}

fn promote<V>(nodes: &mut NodeArena<V>, idx: NodeIndex) {
    nodes[idx].height += 1;
}

fn demote<V>(nodes: &mut NodeArena<V>, idx: NodeIndex) {
    nodes[idx].height -= 1;
}

/// Right rotation on `down`: its left child comes up to take its place,
/// and the left child's original right subtree becomes `down`'s new left
/// subtree. Parent and child links are rewired on both sides; `root` is
/// updated when `down` was the subtree root. Heights are not touched here;
/// the case table adjusts them with promotions and demotions.
fn rotate_right<V>(nodes: &mut NodeArena<V>, root: &mut Link, down: NodeIndex) {
    let up = nodes[down].left.expect("right rotation requires a left child");
    let across = nodes[up].right;

    nodes[down].left = across;
    if let Some(across) = across {
        nodes[across].parent = Some(down);
    }

    let parent = nodes[down].parent;
    nodes[up].right = Some(down);
    nodes[up].parent = parent;
    nodes[down].parent = Some(up);

    match parent {
        Some(parent) => {
            if nodes[parent].left == Some(down) {
                nodes[parent].left = Some(up);
            } else {
                nodes[parent].right = Some(up);
            }
        }
        None => *root = Some(up),
    }
}

/// Left rotation on `down`: the mirror image of [`rotate_right`].
fn rotate_left<V>(nodes: &mut NodeArena<V>, root: &mut Link, down: NodeIndex) {
    let up = nodes[down].right.expect("left rotation requires a right child");
    let across = nodes[up].left;

    nodes[down].right = across;
    if let Some(across) = across {
        nodes[across].parent = Some(down);
    }

    let parent = nodes[down].parent;
    nodes[up].left = Some(down);
    nodes[up].parent = parent;
    nodes[down].parent = Some(up);

    match parent {
        Some(parent) => {
            if nodes[parent].left == Some(down) {
                nodes[parent].left = Some(up);
            } else {
                nodes[parent].right = Some(up);
            }
        }
        None => *root = Some(up),
    }
}

/// Restore the AVL invariant after a structural mutation below `anchor`.
///
/// Returns the total operation cost: each rotation, promotion and demotion
/// counts as one operation. An absent anchor (the mutation emptied the
/// tree, or touched the root directly) costs nothing.
pub(crate) fn rebalance<V>(
    nodes: &mut NodeArena<V>,
    root: &mut Link,
    anchor: Link,
) -> usize {
    let Some(mut cur) = anchor else { return 0 };
    let mut ops = 0;

    refresh_caches(nodes, cur);

    loop {
        match nodes[cur].diff.pair() {
            // Balanced here; ancestors may still need cases or size
            // refreshes further up.
            (1, 1) | (2, 1) | (1, 2) => {}

            // A child grew level with this node: promote.
            (0, 1) | (1, 0) => {
                promote(nodes, cur);
                ops += 1;
                refresh_caches(nodes, cur);
            }

            // Left-heavy by two: resolved by the left child's own shape.
            (0, 2) => {
                let left = nodes[cur].left.expect("a (0,2) node has a left child");
                match nodes[left].diff.pair() {
                    // Outer grandchild is tall: single rotation.
                    (1, 2) => {
                        rotate_right(nodes, root, cur);
                        demote(nodes, cur);
                        ops += 2;
                        refresh_caches(nodes, cur);
                        let up = nodes[cur].parent.expect("rotation gave the anchor a parent");
                        refresh_caches(nodes, up);
                    }
                    // Inner grandchild is tall: double rotation. The
                    // grandchild surfaces as the subtree root; its new left
                    // child gives up the height the root gains.
                    (2, 1) => {
                        rotate_left(nodes, root, left);
                        rotate_right(nodes, root, cur);
                        demote(nodes, cur);
                        let up = nodes[cur].parent.expect("rotation gave the anchor a parent");
                        let sibling = nodes[up].left.expect("double rotation fills both child slots");
                        demote(nodes, sibling);
                        promote(nodes, up);
                        ops += 5;
                        refresh_caches(nodes, cur);
                        refresh_caches(nodes, sibling);
                        refresh_caches(nodes, up);
                    }
                    // Join splice shape: the left child keeps both of its
                    // children, so it is promoted as it comes up.
                    (1, 1) => {
                        rotate_right(nodes, root, cur);
                        let up = nodes[cur].parent.expect("rotation gave the anchor a parent");
                        promote(nodes, up);
                        ops += 2;
                        refresh_caches(nodes, cur);
                        refresh_caches(nodes, up);
                    }
                    (l, r) => {
                        debug_assert!(false, "left child of a (0,2) node is ({l},{r})");
                    }
                }
            }

            // Right-heavy by two: mirror of (0,2).
            (2, 0) => {
                let right = nodes[cur].right.expect("a (2,0) node has a right child");
                match nodes[right].diff.pair() {
                    (2, 1) => {
                        rotate_left(nodes, root, cur);
                        demote(nodes, cur);
                        ops += 2;
                        refresh_caches(nodes, cur);
                        let up = nodes[cur].parent.expect("rotation gave the anchor a parent");
                        refresh_caches(nodes, up);
                    }
                    (1, 2) => {
                        rotate_right(nodes, root, right);
                        rotate_left(nodes, root, cur);
                        demote(nodes, cur);
                        let up = nodes[cur].parent.expect("rotation gave the anchor a parent");
                        let sibling = nodes[up].right.expect("double rotation fills both child slots");
                        demote(nodes, sibling);
                        promote(nodes, up);
                        ops += 5;
                        refresh_caches(nodes, cur);
                        refresh_caches(nodes, sibling);
                        refresh_caches(nodes, up);
                    }
                    (1, 1) => {
                        rotate_left(nodes, root, cur);
                        let up = nodes[cur].parent.expect("rotation gave the anchor a parent");
                        promote(nodes, up);
                        ops += 2;
                        refresh_caches(nodes, cur);
                        refresh_caches(nodes, up);
                    }
                    (l, r) => {
                        debug_assert!(false, "right child of a (2,0) node is ({l},{r})");
                    }
                }
            }

            // Both children sank: demote.
            (2, 2) => {
                demote(nodes, cur);
                ops += 1;
                refresh_caches(nodes, cur);
            }

            // Left child sank by three: resolved by the right child's shape.
            (3, 1) => {
                let right = nodes[cur].right.expect("a (3,1) node has a right child");
                match nodes[right].diff.pair() {
                    (1, 1) => {
                        rotate_left(nodes, root, cur);
                        demote(nodes, cur);
                        let up = nodes[cur].parent.expect("rotation gave the anchor a parent");
                        promote(nodes, up);
                        ops += 3;
                        refresh_caches(nodes, cur);
                        refresh_caches(nodes, up);
                    }
                    (2, 1) => {
                        rotate_left(nodes, root, cur);
                        demote(nodes, cur);
                        demote(nodes, cur);
                        ops += 3;
                        refresh_caches(nodes, cur);
                        let up = nodes[cur].parent.expect("rotation gave the anchor a parent");
                        refresh_caches(nodes, up);
                    }
                    (1, 2) => {
                        rotate_right(nodes, root, right);
                        rotate_left(nodes, root, cur);
                        demote(nodes, cur);
                        demote(nodes, cur);
                        let up = nodes[cur].parent.expect("rotation gave the anchor a parent");
                        let sibling = nodes[up].right.expect("double rotation fills both child slots");
                        demote(nodes, sibling);
                        promote(nodes, up);
                        ops += 6;
                        refresh_caches(nodes, cur);
                        refresh_caches(nodes, sibling);
                        refresh_caches(nodes, up);
                    }
                    (l, r) => {
                        debug_assert!(false, "right child of a (3,1) node is ({l},{r})");
                    }
                }
            }

            // Right child sank by three: mirror of (3,1).
            (1, 3) => {
                let left = nodes[cur].left.expect("a (1,3) node has a left child");
                match nodes[left].diff.pair() {
                    (1, 1) => {
                        rotate_right(nodes, root, cur);
                        demote(nodes, cur);
                        let up = nodes[cur].parent.expect("rotation gave the anchor a parent");
                        promote(nodes, up);
                        ops += 3;
                        refresh_caches(nodes, cur);
                        refresh_caches(nodes, up);
                    }
                    (1, 2) => {
                        rotate_right(nodes, root, cur);
                        demote(nodes, cur);
                        demote(nodes, cur);
                        ops += 3;
                        refresh_caches(nodes, cur);
                        let up = nodes[cur].parent.expect("rotation gave the anchor a parent");
                        refresh_caches(nodes, up);
                    }
                    (2, 1) => {
                        rotate_left(nodes, root, left);
                        rotate_right(nodes, root, cur);
                        demote(nodes, cur);
                        demote(nodes, cur);
                        let up = nodes[cur].parent.expect("rotation gave the anchor a parent");
                        let sibling = nodes[up].left.expect("double rotation fills both child slots");
                        demote(nodes, sibling);
                        promote(nodes, up);
                        ops += 6;
                        refresh_caches(nodes, cur);
                        refresh_caches(nodes, sibling);
                        refresh_caches(nodes, up);
                    }
                    (l, r) => {
                        debug_assert!(false, "left child of a (1,3) node is ({l},{r})");
                    }
                }
            }

            (l, r) => {
                debug_assert!(false, "rank difference ({l},{r}) is outside the case table");
            }
        }

        // A structural edit below changes every ancestor's subtree count,
        // so the size refresh runs on each climbed node regardless of
        // whether a case fired.
        refresh_size(nodes, cur);

        let Some(parent) = nodes[cur].parent else { break };
        cur = parent;
        refresh_diff(nodes, cur);
    }

    ops
}
