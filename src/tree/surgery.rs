/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tree surgery: split and join.
//!
//! Both operations reuse the balancing engine. Join splices a connector
//! node at the rank boundary between two trees with strictly ordered key
//! ranges, found by descending the taller tree's facing side; this is why
//! its balancing work is proportional to the rank gap rather than to
//! either tree's size. Split replays the root path of the pivot node as a
//! sequence of such joins, whose costs telescope to O(log n) amortized.
//!
//! The surgery itself is pure index rewiring inside one arena. Moving
//! nodes between two indexes' arenas (absorbing the joined tree, carving
//! out the smaller split half) is additionally linear in the number of
//! nodes moved; it does not affect the operation-cost contract.

use std::collections::HashMap;

use crate::arena::{Link, NodeArena, NodeIndex};
use crate::node::{link_height, link_size, AvlNode, Dir};
use crate::tree::rebalance::{rebalance, refresh_caches, refresh_height};
use crate::tree::{find, AvlIndex};

impl<V> AvlIndex<V> {
    /// Merge `other` and a connector entry into this index.
    ///
    /// # Precondition
    ///
    /// The key ranges must be disjoint and separated by the connector:
    /// every key of `other` and `key` itself lie entirely below or entirely
    /// above every key already present, with `key` between `other`'s keys
    /// and this index's keys. This is the caller's contract; it is checked
    /// only in debug builds and the result is unspecified when violated.
    ///
    /// Returns `|rank(self) - rank(other)| + 1`, the designed cost bound
    /// for the merge.
    pub fn join(&mut self, key: i64, value: V, other: AvlIndex<V>) -> usize {
        debug_assert!(
            self.join_precondition_holds(key, &other),
            "join precondition violated: key ranges must be disjoint, separated by key {key}",
        );

        let cost = self.rank().abs_diff(other.rank()) as usize + 1;

        let other_root = self.absorb(other);
        let connector = self.nodes.insert(AvlNode::leaf(key, value));

        // Which side of the connector each tree lies on follows from the
        // precondition: the tree whose keys exceed `key` goes right.
        let (left, right) = match self.root {
            Some(root) if self.nodes[root].key > key => (other_root, self.root),
            Some(_) => (self.root, other_root),
            None => match other_root {
                Some(o) if self.nodes[o].key > key => (None, other_root),
                _ => (other_root, None),
            },
        };

        let root = join_subtrees(&mut self.nodes, left, connector, right);
        self.root = Some(root);
        self.min = Some(find::min_in_subtree(&self.nodes, root));
        self.max = Some(find::max_in_subtree(&self.nodes, root));

        #[cfg(feature = "unittest")]
        self.check_tree_invariants();

        cost
    }

    /// Partition the index around `key`, consuming it.
    ///
    /// Returns `(lower, upper)`: every key strictly below `key` and every
    /// key strictly above it, each independently balanced. The entry for
    /// `key` itself is discarded.
    ///
    /// # Precondition
    ///
    /// `key` must be present. This is the caller's contract; it is checked
    /// only in debug builds and the result is unspecified when violated.
    pub fn split(mut self, key: i64) -> (AvlIndex<V>, AvlIndex<V>) {
        debug_assert!(
            self.contains_key(key),
            "split precondition violated: key {key} must be present",
        );

        let Some(root) = self.root else {
            return (AvlIndex::new(), AvlIndex::new());
        };

        let pivot = find::position_of(&self.nodes, root, key);

        // Record the root path before the joins rewire it: each step is
        // (parent, side the lower node hangs on).
        let mut path = Vec::new();
        let mut cur = pivot;
        while let Some(parent) = self.nodes[cur].parent {
            let dir = if self.nodes[parent].right == Some(cur) {
                Dir::Right
            } else {
                Dir::Left
            };
            path.push((parent, dir));
            cur = parent;
        }

        // The pivot's subtrees seed the two halves; the pivot is discarded.
        let mut lower = self.nodes[pivot].left;
        let mut upper = self.nodes[pivot].right;
        if let Some(l) = lower {
            self.nodes[l].parent = None;
        }
        if let Some(u) = upper {
            self.nodes[u].parent = None;
        }
        self.nodes.remove(pivot);

        for (parent, dir) in path {
            // The parent becomes a zero-size connector carrying its entry;
            // its other-side subtree joins the matching half.
            let other = match dir {
                Dir::Right => self.nodes[parent].left,
                Dir::Left => self.nodes[parent].right,
            };
            if let Some(o) = other {
                self.nodes[o].parent = None;
            }
            self.nodes[parent].reset_links();

            match dir {
                // The pivot hung right of this parent, so the parent and
                // everything on its left are below the split key.
                Dir::Right => {
                    lower = Some(join_subtrees(&mut self.nodes, other, parent, lower));
                }
                Dir::Left => {
                    upper = Some(join_subtrees(&mut self.nodes, upper, parent, other));
                }
            }
        }

        // Carve the smaller half into its own arena; the larger half keeps
        // this one.
        let halves = if link_size(&self.nodes, lower) <= link_size(&self.nodes, upper) {
            let lower_half = self.carve(lower);
            (lower_half, self.into_half(upper))
        } else {
            let upper_half = self.carve(upper);
            (self.into_half(lower), upper_half)
        };

        #[cfg(feature = "unittest")]
        {
            halves.0.check_tree_invariants();
            halves.1.check_tree_invariants();
        }

        halves
    }

    /// Whether `key` separates `other`'s keys from this index's keys.
    fn join_precondition_holds(&self, key: i64, other: &AvlIndex<V>) -> bool {
        let below_self = self.min_key().map_or(true, |lo| key < lo);
        let above_self = self.max_key().map_or(true, |hi| key > hi);
        let other_below = other.max_key().map_or(true, |hi| hi < key);
        let other_above = other.min_key().map_or(true, |lo| lo > key);

        (below_self && other_below) || (above_self && other_above)
    }

    /// Move every node of `other` into this index's arena, rewriting the
    /// stored links. Returns the remapped root.
    fn absorb(&mut self, other: AvlIndex<V>) -> Link {
        let AvlIndex { nodes, root, .. } = other;
        if root.is_none() {
            return None;
        }

        let mut remap = HashMap::with_capacity(nodes.len());
        let mut moved = Vec::with_capacity(nodes.len());
        for (old, node) in nodes.into_entries() {
            let new = self.nodes.insert(node);
            remap.insert(old, new);
            moved.push(new);
        }

        for idx in moved {
            let node = &mut self.nodes[idx];
            node.parent = node.parent.map(|p| remap[&p]);
            node.left = node.left.map(|l| remap[&l]);
            node.right = node.right.map(|r| remap[&r]);
        }

        root.map(|r| remap[&r])
    }

    /// Move the subtree under `root` out of this arena into a fresh index.
    fn carve(&mut self, root: Link) -> AvlIndex<V> {
        let Some(root) = root else {
            return AvlIndex::new();
        };

        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            order.push(idx);
            if let Some(left) = self.nodes[idx].left {
                stack.push(left);
            }
            if let Some(right) = self.nodes[idx].right {
                stack.push(right);
            }
        }

        let mut nodes = NodeArena::with_capacity(order.len());
        let mut remap = HashMap::with_capacity(order.len());
        let mut moved = Vec::with_capacity(order.len());
        for old in order {
            let new = nodes.insert(self.nodes.remove(old));
            remap.insert(old, new);
            moved.push(new);
        }

        for idx in moved {
            let node = &mut nodes[idx];
            node.parent = node.parent.map(|p| remap[&p]);
            node.left = node.left.map(|l| remap[&l]);
            node.right = node.right.map(|r| remap[&r]);
        }

        let root = remap[&root];
        let min = find::min_in_subtree(&nodes, root);
        let max = find::max_in_subtree(&nodes, root);
        AvlIndex {
            nodes,
            root: Some(root),
            min: Some(min),
            max: Some(max),
        }
    }

    /// Re-point this index at `root`, keeping the arena it already owns.
    fn into_half(mut self, root: Link) -> AvlIndex<V> {
        self.root = root;
        match root {
            Some(root) => {
                self.min = Some(find::min_in_subtree(&self.nodes, root));
                self.max = Some(find::max_in_subtree(&self.nodes, root));
            }
            None => {
                self.min = None;
                self.max = None;
            }
        }
        self
    }
}

/// Join two subtrees with strictly ordered key ranges through a detached
/// connector leaf, returning the root of the joined subtree.
///
/// All three pieces live in `nodes`; `left`'s keys are strictly below the
/// connector's and `right`'s strictly above. The splice point is found by
/// rank-guided descent along the taller side's facing spine, so the
/// balancing work is proportional to the rank gap between the sides.
pub(crate) fn join_subtrees<V>(
    nodes: &mut NodeArena<V>,
    left: Link,
    connector: NodeIndex,
    right: Link,
) -> NodeIndex {
    match (left, right) {
        // Nothing to merge: the connector is the whole result.
        (None, None) => connector,

        // One side empty: the connector becomes the new extreme of the
        // other side, spliced in directly above the old one.
        (None, Some(right_root)) => {
            let old_min = find::min_in_subtree(nodes, right_root);
            let parent = nodes[old_min].parent;

            nodes[connector].right = Some(old_min);
            nodes[old_min].parent = Some(connector);
            nodes[connector].parent = parent;

            let mut root = Some(right_root);
            match parent {
                Some(parent) => nodes[parent].left = Some(connector),
                None => root = Some(connector),
            }

            refresh_height(nodes, connector);
            refresh_caches(nodes, connector);
            rebalance(nodes, &mut root, Some(connector));
            root.expect("a joined subtree has a root")
        }

        (Some(left_root), None) => {
            let old_max = find::max_in_subtree(nodes, left_root);
            let parent = nodes[old_max].parent;

            nodes[connector].left = Some(old_max);
            nodes[old_max].parent = Some(connector);
            nodes[connector].parent = parent;

            let mut root = Some(left_root);
            match parent {
                Some(parent) => nodes[parent].right = Some(connector),
                None => root = Some(connector),
            }

            refresh_height(nodes, connector);
            refresh_caches(nodes, connector);
            rebalance(nodes, &mut root, Some(connector));
            root.expect("a joined subtree has a root")
        }

        (Some(left_root), Some(right_root)) => {
            let left_rank = nodes[left_root].height;
            let right_rank = nodes[right_root].height;

            if left_rank == right_rank {
                // Equal ranks: the connector roots both sides; the result
                // is already balanced.
                nodes[connector].left = Some(left_root);
                nodes[connector].right = Some(right_root);
                nodes[left_root].parent = Some(connector);
                nodes[right_root].parent = Some(connector);

                refresh_height(nodes, connector);
                refresh_caches(nodes, connector);
                connector
            } else if right_rank > left_rank {
                // Descend the taller side's left spine to the first
                // subtree no taller than the short side, and splice the
                // connector in its place.
                let mut parent = None;
                let mut spot = Some(right_root);
                while link_height(nodes, spot) > left_rank {
                    let idx = spot.expect("positive height implies a real node");
                    parent = Some(idx);
                    spot = nodes[idx].left;
                }

                nodes[connector].left = Some(left_root);
                nodes[connector].right = spot;
                nodes[left_root].parent = Some(connector);
                if let Some(spot) = spot {
                    nodes[spot].parent = Some(connector);
                }
                nodes[connector].parent = parent;

                let mut root = Some(right_root);
                match parent {
                    Some(parent) => nodes[parent].left = Some(connector),
                    None => root = Some(connector),
                }

                refresh_height(nodes, connector);
                refresh_caches(nodes, connector);
                rebalance(nodes, &mut root, Some(connector));
                root.expect("a joined subtree has a root")
            } else {
                let mut parent = None;
                let mut spot = Some(left_root);
                while link_height(nodes, spot) > right_rank {
                    let idx = spot.expect("positive height implies a real node");
                    parent = Some(idx);
                    spot = nodes[idx].right;
                }

                nodes[connector].left = spot;
                nodes[connector].right = Some(right_root);
                nodes[right_root].parent = Some(connector);
                if let Some(spot) = spot {
                    nodes[spot].parent = Some(connector);
                }
                nodes[connector].parent = parent;

                let mut root = Some(left_root);
                match parent {
                    Some(parent) => nodes[parent].right = Some(connector),
                    None => root = Some(connector),
                }

                refresh_height(nodes, connector);
                refresh_caches(nodes, connector);
                rebalance(nodes, &mut root, Some(connector));
                root.expect("a joined subtree has a root")
            }
        }
    }
}
