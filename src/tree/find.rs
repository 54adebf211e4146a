/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Read path: position finding and ordered navigation.
//!
//! Everything here is a plain tree walk. The free functions operate on the
//! arena directly so the write path and the surgery code can navigate
//! subtrees that are temporarily detached from any index.

use crate::arena::{NodeArena, NodeIndex};
use crate::tree::AvlIndex;

/// Locate `key` in the subtree under `root`.
///
/// Returns the node holding `key` if present, otherwise the last real node
/// visited, i.e. the node that would become `key`'s parent on insertion.
pub(crate) fn position_of<V>(nodes: &NodeArena<V>, root: NodeIndex, key: i64) -> NodeIndex {
    let mut cur = root;

    loop {
        let node = &nodes[cur];
        let next = if key == node.key {
            return cur;
        } else if key < node.key {
            node.left
        } else {
            node.right
        };

        match next {
            Some(child) => cur = child,
            None => return cur,
        }
    }
}

/// The node with the smallest key in the subtree under `idx`.
pub(crate) fn min_in_subtree<V>(nodes: &NodeArena<V>, mut cur: NodeIndex) -> NodeIndex {
    while let Some(left) = nodes[cur].left {
        cur = left;
    }
    cur
}

/// The node with the largest key in the subtree under `idx`.
pub(crate) fn max_in_subtree<V>(nodes: &NodeArena<V>, mut cur: NodeIndex) -> NodeIndex {
    while let Some(right) = nodes[cur].right {
        cur = right;
    }
    cur
}

/// In-order successor of `idx`: the leftmost node of its right subtree, or
/// else the nearest ancestor whose left subtree contains `idx`. Returns
/// `None` when `idx` holds the largest key.
pub(crate) fn successor_of<V>(nodes: &NodeArena<V>, idx: NodeIndex) -> Option<NodeIndex> {
    if let Some(right) = nodes[idx].right {
        return Some(min_in_subtree(nodes, right));
    }

    let mut cur = idx;
    while let Some(parent) = nodes[cur].parent {
        if nodes[parent].right == Some(cur) {
            cur = parent;
        } else {
            return Some(parent);
        }
    }
    None
}

/// In-order predecessor of `idx`: the mirror of [`successor_of`]. Returns
/// `None` when `idx` holds the smallest key.
pub(crate) fn predecessor_of<V>(nodes: &NodeArena<V>, idx: NodeIndex) -> Option<NodeIndex> {
    if let Some(left) = nodes[idx].left {
        return Some(max_in_subtree(nodes, left));
    }

    let mut cur = idx;
    while let Some(parent) = nodes[cur].parent {
        if nodes[parent].left == Some(cur) {
            cur = parent;
        } else {
            return Some(parent);
        }
    }
    None
}

impl<V> AvlIndex<V> {
    /// Look up the value stored at `key`. No side effects.
    pub fn get(&self, key: i64) -> Option<&V> {
        let root = self.root?;
        let idx = position_of(&self.nodes, root, key);
        let node = &self.nodes[idx];
        (node.key == key).then_some(&node.value)
    }

    /// Look up the value stored at `key`, mutably.
    pub fn get_mut(&mut self, key: i64) -> Option<&mut V> {
        let root = self.root?;
        let idx = position_of(&self.nodes, root, key);
        if self.nodes[idx].key != key {
            return None;
        }
        Some(&mut self.nodes[idx].value)
    }

    /// Returns `true` if the index contains an entry for `key`.
    pub fn contains_key(&self, key: i64) -> bool {
        self.get(key).is_some()
    }
}
