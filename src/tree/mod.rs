/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! AVL index implementation.
//!
//! This module contains the core tree structure and algorithms for the
//! ordered key-value index. The implementation is split into sub-modules
//! by concern:
//! - [`find`]: Read path (position finding, ordered navigation)
//! - [`rebalance`]: The balancing engine (the rank-difference case table)
//! - [`insert`] / [`delete`]: Write path
//! - [`surgery`]: Split and join
//! - [`invariants`]: Structural verification

mod delete;
pub(crate) mod find;
mod insert;
mod invariants;
pub(crate) mod rebalance;
mod surgery;

use crate::arena::{NodeArena, NodeIndex};
use crate::iter::{Iter, Keys, Values};
use crate::node::AvlNode;

/// An ordered key-value index over `i64` keys, backed by a height-balanced
/// (AVL) binary search tree.
///
/// Search, insertion and deletion run in O(log n). On top of the same
/// balancing engine the index supports [`split`](Self::split) (partition
/// around a key) and [`join`](Self::join) (merge two indexes with disjoint
/// key ranges), whose balancing work is proportional to the rank difference
/// between the trees rather than to their sizes.
///
/// The structure is single-writer and single-threaded: a building block for
/// higher-level ordered containers, not a service.
///
/// # Arena Storage
///
/// All nodes are stored in an arena. Children and parents are referenced by
/// [`NodeIndex`] instead of owned pointers, which keeps the upward
/// rebalancing walk O(1) per step without back-pointer ownership cycles,
/// and makes rotations link rewiring rather than node moves.
///
/// # Balancing
///
/// Every node caches its height (AVL rank), its rank-difference pair
/// towards its children, and its subtree size. After any structural
/// mutation the engine climbs from the mutation point to the root,
/// restoring the invariant that every pair is `(1,1)`, `(2,1)` or `(1,2)`
/// via a fixed case table of promotions, demotions and rotations.
///
/// # Example
///
/// ```
/// use avl_index::AvlIndex;
///
/// let mut index = AvlIndex::new();
/// for (key, name) in [(5, "five"), (3, "three"), (8, "eight")] {
///     index.insert(key, name).unwrap();
/// }
///
/// assert_eq!(index.get(3), Some(&"three"));
/// assert_eq!(index.min(), Some(&"three"));
/// assert_eq!(index.keys().collect::<Vec<_>>(), vec![3, 5, 8]);
///
/// let (lower, upper) = index.split(5);
/// assert_eq!(lower.keys().collect::<Vec<_>>(), vec![3]);
/// assert_eq!(upper.keys().collect::<Vec<_>>(), vec![8]);
/// ```
pub struct AvlIndex<V> {
    /// Arena holding all tree nodes.
    pub(crate) nodes: NodeArena<V>,
    /// The root node, or `None` when the index is empty.
    pub(crate) root: Option<NodeIndex>,
    /// Cached handle of the node with the smallest key.
    pub(crate) min: Option<NodeIndex>,
    /// Cached handle of the node with the largest key.
    pub(crate) max: Option<NodeIndex>,
}

impl<V> AvlIndex<V> {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self {
            nodes: NodeArena::new(),
            root: None,
            min: None,
            max: None,
        }
    }

    /// Returns the number of entries in the index.
    pub fn len(&self) -> usize {
        self.root.map_or(0, |root| self.nodes[root].size)
    }

    /// Returns `true` if the index contains no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The rank (root height) of the tree; -1 when empty.
    pub fn rank(&self) -> i32 {
        self.root.map_or(-1, |root| self.nodes[root].height)
    }

    /// The value stored at the smallest key, or `None` when empty.
    pub fn min(&self) -> Option<&V> {
        self.min.map(|idx| &self.nodes[idx].value)
    }

    /// The value stored at the largest key, or `None` when empty.
    pub fn max(&self) -> Option<&V> {
        self.max.map(|idx| &self.nodes[idx].value)
    }

    /// The smallest key, or `None` when empty.
    pub fn min_key(&self) -> Option<i64> {
        self.min.map(|idx| self.nodes[idx].key)
    }

    /// The largest key, or `None` when empty.
    pub fn max_key(&self) -> Option<i64> {
        self.max.map(|idx| self.nodes[idx].key)
    }

    /// Resolve a [`NodeIndex`] to a shared reference to the node.
    pub fn node(&self, idx: NodeIndex) -> &AvlNode<V> {
        &self.nodes[idx]
    }

    /// Get the root node index, or `None` when the index is empty.
    pub fn root_index(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Iterate over `(key, &value)` entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self)
    }

    /// Iterate over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys(self.iter())
    }

    /// Iterate over the values in ascending key order.
    pub fn values(&self) -> Values<'_, V> {
        Values(self.iter())
    }

    /// Remove all entries from the index.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.min = None;
        self.max = None;
    }

    /// Calculate the total memory usage of the index, in bytes.
    pub fn mem_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.nodes.mem_usage()
    }
}

impl<V> Default for AvlIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(i64, V)> for AvlIndex<V> {
    fn from_iter<T: IntoIterator<Item = (i64, V)>>(iter: T) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl<V> Extend<(i64, V)> for AvlIndex<V> {
    /// Insert every entry; an already-present key has its value replaced.
    fn extend<T: IntoIterator<Item = (i64, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            if self.contains_key(key) {
                *self.get_mut(key).expect("key is present") = value;
            } else {
                let inserted = self.insert(key, value);
                debug_assert!(inserted.is_ok());
            }
        }
    }
}

impl<'a, V> IntoIterator for &'a AvlIndex<V> {
    type Item = (i64, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
