/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Write path: insertion.

use crate::error::Error;
use crate::node::AvlNode;
use crate::tree::{find, rebalance, AvlIndex};

impl<V> AvlIndex<V> {
    /// Insert a key-value pair.
    ///
    /// Returns the number of rebalancing operations performed (each
    /// rotation, promotion and demotion counts as one), or
    /// [`Error::DuplicateKey`] if `key` is already present, in which case
    /// the index is left unchanged. Inserting into an empty index performs
    /// no rebalancing operations.
    pub fn insert(&mut self, key: i64, value: V) -> Result<usize, Error> {
        let result = self.insert_inner(key, value);

        #[cfg(feature = "unittest")]
        self.check_tree_invariants();

        result
    }

    fn insert_inner(&mut self, key: i64, value: V) -> Result<usize, Error> {
        let Some(root) = self.root else {
            let idx = self.nodes.insert(AvlNode::leaf(key, value));
            self.root = Some(idx);
            self.min = Some(idx);
            self.max = Some(idx);
            return Ok(0);
        };

        let parent = find::position_of(&self.nodes, root, key);
        if self.nodes[parent].key == key {
            return Err(Error::DuplicateKey(key));
        }

        let idx = self.nodes.insert(AvlNode::leaf(key, value));
        self.nodes[idx].parent = Some(parent);

        if key > self.nodes[parent].key {
            self.nodes[parent].right = Some(idx);

            let max = self.max.expect("a non-empty index caches its maximum");
            if key > self.nodes[max].key {
                self.max = Some(idx);
            }
        } else {
            self.nodes[parent].left = Some(idx);

            let min = self.min.expect("a non-empty index caches its minimum");
            if key < self.nodes[min].key {
                self.min = Some(idx);
            }
        }

        Ok(rebalance::rebalance(
            &mut self.nodes,
            &mut self.root,
            Some(parent),
        ))
    }
}
