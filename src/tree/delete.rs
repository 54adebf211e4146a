/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Write path: deletion.
//!
//! Three structural cases, each producing one anchor for the balancing
//! engine:
//!
//! 1. **Leaf**: detach it from its parent; anchor = parent.
//! 2. **Unary** (one real child): splice the child into the deleted node's
//!    slot; anchor = parent.
//! 3. **Binary**: the in-order successor (guaranteed to have no left
//!    child) donates its key and value to the deleted node's slot, and is
//!    itself removed from its original position as a leaf or unary node.
//!    Anchor = the successor's original parent, or the slot that inherited
//!    the successor's identity when the successor was the deleted node's
//!    direct right child.

use crate::arena::NodeIndex;
use crate::error::Error;
use crate::node::AvlNode;
use crate::tree::{find, rebalance, AvlIndex};

impl<V> AvlIndex<V> {
    /// Delete the entry stored at `key`.
    ///
    /// Returns the number of rebalancing operations performed (each
    /// rotation, promotion and demotion counts as one), or
    /// [`Error::KeyNotFound`] if `key` is absent, in which case the index
    /// is left unchanged. The removed value is dropped.
    pub fn delete(&mut self, key: i64) -> Result<usize, Error> {
        let result = self.delete_inner(key);

        #[cfg(feature = "unittest")]
        self.check_tree_invariants();

        result
    }

    fn delete_inner(&mut self, key: i64) -> Result<usize, Error> {
        let Some(root) = self.root else {
            return Err(Error::KeyNotFound(key));
        };

        let pos = find::position_of(&self.nodes, root, key);
        if self.nodes[pos].key != key {
            return Err(Error::KeyNotFound(key));
        }

        let was_min = self.min == Some(pos);
        let was_max = self.max == Some(pos);

        let anchor = match (self.nodes[pos].left, self.nodes[pos].right) {
            (None, None) => self.detach_leaf(pos),
            (Some(child), None) | (None, Some(child)) => self.splice_unary(pos, child),
            (Some(_), Some(right)) => self.replace_with_successor(pos, right),
        };

        let ops = rebalance::rebalance(&mut self.nodes, &mut self.root, anchor);

        if let Some(root) = self.root {
            if was_min {
                self.min = Some(find::min_in_subtree(&self.nodes, root));
            }
            if was_max {
                self.max = Some(find::max_in_subtree(&self.nodes, root));
            }
        }

        Ok(ops)
    }

    /// Remove a childless node. The sole node of the index empties it.
    fn detach_leaf(&mut self, pos: NodeIndex) -> Option<NodeIndex> {
        let parent = self.nodes[pos].parent;

        match parent {
            Some(parent) => {
                if self.nodes[parent].left == Some(pos) {
                    self.nodes[parent].left = None;
                } else {
                    self.nodes[parent].right = None;
                }
            }
            None => {
                self.root = None;
                self.min = None;
                self.max = None;
            }
        }

        self.nodes.remove(pos);
        parent
    }

    /// Remove a node with exactly one child by splicing the child into its
    /// slot.
    fn splice_unary(&mut self, pos: NodeIndex, child: NodeIndex) -> Option<NodeIndex> {
        let parent = self.nodes[pos].parent;
        self.nodes[child].parent = parent;

        match parent {
            Some(parent) => {
                if self.nodes[parent].left == Some(pos) {
                    self.nodes[parent].left = Some(child);
                } else {
                    self.nodes[parent].right = Some(child);
                }
            }
            None => self.root = Some(child),
        }

        self.nodes.remove(pos);
        parent
    }

    /// Remove a node with two children: its in-order successor's identity
    /// moves into its slot, and the successor node (which never has a left
    /// child) is unlinked from its original position.
    fn replace_with_successor(&mut self, pos: NodeIndex, right: NodeIndex) -> Option<NodeIndex> {
        let succ = find::min_in_subtree(&self.nodes, right);
        let succ_right = self.nodes[succ].right;

        let anchor = if succ == right {
            // The successor is the deleted node's own right child; its
            // right subtree moves up with it, and rebalancing starts at
            // the slot that inherited its identity.
            self.nodes[pos].right = succ_right;
            if let Some(r) = succ_right {
                self.nodes[r].parent = Some(pos);
            }
            Some(pos)
        } else {
            // The successor is a left child somewhere below; splice its
            // right subtree into its place.
            let succ_parent = self.nodes[succ]
                .parent
                .expect("a successor below the right child has a parent");
            self.nodes[succ_parent].left = succ_right;
            if let Some(r) = succ_right {
                self.nodes[r].parent = Some(succ_parent);
            }
            Some(succ_parent)
        };

        let AvlNode { key, value, .. } = self.nodes.remove(succ);
        self.nodes[pos].key = key;
        self.nodes[pos].value = value;

        // The successor lives in a right subtree, so it can never be the
        // cached minimum; it can be the cached maximum, whose handle now
        // lives in the inherited slot.
        if self.max == Some(succ) {
            self.max = Some(pos);
        }

        anchor
    }
}
