/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Debug and introspection utilities for the AVL index.

use std::fmt;

use crate::arena::NodeIndex;
use crate::tree::AvlIndex;

impl<V: fmt::Debug> fmt::Debug for AvlIndex<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> AvlIndex<V> {
    /// Render the tree structure as an indented listing, one node per
    /// line, annotated with height, subtree size and the rank-difference
    /// pair. Intended for debugging sessions and test failure output.
    pub fn dump(&self) -> String {
        let mut out = String::from("AvlIndex");
        match self.root {
            Some(root) => self.dump_node(root, "", "└─", &mut out),
            None => out.push_str(" ∅"),
        }
        out
    }

    fn dump_node(&self, idx: NodeIndex, tab: &str, side: &str, out: &mut String) {
        use fmt::Write;

        let node = &self.nodes[idx];
        let diff = node.rank_diff();
        let _ = write!(
            out,
            "\n{tab}{side} {} h={} s={} d=({},{})",
            node.key,
            node.height,
            node.size,
            diff.left(),
            diff.right(),
        );

        let tab = format!("{tab}  ");
        if let Some(left) = node.left {
            self.dump_node(left, &tab, "←", out);
        }
        if let Some(right) = node.right {
            self.dump_node(right, &tab, "→", out);
        }
    }
}
