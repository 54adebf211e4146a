/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! AvlIndex - an in-memory ordered key-value index with split and join.
//!
//! This crate provides an ordered index over `i64` keys backed by a
//! height-balanced (AVL) binary search tree. Search, insertion and
//! deletion run in O(log n); the index additionally supports **split**
//! (partition around a key) and **join** (merge two indexes whose key
//! ranges do not interleave), both built on the same balancing engine and
//! costing work proportional to the *rank difference* between the trees
//! rather than to their sizes.
//!
//! # Overview
//!
//! The core of the crate is the rank-difference balancing engine: every
//! node caches the pair `(height - height(left), height - height(right))`,
//! and after any structural mutation the engine climbs towards the root
//! restoring the invariant that each pair is `(1,1)`, `(2,1)` or `(1,2)`
//! through a fixed table of promotions, demotions and rotations. The
//! mutating operations report how many such operations they performed.
//!
//! Nodes live in an arena and reference each other by stable integer
//! handles, which keeps the upward rebalancing walk cheap and safe without
//! owning back-pointers.
//!
//! The structure is single-threaded and single-writer: a building block
//! for higher-level ordered containers.
//!
//! # Example
//!
//! ```
//! use avl_index::AvlIndex;
//!
//! let mut index = AvlIndex::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     index.insert(key, key * 10).unwrap();
//! }
//!
//! assert_eq!(index.len(), 7);
//! assert_eq!(index.get(4), Some(&40));
//! assert_eq!(index.keys().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7, 8, 9]);
//!
//! // Partition around 5, then stitch the halves back together.
//! let (lower, mut upper) = index.split(5);
//! assert_eq!(lower.keys().collect::<Vec<_>>(), vec![1, 3, 4]);
//! assert_eq!(upper.keys().collect::<Vec<_>>(), vec![7, 8, 9]);
//!
//! upper.join(5, 50, lower);
//! assert_eq!(upper.keys().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7, 8, 9]);
//! ```

mod arena;
mod debug;
mod error;
mod iter;
mod node;
mod tree;

pub use arena::NodeIndex;
pub use error::Error;
pub use iter::{Iter, Keys, Values};
pub use node::{AvlNode, RankDiff};
pub use tree::AvlIndex;
