/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Error types for the AVL index.

use thiserror::Error;

/// Failure signals for the expected error conditions of the index.
///
/// Only the conditions a caller can reasonably run into are reported here:
/// inserting a key that is already present, and deleting a key that is not.
/// Violated preconditions on [`split`](crate::AvlIndex::split) and
/// [`join`](crate::AvlIndex::join) are caller contract violations, checked
/// with `debug_assert!` only; the result is unspecified when they are
/// violated in a release build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The key handed to `insert` is already present in the index.
    #[error("key {0} is already present in the index")]
    DuplicateKey(i64),

    /// The key handed to `delete` is not present in the index.
    #[error("key {0} was not found in the index")]
    KeyNotFound(i64),
}
