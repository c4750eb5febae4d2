// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for index construction and handle bookkeeping.

use thiserror::Error;

/// Errors reported by [`BucketIndex`](crate::BucketIndex) handle operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum IndexError {
    /// The handle is already present in the index.
    #[error("handle is already present in the index")]
    InvalidHandle,
    /// The handle is not present in the index.
    #[error("handle is not present in the index")]
    UnknownHandle,
}

/// Invalid construction parameters for a [`BucketIndex`](crate::BucketIndex).
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// An index needs at least one bucket.
    #[error("bucket count must be positive")]
    ZeroBuckets,
    /// The coordinate scale must be finite and strictly positive.
    #[error("bucket scale must be finite and positive, got {0}")]
    InvalidScale(f64),
}
