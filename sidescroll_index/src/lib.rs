// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sidescroll Index: a one-dimensional bucket index for broad-phase pruning.
//!
//! The axis (typically screen-space x in a side-scroller) is cut into a fixed number of
//! buckets. Every handle sits in exactly one bucket, derived from its x-coordinate:
//!
//! `bucket = clamp(floor(x * scale), 0, bucket_count - 1)`
//!
//! - Insert, move, and remove handles supplied by the caller.
//! - Ask which bucket a handle occupies in O(1) (a hashed reverse map).
//! - Query a bucket interval in time proportional to its width and contents, not the
//!   total number of handles.
//!
//! Range queries return handles in ascending bucket order and, within a bucket, in the
//! order the handles arrived there. Two runs fed the same operations produce the same
//! sequences, which keeps collision passes built on top reproducible.
//!
//! # Example
//!
//! ```rust
//! use sidescroll_index::BucketIndex;
//!
//! let mut idx: BucketIndex<u32> = BucketIndex::new(10, 1.0).unwrap();
//! idx.insert(1, 3.2).unwrap();
//! idx.insert(2, 3.9).unwrap();
//! idx.insert(3, 5.0).unwrap();
//!
//! let hits: Vec<_> = idx.query_range(3, 3).collect();
//! assert_eq!(hits, [1, 2]);
//!
//! // Moving across a bucket boundary re-buckets the handle.
//! idx.move_to(2, 7.1).unwrap();
//! assert_eq!(idx.bucket_of(2), Ok(7));
//!
//! // Removal is idempotent.
//! assert_eq!(idx.remove(3), Some(5));
//! assert_eq!(idx.remove(3), None);
//! ```
//!
//! ## Ranges
//!
//! Bucket bounds are signed so callers can write `b - 1 ..= b + 1` neighbourhoods without
//! checking for underflow. [`BucketRange`] clamps both ends; if the clamped low bound
//! exceeds the clamped high bound the range is empty.
//!
//! ### Float semantics
//!
//! NaN coordinates map to bucket `0`. Infinite coordinates clamp to the first or last bucket.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod error;
pub mod index;
pub mod range;

pub use error::{ConfigError, IndexError};
pub use index::BucketIndex;
pub use range::BucketRange;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::vec::Vec;

    #[derive(Clone)]
    struct Rng(u64);

    impl Rng {
        fn next_u64(&mut self) -> u64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            x
        }

        /// A coordinate in hundredths, spanning [-2, 34) so both ends of a 32 bucket axis clamp.
        fn next_centi(&mut self) -> i64 {
            (self.next_u64() % 3600) as i64 - 200
        }
    }

    fn to_x(centi: i64) -> f64 {
        centi as f64 / 100.0
    }

    fn expected_bucket(centi: i64, n: usize) -> usize {
        let b = centi.div_euclid(100);
        if b < 0 {
            0
        } else {
            (b as usize).min(n - 1)
        }
    }

    #[test]
    fn bucket_and_partition_invariants_hold_under_churn() {
        const N: usize = 32;
        let mut idx: BucketIndex<u32> = BucketIndex::new(N, 1.0).unwrap();
        let mut live: Vec<(u32, i64)> = Vec::new();
        let mut rng = Rng(0xCAFE_F00D_DEAD_BEEF);
        let mut next = 0_u32;

        for _ in 0..2000 {
            match rng.next_u64() % 3 {
                0 => {
                    let c = rng.next_centi();
                    idx.insert(next, to_x(c)).unwrap();
                    live.push((next, c));
                    next += 1;
                }
                1 if !live.is_empty() => {
                    let i = (rng.next_u64() % live.len() as u64) as usize;
                    let c = rng.next_centi();
                    idx.move_to(live[i].0, to_x(c)).unwrap();
                    live[i].1 = c;
                }
                _ if !live.is_empty() => {
                    let i = (rng.next_u64() % live.len() as u64) as usize;
                    let (h, _) = live.swap_remove(i);
                    assert!(idx.remove(h).is_some(), "live handle must be removable");
                }
                _ => {}
            }

            for &(h, c) in &live {
                assert_eq!(idx.bucket_of(h), Ok(expected_bucket(c, N)));
            }
        }

        let all: Vec<u32> = idx.iter().collect();
        let unique: BTreeSet<u32> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len(), "a handle appeared in two buckets");
        let expected: BTreeSet<u32> = live.iter().map(|(h, _)| *h).collect();
        assert_eq!(unique, expected);
        assert_eq!(idx.len(), live.len());
    }

    #[test]
    fn range_queries_are_complete() {
        const N: usize = 16;
        let mut idx: BucketIndex<u32> = BucketIndex::new(N, 0.5).unwrap();
        for h in 0..64_u32 {
            idx.insert(h, f64::from(h) * 0.55).unwrap();
        }
        for lo in -3_isize..20 {
            for hi in -3_isize..20 {
                let got: Vec<u32> = idx.query_range(lo, hi).collect();
                let range = idx.range(lo, hi);
                let mut expected: Vec<u32> = (0..64_u32)
                    .filter(|&h| range.contains(idx.bucket_of(h).unwrap()))
                    .collect();
                expected.sort_by_key(|&h| (idx.bucket_of(h).unwrap(), h));
                assert_eq!(got, expected, "range [{lo}, {hi}]");
            }
        }
    }
}
