// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `BucketIndex` API.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::error::{ConfigError, IndexError};
use crate::range::{BucketRange, clamp_bucket, floor_to_i64};

/// A fixed array of buckets along one axis, holding caller-supplied handles.
///
/// Each handle lives in exactly one bucket: `clamp(floor(x * scale), 0, bucket_count - 1)`
/// for the x-coordinate it was last inserted or moved at.
/// Buckets keep their handles in arrival order, so queries are deterministic.
///
/// The index does not own what the handles refer to; it only records where they are.
pub struct BucketIndex<H> {
    buckets: Vec<Vec<H>>,
    slots: HashMap<H, usize>,
    scale: f64,
}

impl<H> core::fmt::Debug for BucketIndex<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let occupied = self.buckets.iter().filter(|b| !b.is_empty()).count();
        f.debug_struct("BucketIndex")
            .field("bucket_count", &self.buckets.len())
            .field("scale", &self.scale)
            .field("handles", &self.slots.len())
            .field("occupied_buckets", &occupied)
            .finish_non_exhaustive()
    }
}

impl<H: Copy + Eq + Hash> BucketIndex<H> {
    /// Create an index with `bucket_count` buckets and the given coordinate scale.
    ///
    /// Fails if `bucket_count` is zero or `scale` is not finite and positive.
    pub fn new(bucket_count: usize, scale: f64) -> Result<Self, ConfigError> {
        if bucket_count == 0 {
            return Err(ConfigError::ZeroBuckets);
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ConfigError::InvalidScale(scale));
        }
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, Vec::new);
        Ok(Self {
            buckets,
            slots: HashMap::new(),
            scale,
        })
    }

    /// Number of buckets, fixed at construction.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// World-to-bucket scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Number of handles currently indexed.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if no handles are indexed.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `handle` is indexed.
    pub fn contains(&self, handle: H) -> bool {
        self.slots.contains_key(&handle)
    }

    /// The clamped bucket a world x-coordinate maps to.
    pub fn bucket_for(&self, x: f64) -> usize {
        clamp_bucket(floor_to_i64(x * self.scale), self.buckets.len())
    }

    /// Clamp a signed bucket interval to this index.
    pub fn range(&self, lo: isize, hi: isize) -> BucketRange {
        BucketRange::clamped(lo, hi, self.buckets.len())
    }

    /// The bucket range covered by the world interval `[left, right]`.
    pub fn range_for(&self, left: f64, right: f64) -> BucketRange {
        let lo = self.bucket_for(left);
        let hi = self.bucket_for(right);
        if lo > hi {
            BucketRange::EMPTY
        } else {
            self.range(to_isize(lo), to_isize(hi))
        }
    }

    /// Insert `handle` at world x-coordinate `x`. Returns the bucket it landed in.
    pub fn insert(&mut self, handle: H, x: f64) -> Result<usize, IndexError> {
        if self.slots.contains_key(&handle) {
            return Err(IndexError::InvalidHandle);
        }
        let bucket = self.bucket_for(x);
        self.buckets[bucket].push(handle);
        self.slots.insert(handle, bucket);
        Ok(bucket)
    }

    /// Re-bucket `handle` for its new x-coordinate.
    ///
    /// Returns `true` if the handle changed buckets. Staying in the same bucket
    /// leaves its position within that bucket untouched.
    pub fn move_to(&mut self, handle: H, x: f64) -> Result<bool, IndexError> {
        let new_bucket = self.bucket_for(x);
        let slot = self
            .slots
            .get_mut(&handle)
            .ok_or(IndexError::UnknownHandle)?;
        let old_bucket = *slot;
        if old_bucket == new_bucket {
            return Ok(false);
        }
        *slot = new_bucket;
        detach(&mut self.buckets[old_bucket], handle);
        self.buckets[new_bucket].push(handle);
        Ok(true)
    }

    /// Remove `handle`, returning the bucket it occupied.
    ///
    /// Removing an absent handle is a no-op that returns `None`, so repeated
    /// removal of the same handle is harmless.
    pub fn remove(&mut self, handle: H) -> Option<usize> {
        let bucket = self.slots.remove(&handle)?;
        detach(&mut self.buckets[bucket], handle);
        Some(bucket)
    }

    /// The bucket `handle` currently occupies.
    pub fn bucket_of(&self, handle: H) -> Result<usize, IndexError> {
        self.slots
            .get(&handle)
            .copied()
            .ok_or(IndexError::UnknownHandle)
    }

    /// Handles in a single bucket, in arrival order. Out-of-range buckets are empty.
    pub fn bucket(&self, bucket: usize) -> &[H] {
        self.buckets.get(bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Handles in buckets `[lo, hi]` after clamping, ascending by bucket.
    ///
    /// Yields nothing if the clamped `lo` exceeds the clamped `hi`.
    pub fn query_range(&self, lo: isize, hi: isize) -> impl Iterator<Item = H> + '_ {
        self.query(self.range(lo, hi))
    }

    /// Handles in a precomputed [`BucketRange`], ascending by bucket.
    ///
    /// A range built for a larger index is cut short at this index's last bucket.
    pub fn query(&self, range: BucketRange) -> impl Iterator<Item = H> + '_ {
        let buckets: &[Vec<H>] = match (range.lo(), range.hi()) {
            (Some(lo), Some(hi)) => {
                let hi = hi.min(self.buckets.len() - 1);
                self.buckets.get(lo..=hi).unwrap_or(&[])
            }
            _ => &[],
        };
        buckets.iter().flat_map(|b| b.iter().copied())
    }

    /// Every indexed handle, ascending by bucket.
    pub fn iter(&self) -> impl Iterator<Item = H> + '_ {
        self.buckets.iter().flat_map(|b| b.iter().copied())
    }

    /// Drop every handle. The bucket count and scale are kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.slots.clear();
    }
}

fn detach<H: PartialEq>(bucket: &mut Vec<H>, handle: H) {
    if let Some(pos) = bucket.iter().position(|h| *h == handle) {
        // Order-preserving: arrival order is part of the query contract.
        bucket.remove(pos);
    }
}

/// Bucket counts fit a `Vec`, so they always fit `isize`.
#[inline]
pub(crate) fn to_isize(bucket: usize) -> isize {
    isize::try_from(bucket).unwrap_or(isize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn abc() -> BucketIndex<char> {
        let mut idx = BucketIndex::new(10, 1.0).unwrap();
        idx.insert('A', 3.2).unwrap();
        idx.insert('B', 3.9).unwrap();
        idx.insert('C', 5.0).unwrap();
        idx
    }

    #[test]
    fn rejects_bad_configuration() {
        assert_eq!(
            BucketIndex::<u32>::new(0, 1.0).unwrap_err(),
            ConfigError::ZeroBuckets
        );
        assert!(matches!(
            BucketIndex::<u32>::new(4, 0.0),
            Err(ConfigError::InvalidScale(_))
        ));
        assert!(matches!(
            BucketIndex::<u32>::new(4, -2.0),
            Err(ConfigError::InvalidScale(_))
        ));
        assert!(matches!(
            BucketIndex::<u32>::new(4, f64::NAN),
            Err(ConfigError::InvalidScale(_))
        ));
    }

    #[test]
    fn range_queries_follow_bucket_then_arrival_order() {
        let idx = abc();
        assert_eq!(idx.query_range(3, 3).collect::<Vec<_>>(), vec!['A', 'B']);
        assert_eq!(idx.query_range(0, 4).collect::<Vec<_>>(), vec!['A', 'B']);
        assert_eq!(
            idx.query_range(0, 9).collect::<Vec<_>>(),
            vec!['A', 'B', 'C']
        );
    }

    #[test]
    fn move_rebuckets() {
        let mut idx = abc();
        assert!(idx.move_to('B', 7.1).unwrap());
        assert_eq!(idx.query_range(3, 3).collect::<Vec<_>>(), vec!['A']);
        assert_eq!(idx.query_range(7, 7).collect::<Vec<_>>(), vec!['B']);
        assert_eq!(idx.bucket_of('B'), Ok(7));
    }

    #[test]
    fn move_within_bucket_keeps_order() {
        let mut idx = abc();
        assert!(!idx.move_to('A', 3.95).unwrap());
        assert_eq!(idx.query_range(3, 3).collect::<Vec<_>>(), vec!['A', 'B']);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut idx = abc();
        assert_eq!(idx.insert('A', 1.0), Err(IndexError::InvalidHandle));
        assert_eq!(idx.bucket_of('A'), Ok(3), "failed insert must not move A");
        assert_eq!(idx.len(), 3);
    }

    #[test]
    fn unknown_handles_are_reported() {
        let mut idx = abc();
        assert_eq!(idx.move_to('Z', 1.0), Err(IndexError::UnknownHandle));
        assert_eq!(idx.bucket_of('Z'), Err(IndexError::UnknownHandle));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut idx = abc();
        assert_eq!(idx.remove('B'), Some(3));
        assert_eq!(idx.remove('B'), None);
        assert_eq!(idx.query_range(0, 9).collect::<Vec<_>>(), vec!['A', 'C']);
        assert!(!idx.contains('B'));
    }

    #[test]
    fn coordinates_outside_the_axis_clamp() {
        let mut idx = BucketIndex::new(10, 1.0).unwrap();
        idx.insert(1_u32, -4.0).unwrap();
        idx.insert(2_u32, 250.0).unwrap();
        assert_eq!(idx.bucket_of(1), Ok(0));
        assert_eq!(idx.bucket_of(2), Ok(9));
    }

    #[test]
    fn scale_maps_world_to_buckets() {
        let idx = BucketIndex::<u32>::new(16, 0.25).unwrap();
        assert_eq!(idx.bucket_for(3.9), 0);
        assert_eq!(idx.bucket_for(4.0), 1);
        assert_eq!(idx.bucket_for(17.0), 4);
    }

    #[test]
    fn inverted_range_is_empty() {
        let idx = abc();
        assert_eq!(idx.query_range(5, 3).count(), 0);
        assert_eq!(idx.query_range(-4, -1).collect::<Vec<_>>(), Vec::<char>::new());
        assert_eq!(idx.query_range(12, 40).collect::<Vec<_>>(), Vec::<char>::new());
    }

    #[test]
    fn range_for_world_interval() {
        let idx = abc();
        let r = idx.range_for(2.5, 5.5);
        assert_eq!(r.lo(), Some(2));
        assert_eq!(r.hi(), Some(5));
        assert_eq!(idx.query(r).collect::<Vec<_>>(), vec!['A', 'B', 'C']);
    }

    #[test]
    fn foreign_ranges_are_cut_to_this_index() {
        let idx = abc();
        let wide = BucketRange::clamped(0, 50, 100);
        assert_eq!(idx.query(wide).collect::<Vec<_>>(), vec!['A', 'B', 'C']);
        let past_end = BucketRange::clamped(40, 60, 100);
        assert_eq!(idx.query(past_end).count(), 0);
        assert_eq!(idx.query(BucketRange::EMPTY).count(), 0);
    }

    #[test]
    fn clear_keeps_geometry() {
        let mut idx = abc();
        idx.clear();
        assert!(idx.is_empty());
        assert_eq!(idx.bucket_count(), 10);
        assert_eq!(idx.iter().count(), 0);
        idx.insert('A', 1.0).unwrap();
        assert_eq!(idx.bucket_of('A'), Ok(1));
    }
}
