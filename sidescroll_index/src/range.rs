// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inclusive, clamped ranges of bucket indices.

use core::ops::RangeInclusive;

/// An inclusive range of bucket indices, already clamped to an index.
///
/// Ranges are produced by [`BucketIndex::range`](crate::BucketIndex::range) and
/// [`BucketIndex::range_for`](crate::BucketIndex::range_for). A range whose
/// clamped `lo` lies past its clamped `hi` is empty and yields no buckets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BucketRange {
    lo: usize,
    hi: usize,
}

impl BucketRange {
    /// The empty range.
    pub const EMPTY: Self = Self { lo: 1, hi: 0 };

    /// Clamp `lo` and `hi` into `[0, bucket_count - 1]`.
    ///
    /// Returns [`BucketRange::EMPTY`] when `bucket_count` is zero or the clamped
    /// bounds are inverted.
    pub fn clamped(lo: isize, hi: isize, bucket_count: usize) -> Self {
        if bucket_count == 0 {
            return Self::EMPTY;
        }
        let lo = clamp_bucket(i64::try_from(lo).unwrap_or(i64::MAX), bucket_count);
        let hi = clamp_bucket(i64::try_from(hi).unwrap_or(i64::MAX), bucket_count);
        if lo > hi { Self::EMPTY } else { Self { lo, hi } }
    }

    /// First bucket of the range, or `None` if empty.
    pub fn lo(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.lo)
    }

    /// Last bucket of the range, or `None` if empty.
    pub fn hi(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.hi)
    }

    /// True if the range holds no buckets.
    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    /// Number of buckets covered.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.hi - self.lo + 1
        }
    }

    /// Whether `bucket` lies inside the range.
    pub fn contains(&self, bucket: usize) -> bool {
        self.lo <= bucket && bucket <= self.hi
    }

    /// Whether `bucket` lies strictly before the first bucket of the range.
    ///
    /// Always false for the empty range.
    pub fn is_before(&self, bucket: usize) -> bool {
        !self.is_empty() && bucket < self.lo
    }

    /// Whether `bucket` lies strictly after the last bucket of the range.
    ///
    /// Always false for the empty range.
    pub fn is_after(&self, bucket: usize) -> bool {
        !self.is_empty() && bucket > self.hi
    }

    /// The bucket indices covered, in ascending order.
    pub fn buckets(&self) -> RangeInclusive<usize> {
        self.lo..=self.hi
    }
}

/// Clamp a signed bucket coordinate into `[0, bucket_count - 1]`.
///
/// `bucket_count` must be non-zero.
pub(crate) fn clamp_bucket(bucket: i64, bucket_count: usize) -> usize {
    debug_assert!(bucket_count > 0, "bucket count must be positive");
    let last = bucket_count - 1;
    if bucket < 0 {
        0
    } else {
        usize::try_from(bucket).map_or(last, |b| b.min(last))
    }
}

/// Floor a float to `i64`, saturating at the integer bounds. NaN maps to zero.
#[inline]
pub(crate) fn floor_to_i64(v: f64) -> i64 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Saturating float-to-int casts are the intended mapping."
    )]
    let i = v as i64;
    if (i as f64) > v { i.saturating_sub(1) } else { i }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_both_ends() {
        let r = BucketRange::clamped(-3, 40, 10);
        assert_eq!(r.lo(), Some(0));
        assert_eq!(r.hi(), Some(9));
        assert_eq!(r.len(), 10);
    }

    #[test]
    fn inverted_after_clamp_is_empty() {
        let r = BucketRange::clamped(7, 2, 10);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.buckets().count(), 0);
        assert!(!r.is_before(0), "empty range has no front");
        assert!(!r.is_after(9), "empty range has no back");
    }

    #[test]
    fn both_bounds_below_zero_collapse_to_first_bucket() {
        let r = BucketRange::clamped(-5, -1, 10);
        assert_eq!(r.buckets().collect::<alloc::vec::Vec<_>>(), [0]);
    }

    #[test]
    fn floor_handles_negatives_and_extremes() {
        assert_eq!(floor_to_i64(3.9), 3);
        assert_eq!(floor_to_i64(-0.5), -1);
        assert_eq!(floor_to_i64(-2.0), -2);
        assert_eq!(floor_to_i64(f64::NAN), 0);
        assert_eq!(floor_to_i64(f64::INFINITY), i64::MAX);
        assert_eq!(floor_to_i64(f64::NEG_INFINITY), i64::MIN);
    }

    #[test]
    fn before_and_after() {
        let r = BucketRange::clamped(3, 12, 20);
        assert!(r.is_before(2));
        assert!(!r.is_before(3));
        assert!(r.is_after(13));
        assert!(!r.is_after(12));
    }
}
