// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge-triggered bucket gates.
//!
//! A trigger watches one object and fires when its condition goes from false to true.
//! It stays quiet while the condition keeps holding and re-arms once it stops holding,
//! so each crossing fires exactly once. A trigger registered while its condition
//! already holds waits for the next crossing.

use sidescroll_index::BucketRange;

use crate::types::ObjectId;

/// When a trigger's condition holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriggerCondition {
    /// The object's bucket is at or past the given bucket.
    ObjectReaches(usize),
    /// The leading edge of the visible range is at or past the object's bucket.
    ///
    /// This is the classic boss gate: the camera has scrolled up to the object.
    WindowReaches,
}

impl TriggerCondition {
    fn holds(self, bucket: usize, visible: BucketRange) -> bool {
        match self {
            Self::ObjectReaches(threshold) => bucket >= threshold,
            Self::WindowReaches => visible.hi().is_some_and(|hi| hi >= bucket),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Trigger {
    pub(crate) object: ObjectId,
    condition: TriggerCondition,
    holding: bool,
}

impl Trigger {
    /// A trigger armed against the object's current `bucket` and the `visible` range.
    pub(crate) fn new(
        object: ObjectId,
        condition: TriggerCondition,
        bucket: usize,
        visible: BucketRange,
    ) -> Self {
        Self {
            object,
            condition,
            holding: condition.holds(bucket, visible),
        }
    }

    /// Record the condition for this frame; true on a rising edge.
    pub(crate) fn observe(&mut self, bucket: usize, visible: BucketRange) -> bool {
        let holds = self.condition.holds(bucket, visible);
        let fired = holds && !self.holding;
        self.holding = holds;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(lo: isize, hi: isize) -> BucketRange {
        BucketRange::clamped(lo, hi, 64)
    }

    #[test]
    fn fires_once_per_crossing() {
        let v = visible(0, 20);
        let mut t = Trigger::new(ObjectId::new(0, 1), TriggerCondition::ObjectReaches(10), 0, v);
        assert!(!t.observe(9, v));
        assert!(t.observe(10, v));
        assert!(!t.observe(11, v), "level must not re-fire");
        assert!(!t.observe(12, v));
        assert!(!t.observe(8, v));
        assert!(t.observe(10, v), "re-armed after dropping back");
    }

    #[test]
    fn window_gate() {
        let mut t = Trigger::new(
            ObjectId::new(0, 1),
            TriggerCondition::WindowReaches,
            30,
            visible(9, 28),
        );
        assert!(!t.observe(30, visible(10, 29)));
        assert!(t.observe(30, visible(11, 30)));
        assert!(!t.observe(30, visible(12, 31)));
        assert!(!t.observe(30, BucketRange::EMPTY));
    }

    #[test]
    fn registered_while_holding_waits_for_next_crossing() {
        let v = visible(0, 20);
        let mut t = Trigger::new(ObjectId::new(0, 1), TriggerCondition::ObjectReaches(8), 10, v);
        assert!(!t.observe(10, v), "no crossing happened");
        assert!(!t.observe(5, v));
        assert!(t.observe(9, v));
    }
}
