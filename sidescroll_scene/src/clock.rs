// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame timing with pause support.

/// Converts absolute timestamps into frame deltas, excluding time spent paused.
///
/// ```
/// use sidescroll_scene::FrameClock;
///
/// let mut clock = FrameClock::starting_at(1000.0);
/// assert_eq!(clock.tick(1016.0), 16.0);
/// clock.pause(1020.0);
/// assert_eq!(clock.tick(1500.0), 0.0);
/// clock.resume(1520.0);
/// // 1016..1020 ran before the pause, 1520..1532 after it.
/// assert_eq!(clock.tick(1532.0), 16.0);
/// assert_eq!(clock.elapsed(), 32.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameClock {
    start: f64,
    elapsed: f64,
    paused_total: f64,
    paused_at: Option<f64>,
}

impl FrameClock {
    /// A clock whose elapsed time is zero at `now`.
    pub fn starting_at(now: f64) -> Self {
        Self {
            start: now,
            elapsed: 0.0,
            paused_total: 0.0,
            paused_at: None,
        }
    }

    /// Advance to `now` and return the unpaused time since the previous tick.
    ///
    /// Returns zero while paused or if `now` went backwards.
    pub fn tick(&mut self, now: f64) -> f64 {
        if self.paused_at.is_some() {
            return 0.0;
        }
        let t = now - self.start - self.paused_total;
        let delta = t - self.elapsed;
        if delta > 0.0 {
            self.elapsed = t;
            delta
        } else {
            0.0
        }
    }

    /// Stop counting time at `now`. Pausing twice keeps the first pause point.
    pub fn pause(&mut self, now: f64) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Resume counting at `now`; the paused span is excluded from future deltas.
    pub fn resume(&mut self, now: f64) {
        if let Some(at) = self.paused_at.take() {
            self.paused_total += (now - at).max(0.0);
        }
    }

    /// Whether the clock is paused.
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Unpaused time up to the last tick.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
