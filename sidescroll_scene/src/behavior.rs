// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-object behaviour hooks.
//!
//! The scene owns object data; what an object *does* each frame is supplied by a
//! [`Behavior`] at spawn time. Closures with the right signature are behaviours too:
//!
//! ```
//! use kurbo::{Point, Rect};
//! use sidescroll_scene::{Behavior, BehaviorError, Kind, Motion, SpatialObject};
//!
//! let mut drift = |o: &SpatialObject, dt: f64, _: &()| -> Result<Motion, BehaviorError> {
//!     Ok(Motion::running(o.position + kurbo::Vec2::new(dt, 0.0)))
//! };
//! let o = SpatialObject::new(Kind::Collidable, Point::new(1.0, 0.0), Rect::ZERO);
//! assert_eq!(drift.update(&o, 0.5, &()).unwrap().position, Point::new(1.5, 0.0));
//! ```

use kurbo::{Point, Vec2};

use crate::error::BehaviorError;
use crate::types::SpatialObject;

/// Result of one behaviour step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Motion {
    /// Position after the step.
    pub position: Point,
    /// False if the object is done (expired, left the play field, ...).
    pub running: bool,
}

impl Motion {
    /// Keep running at `position`.
    pub fn running(position: Point) -> Self {
        Self {
            position,
            running: true,
        }
    }

    /// Stop at `position`; the scene queues the object for removal.
    pub fn finished(position: Point) -> Self {
        Self {
            position,
            running: false,
        }
    }
}

/// Frame update for one object.
///
/// `I` is the caller's input state (key map, gamepad snapshot, ...), passed through untouched.
pub trait Behavior<I> {
    /// Advance the object by `time_delta`.
    ///
    /// Returning an error isolates the object: it is queued for removal and the failure
    /// is listed in the frame's [`FrameReport`](crate::FrameReport).
    fn update(
        &mut self,
        object: &SpatialObject,
        time_delta: f64,
        input: &I,
    ) -> Result<Motion, BehaviorError>;
}

impl<I, F> Behavior<I> for F
where
    F: FnMut(&SpatialObject, f64, &I) -> Result<Motion, BehaviorError>,
{
    fn update(
        &mut self,
        object: &SpatialObject,
        time_delta: f64,
        input: &I,
    ) -> Result<Motion, BehaviorError> {
        self(object, time_delta, input)
    }
}

/// Never moves, never expires.
#[derive(Copy, Clone, Debug, Default)]
pub struct Stationary;

impl<I> Behavior<I> for Stationary {
    fn update(&mut self, object: &SpatialObject, _: f64, _: &I) -> Result<Motion, BehaviorError> {
        Ok(Motion::running(object.position))
    }
}

/// Constant velocity with an optional time to live.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Linear {
    /// World units per unit of frame time.
    pub velocity: Vec2,
    /// Remaining lifetime; `None` lives until culled.
    pub ttl: Option<f64>,
}

impl Linear {
    /// Move forever at `velocity`.
    pub fn new(velocity: Vec2) -> Self {
        Self {
            velocity,
            ttl: None,
        }
    }

    /// Move at `velocity` for `ttl` time units.
    pub fn with_ttl(velocity: Vec2, ttl: f64) -> Self {
        Self {
            velocity,
            ttl: Some(ttl),
        }
    }
}

impl<I> Behavior<I> for Linear {
    fn update(
        &mut self,
        object: &SpatialObject,
        time_delta: f64,
        _: &I,
    ) -> Result<Motion, BehaviorError> {
        let position = object.position + self.velocity * time_delta;
        match &mut self.ttl {
            Some(ttl) => {
                *ttl -= time_delta;
                if *ttl > 0.0 {
                    Ok(Motion::running(position))
                } else {
                    Ok(Motion::finished(position))
                }
            }
            None => Ok(Motion::running(position)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Kind;
    use kurbo::Rect;

    fn at(x: f64) -> SpatialObject {
        SpatialObject::new(Kind::Projectile, Point::new(x, 0.0), Rect::ZERO)
    }

    #[test]
    fn stationary_keeps_position() {
        let m = Behavior::<()>::update(&mut Stationary, &at(4.0), 16.0, &()).unwrap();
        assert_eq!(m, Motion::running(Point::new(4.0, 0.0)));
    }

    #[test]
    fn linear_expires_after_ttl() {
        let mut b = Linear::with_ttl(Vec2::new(0.5, 0.0), 3.0);
        let m1 = Behavior::<()>::update(&mut b, &at(0.0), 2.0, &()).unwrap();
        assert!(m1.running);
        assert_eq!(m1.position, Point::new(1.0, 0.0));
        let m2 = Behavior::<()>::update(&mut b, &at(1.0), 2.0, &()).unwrap();
        assert!(!m2.running, "ttl of 3 is spent after 4 time units");
    }

    #[test]
    fn closures_see_input() {
        let mut b = |o: &SpatialObject, _: f64, push: &f64| -> Result<Motion, BehaviorError> {
            Ok(Motion::running(o.position + Vec2::new(*push, 0.0)))
        };
        let m = b.update(&at(1.0), 0.0, &2.0).unwrap();
        assert_eq!(m.position, Point::new(3.0, 0.0));
    }
}
