// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sidescroll Scene: a scrolling collision scene built on [`sidescroll_index`].
//!
//! The scene owns every object in a side-scrolling level and runs one frame at a time:
//!
//! - Scroll a [`Camera`] window along the x-axis and derive the visible bucket range.
//! - Update each visible object through its [`Behavior`], re-bucketing movers.
//! - Cull objects that fell behind the window and projectiles that flew past it.
//! - Test projectiles and the player against neighbouring buckets only, and hand every
//!   overlap to a [`ScenePolicy`] that decides what it means.
//! - Fire edge-triggered gates (a boss coming into view) that can halt scrolling.
//!
//! ## Deferred removal
//!
//! Nothing is removed in the middle of a frame. Destroyed, expired, culled, and failing
//! objects are marked [`Lifecycle::Dying`] and queued; the queue is drained at the start of
//! the next [`Scene::update`]. A kill is therefore still drawn on the frame it happened,
//! and iteration never sees the index change underneath it.
//!
//! ## API overview
//!
//! - [`Scene`]: the container and frame loop.
//! - [`SpatialObject`]: plain object data; [`Kind`] picks its collision role.
//! - [`ObjectId`]: generational handle of an object.
//! - [`Behavior`]: per-object update; closures, [`Stationary`], and [`Linear`] implement it.
//! - [`ScenePolicy`]: game rules; [`StandardRules`] is a classic shooter.
//! - [`FrameReport`]: what happened in a frame, including behaviour failures.
//! - [`FrameClock`]: turns timestamps into frame deltas, with pause support.
//!
//! ### Minimal usage
//!
//! ```
//! use kurbo::{Point, Rect, Vec2};
//! use sidescroll_scene::{
//!     Kind, Lifecycle, Linear, Scene, SceneConfig, SpatialObject, StandardRules, Stationary,
//!     Viewport,
//! };
//!
//! let config = SceneConfig { bucket_count: 32, scroll_speed: 0.0, ..Default::default() };
//! let mut scene: Scene<(), _, _> =
//!     Scene::new(config, Viewport::new(0.0, 20.0), StandardRules::default()).unwrap();
//!
//! let unit = Rect::new(0.0, 0.0, 1.0, 1.0);
//! let player = scene.spawn(SpatialObject::new(Kind::Player, Point::new(2.0, 0.0), unit), Stationary);
//! let enemy = scene.spawn(SpatialObject::new(Kind::Collidable, Point::new(9.0, 0.0), unit), Stationary);
//! let shot = SpatialObject {
//!     owner: Some(player),
//!     ..SpatialObject::new(Kind::Projectile, Point::new(7.0, 0.0), unit)
//! };
//! scene.spawn(shot, Linear::new(Vec2::new(1.5, 0.0)));
//!
//! // The shot moves to x = 8.5 and overlaps the enemy.
//! let report = scene.update(1.0, &());
//! assert_eq!(report.hits, 1);
//! assert_eq!(scene.lifecycle(enemy), Some(Lifecycle::Dying));
//!
//! // Reaped on the next frame.
//! assert_eq!(scene.update(1.0, &()).reaped, 2);
//! assert_eq!(scene.query_visible(), [player]);
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: spawns, trigger firings, and state changes at
//! `debug`, behaviour failures at `warn`, and a per-frame summary at `trace`. Install any
//! logger in the host to see them.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod behavior;
pub mod clock;
pub mod config;
pub mod error;
pub mod policy;
pub mod report;
pub mod scene;
pub mod trigger;
pub mod types;

pub use behavior::{Behavior, Linear, Motion, Stationary};
pub use clock::FrameClock;
pub use config::SceneConfig;
pub use error::{BehaviorError, SceneError};
pub use policy::{Camera, HitOutcome, ScenePolicy, ScrollCommand, StandardRules, Viewport, Window};
pub use report::{FrameReport, UpdateFailure};
pub use scene::Scene;
pub use trigger::TriggerCondition;
pub use types::{Kind, KindMask, Lifecycle, ObjectFlags, ObjectId, SpatialObject};
