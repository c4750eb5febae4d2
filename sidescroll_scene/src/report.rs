// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame summary returned by [`Scene::update`](crate::Scene::update).

use alloc::vec::Vec;

use crate::error::BehaviorError;
use crate::types::ObjectId;

/// An object whose behaviour failed during a frame. The object has been queued for removal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateFailure {
    /// The failing object.
    pub object: ObjectId,
    /// What its behaviour reported.
    pub error: BehaviorError,
}

/// Aggregate results of one frame.
///
/// Nothing that goes wrong for a single object escapes [`Scene::update`](crate::Scene::update);
/// it ends up here instead.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Objects reaped by garbage collection at the start of the frame.
    pub reaped: usize,
    /// Behaviours run successfully.
    pub updated: usize,
    /// Objects that changed bucket.
    pub moved: usize,
    /// Objects queued for removal for leaving the play field.
    pub culled: usize,
    /// Projectile hits and player contacts handed to the policy.
    ///
    /// Counts every overlap the scene resolved, including contacts the policy chose to
    /// ignore (an invulnerable player, for example).
    pub hits: usize,
    /// Pickups consumed by the player.
    pub pickups: usize,
    /// Objects whose triggers fired, in firing order.
    pub triggered: Vec<ObjectId>,
    /// Behaviour failures, in update order.
    pub failures: Vec<UpdateFailure>,
}

impl FrameReport {
    /// Number of behaviour failures.
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// True if every behaviour that ran succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
