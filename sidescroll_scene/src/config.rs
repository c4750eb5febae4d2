// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene configuration.

use sidescroll_index::ConfigError;

use crate::error::SceneError;

/// Construction parameters for a [`Scene`](crate::Scene).
///
/// The defaults match a 128-column level scrolled at one world unit per thousand
/// time units (milliseconds, typically).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneConfig {
    /// Number of buckets along the scroll axis. Fixed for the scene's lifetime.
    pub bucket_count: usize,
    /// World x-coordinate to bucket scale: `bucket = floor(x * bucket_scale)`.
    pub bucket_scale: f64,
    /// Camera advance per unit of frame time.
    pub scroll_speed: f64,
    /// Bucket radius searched around projectiles and the player for overlaps.
    pub neighborhood: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            bucket_count: 128,
            bucket_scale: 1.0,
            scroll_speed: 0.001,
            neighborhood: 1,
        }
    }
}

impl SceneConfig {
    /// Check the configuration without building a scene.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.bucket_count == 0 {
            return Err(ConfigError::ZeroBuckets.into());
        }
        if !(self.bucket_scale.is_finite() && self.bucket_scale > 0.0) {
            return Err(ConfigError::InvalidScale(self.bucket_scale).into());
        }
        if !self.scroll_speed.is_finite() {
            return Err(SceneError::InvalidScrollSpeed(self.scroll_speed));
        }
        Ok(())
    }
}
