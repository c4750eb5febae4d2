// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene errors.

use alloc::borrow::Cow;

use sidescroll_index::ConfigError;
use thiserror::Error;

use crate::types::ObjectId;

/// Errors returned by [`Scene`](crate::Scene) construction and object accessors.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SceneError {
    /// Invalid bucket configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The scroll speed is NaN or infinite.
    #[error("scroll speed must be finite, got {0}")]
    InvalidScrollSpeed(f64),
    /// The identifier does not refer to a live object.
    #[error("object {0:?} is not live")]
    UnknownObject(ObjectId),
}

/// Failure reported by an object's [`Behavior::update`](crate::Behavior::update).
///
/// The scene isolates the failing object (it is queued for removal) and keeps
/// processing the rest of the frame.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("object update failed: {message}")]
pub struct BehaviorError {
    message: Cow<'static, str>,
}

impl BehaviorError {
    /// A failure with the given description.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure description.
    pub fn message(&self) -> &str {
        &self.message
    }
}
