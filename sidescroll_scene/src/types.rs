// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: object identifiers, kinds, flags, and object data.

use kurbo::{Point, Rect};

/// Identifier for an object in a [`Scene`](crate::Scene).
///
/// A small, copyable handle that stays stable while the object moves and becomes
/// invalid once the object is reaped.
/// It consists of a slot index and a generation counter.
///
/// - On spawn, a fresh slot is allocated with generation `1`.
/// - On reap, the slot is freed; any `ObjectId` that pointed to it is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ObjectId`.
///
/// Stale `ObjectId`s never alias a different live object because the generation must match.
/// A slot whose generation reaches `u32::MAX` is retired instead of reused, so the
/// guarantee holds for the lifetime of the scene.
/// The ordering is only used to key the bucket index and carries no meaning.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ObjectId(pub(crate) u32, pub(crate) u32);

impl ObjectId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// What an object is, as far as collision resolution cares.
///
/// Every decision in the frame matches on this exhaustively, so a new kind is a
/// compile-time-checked change.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
    /// Solid scenery or enemies. Hit by projectiles, hurts the player on contact.
    Collidable,
    /// Small and fast. Checks its neighbourhood every frame and is consumed by its first hit.
    Projectile,
    /// Collected when the player touches it. Never hit by projectiles.
    Pickup,
    /// The player ship. Only the designated player runs contact checks.
    Player,
}

bitflags::bitflags! {
    /// A set of [`Kind`]s, used to filter queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KindMask: u8 {
        /// [`Kind::Collidable`].
        const COLLIDABLE = 0b0000_0001;
        /// [`Kind::Projectile`].
        const PROJECTILE = 0b0000_0010;
        /// [`Kind::Pickup`].
        const PICKUP     = 0b0000_0100;
        /// [`Kind::Player`].
        const PLAYER     = 0b0000_1000;
    }
}

impl From<Kind> for KindMask {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Collidable => Self::COLLIDABLE,
            Kind::Projectile => Self::PROJECTILE,
            Kind::Pickup => Self::PICKUP,
            Kind::Player => Self::PLAYER,
        }
    }
}

impl KindMask {
    /// Whether the mask includes `kind`.
    pub fn admits(self, kind: Kind) -> bool {
        self.contains(kind.into())
    }
}

bitflags::bitflags! {
    /// Per-object collision flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ObjectFlags: u8 {
        /// Hits and contacts leave the object's health untouched.
        const INVULNERABLE = 0b0000_0001;
        /// The object takes no part in collision tests (explosions, debris).
        const GHOST        = 0b0000_0010;
    }
}

/// Plain data for one object in the scene.
///
/// Behaviour lives elsewhere (see [`Behavior`](crate::Behavior)); this struct is what
/// the index, the collision pass, and the policy hooks read and write.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpatialObject {
    /// Collision role.
    pub kind: Kind,
    /// Exact world position.
    pub position: Point,
    /// Bounding box relative to `position`.
    pub local_bounds: Rect,
    /// False once the object is logically destroyed but not yet reaped.
    pub running: bool,
    /// Object that fired this one. Projectiles never hit their owner.
    pub owner: Option<ObjectId>,
    /// Remaining hit points.
    pub health: u32,
    /// Damage dealt when this object hits something.
    pub damage: u32,
    /// Score credited to the player for destroying this object.
    pub score_value: u32,
    /// Collision flags.
    pub flags: ObjectFlags,
}

impl Default for SpatialObject {
    fn default() -> Self {
        Self {
            kind: Kind::Collidable,
            position: Point::ORIGIN,
            local_bounds: Rect::ZERO,
            running: true,
            owner: None,
            health: 1,
            damage: 1,
            score_value: 0,
            flags: ObjectFlags::empty(),
        }
    }
}

impl SpatialObject {
    /// An object of `kind` at `position` with bounds relative to it.
    pub fn new(kind: Kind, position: Point, local_bounds: Rect) -> Self {
        Self {
            kind,
            position,
            local_bounds,
            ..Default::default()
        }
    }

    /// World-space AABB.
    pub fn bounds(&self) -> Rect {
        self.local_bounds + self.position.to_vec2()
    }

    /// Whether the world-space AABBs overlap with positive area.
    ///
    /// Boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        let a = self.bounds();
        let b = other.bounds();
        a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
    }

    /// Shorthand for the [`ObjectFlags::INVULNERABLE`] flag.
    pub fn is_invulnerable(&self) -> bool {
        self.flags.contains(ObjectFlags::INVULNERABLE)
    }

    /// Shorthand for the [`ObjectFlags::GHOST`] flag.
    pub fn is_ghost(&self) -> bool {
        self.flags.contains(ObjectFlags::GHOST)
    }
}

/// Lifecycle of a live object.
///
/// Reaped objects have no lifecycle: their [`ObjectId`] is stale.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Lifecycle {
    /// Updated and collided every frame while visible.
    Active,
    /// Destroyed and queued; still indexed until the next frame's garbage collection.
    Dying,
}
