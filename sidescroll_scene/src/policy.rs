// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborators the scene drives: the camera window and the game-rule policy.
//!
//! ## Camera
//!
//! The scene only needs the horizontal extent of what is on screen. A [`Camera`]
//! reports it as a [`Window`] in world x-coordinates and accepts the advanced window
//! back each frame. Rendering, zoom, and the vertical axis stay with the host.
//!
//! ## Policy
//!
//! Collision detection is the scene's job; what a collision *means* is not.
//! [`ScenePolicy`] hooks are called at fixed points of the frame:
//!
//! - [`ScenePolicy::can_hit`] then [`ScenePolicy::on_projectile_hit`] for projectile overlaps.
//! - [`ScenePolicy::on_player_hit`] when the player touches a collidable.
//! - [`ScenePolicy::on_pickup`] when the player touches a pickup.
//! - [`ScenePolicy::on_threshold_crossed`] when a trigger fires.
//! - [`ScenePolicy::on_game_over`] once, when the player's health runs out.
//!
//! [`StandardRules`] implements the rules of a classic horizontal shooter.

use crate::types::{Kind, ObjectId, SpatialObject};

/// Horizontal extent of the visible area in world coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Window {
    /// Trailing (left) edge.
    pub left: f64,
    /// Leading (right) edge.
    pub right: f64,
}

impl Window {
    /// A window spanning `[left, right]`.
    pub const fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Width of the window.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// The same window shifted by `dx`.
    pub fn translated(&self, dx: f64) -> Self {
        Self {
            left: self.left + dx,
            right: self.right + dx,
        }
    }
}

/// Source of the visible window.
pub trait Camera {
    /// Current window.
    fn window(&self) -> Window;

    /// Replace the window after the scene scrolled it.
    fn set_window(&mut self, window: Window);
}

/// A camera that is nothing but its window.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    window: Window,
}

impl Viewport {
    /// A viewport showing `[left, right]`.
    pub const fn new(left: f64, right: f64) -> Self {
        Self {
            window: Window::new(left, right),
        }
    }
}

impl Camera for Viewport {
    fn window(&self) -> Window {
        self.window
    }

    fn set_window(&mut self, window: Window) {
        self.window = window;
    }
}

/// Outcome of a projectile hit or player contact.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HitOutcome {
    /// The struck object is destroyed and should be queued for removal.
    pub target_destroyed: bool,
}

impl HitOutcome {
    /// The target survives.
    pub const SURVIVED: Self = Self {
        target_destroyed: false,
    };
    /// The target is destroyed.
    pub const DESTROYED: Self = Self {
        target_destroyed: true,
    };
}

/// What the scene should do with its scrolling after a trigger fires.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ScrollCommand {
    /// Keep scrolling.
    #[default]
    Continue,
    /// Halt the camera (for example at a boss gate).
    Stop,
}

/// Game rules applied to collisions detected by the scene.
///
/// Hooks must not block; they run inside the frame.
pub trait ScenePolicy {
    /// Whether `projectile`, fired by an object of `owner` kind, may strike `target` at all.
    ///
    /// `owner` is `None` for ownerless projectiles or when the owner is gone.
    /// Rejected pairs are not hits and do not consume the projectile.
    fn can_hit(
        &self,
        projectile: &SpatialObject,
        owner: Option<Kind>,
        target: &SpatialObject,
    ) -> bool {
        let _ = (projectile, owner, target);
        true
    }

    /// A projectile struck `target`. The projectile is consumed regardless of the outcome.
    fn on_projectile_hit(
        &mut self,
        projectile: &SpatialObject,
        target: &mut SpatialObject,
    ) -> HitOutcome;

    /// The player touched `enemy`.
    ///
    /// The returned outcome concerns the enemy; the scene checks the player's
    /// health itself after the call.
    fn on_player_hit(&mut self, player: &mut SpatialObject, enemy: &mut SpatialObject)
    -> HitOutcome;

    /// The player touched `pickup`. Return `true` to consume it.
    fn on_pickup(&mut self, player: &mut SpatialObject, pickup: &SpatialObject) -> bool {
        let _ = (player, pickup);
        true
    }

    /// A trigger registered on `trigger` fired.
    fn on_threshold_crossed(&mut self, trigger: ObjectId, object: &SpatialObject) -> ScrollCommand {
        let _ = (trigger, object);
        ScrollCommand::Continue
    }

    /// The player's health reached zero. Called once per scene.
    fn on_game_over(&mut self) {}
}

/// Rules of a classic side-scrolling shooter.
///
/// - Player shots hit everything but the player; other shots hit only the player.
/// - Damage is subtracted from health; zero health destroys.
/// - Invulnerable objects take no damage.
/// - Touching an enemy costs both sides `contact_damage`.
/// - Destroying an object credits its `score_value`.
/// - Triggers halt scrolling when `stop_on_trigger` is set.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardRules {
    /// Points collected so far.
    pub score: u64,
    /// Damage dealt to both sides on player contact.
    pub contact_damage: u32,
    /// Halt scrolling whenever a trigger fires.
    pub stop_on_trigger: bool,
    /// Pickups consumed so far.
    pub pickups: u32,
    /// Set once the player is out.
    pub game_over: bool,
}

impl Default for StandardRules {
    fn default() -> Self {
        Self {
            score: 0,
            contact_damage: 1,
            stop_on_trigger: true,
            pickups: 0,
            game_over: false,
        }
    }
}

fn apply_damage(target: &mut SpatialObject, damage: u32) -> HitOutcome {
    if !target.is_invulnerable() {
        target.health = target.health.saturating_sub(damage);
    }
    HitOutcome {
        target_destroyed: target.health == 0,
    }
}

impl ScenePolicy for StandardRules {
    fn can_hit(&self, _: &SpatialObject, owner: Option<Kind>, target: &SpatialObject) -> bool {
        match owner {
            Some(Kind::Player) => target.kind != Kind::Player,
            Some(Kind::Collidable | Kind::Projectile | Kind::Pickup) | None => {
                target.kind == Kind::Player
            }
        }
    }

    fn on_projectile_hit(
        &mut self,
        projectile: &SpatialObject,
        target: &mut SpatialObject,
    ) -> HitOutcome {
        let outcome = apply_damage(target, projectile.damage);
        if outcome.target_destroyed && target.kind != Kind::Player {
            self.score += u64::from(target.score_value);
        }
        outcome
    }

    fn on_player_hit(
        &mut self,
        player: &mut SpatialObject,
        enemy: &mut SpatialObject,
    ) -> HitOutcome {
        if player.is_invulnerable() {
            return HitOutcome::SURVIVED;
        }
        apply_damage(player, self.contact_damage);
        apply_damage(enemy, self.contact_damage)
    }

    fn on_pickup(&mut self, _: &mut SpatialObject, _: &SpatialObject) -> bool {
        self.pickups += 1;
        true
    }

    fn on_threshold_crossed(&mut self, _: ObjectId, _: &SpatialObject) -> ScrollCommand {
        if self.stop_on_trigger {
            ScrollCommand::Stop
        } else {
            ScrollCommand::Continue
        }
    }

    fn on_game_over(&mut self) {
        self.game_over = true;
    }
}
