// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: object slots, the frame loop, and deferred removal.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::Point;
use log::{debug, trace, warn};
use sidescroll_index::{BucketIndex, BucketRange};

use crate::behavior::Behavior;
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::policy::{Camera, ScenePolicy, ScrollCommand};
use crate::report::{FrameReport, UpdateFailure};
use crate::trigger::{Trigger, TriggerCondition};
use crate::types::{Kind, KindMask, Lifecycle, ObjectFlags, ObjectId, SpatialObject};

struct Slot<I> {
    generation: u32,
    object: SpatialObject,
    behavior: Box<dyn Behavior<I>>,
    dying: bool,
}

/// A scrolling collision scene.
///
/// Owns every object, the bucket index over them, and the removal queue.
/// The camera `C` and the rule set `P` are supplied at construction; `I` is the
/// caller's per-frame input state handed to each object's [`Behavior`].
pub struct Scene<I, C: Camera, P: ScenePolicy> {
    slots: Vec<Option<Slot<I>>>,
    generations: Vec<u32>, // survives `clear` so old ids stay stale
    free_list: Vec<usize>,
    index: BucketIndex<ObjectId>,
    removals: Vec<ObjectId>,
    triggers: Vec<Trigger>,
    player: Option<ObjectId>,
    camera: C,
    policy: P,
    config: SceneConfig,
    scroll_speed: f64,
    visible: BucketRange,
    paused: bool,
    game_over: bool,
    frame: u64,
}

impl<I, C: Camera, P: ScenePolicy> core::fmt::Debug for Scene<I, C, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.slots.len();
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("Scene")
            .field("slots_total", &total)
            .field("objects_alive", &alive)
            .field("pending_removals", &self.removals.len())
            .field("triggers", &self.triggers.len())
            .field("player", &self.player)
            .field("visible", &self.visible)
            .field("scroll_speed", &self.scroll_speed)
            .field("paused", &self.paused)
            .field("game_over", &self.game_over)
            .field("frame", &self.frame)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

fn live_slot<I>(slots: &[Option<Slot<I>>], id: ObjectId) -> Option<&Slot<I>> {
    slots
        .get(id.idx())?
        .as_ref()
        .filter(|s| s.generation == id.1)
}

fn live_slot_mut<I>(slots: &mut [Option<Slot<I>>], id: ObjectId) -> Option<&mut Slot<I>> {
    slots
        .get_mut(id.idx())?
        .as_mut()
        .filter(|s| s.generation == id.1)
}

fn live_pair_mut<I>(
    slots: &mut [Option<Slot<I>>],
    a: ObjectId,
    b: ObjectId,
) -> Option<(&mut SpatialObject, &mut SpatialObject)> {
    let [sa, sb] = slots.get_disjoint_mut([a.idx(), b.idx()]).ok()?;
    let sa = sa.as_mut().filter(|s| s.generation == a.1)?;
    let sb = sb.as_mut().filter(|s| s.generation == b.1)?;
    Some((&mut sa.object, &mut sb.object))
}

#[inline]
fn signed(bucket: usize) -> isize {
    isize::try_from(bucket).unwrap_or(isize::MAX)
}

impl<I, C: Camera, P: ScenePolicy> Scene<I, C, P> {
    /// Create an empty scene.
    ///
    /// The visible range starts out as the camera's current window.
    pub fn new(config: SceneConfig, camera: C, policy: P) -> Result<Self, SceneError> {
        config.validate()?;
        let index = BucketIndex::new(config.bucket_count, config.bucket_scale)?;
        let window = camera.window();
        let visible = index.range_for(window.left, window.right);
        Ok(Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            index,
            removals: Vec::new(),
            triggers: Vec::new(),
            player: None,
            camera,
            policy,
            scroll_speed: config.scroll_speed,
            config,
            visible,
            paused: false,
            game_over: false,
            frame: 0,
        })
    }

    /// The configuration the scene was built with.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The camera collaborator.
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Mutable access to the camera, for jumps the scene should not animate.
    ///
    /// The visible range follows on the next [`Scene::update`].
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    /// The rule set.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Mutable access to the rule set.
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    /// Read-only view of the bucket index.
    pub fn index(&self) -> &BucketIndex<ObjectId> {
        &self.index
    }

    /// Number of frames run.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Number of live objects, including those queued for removal.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if no objects are live.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Spawn `object` driven by `behavior` and index it at its position.
    ///
    /// The object starts out [`Lifecycle::Active`] with `running` set, whatever it was
    /// given. Spawning a [`Kind::Player`] makes it the designated player, replacing any
    /// previous one.
    pub fn spawn<B>(&mut self, object: SpatialObject, behavior: B) -> ObjectId
    where
        B: Behavior<I> + 'static,
    {
        let object = SpatialObject {
            running: true,
            ..object
        };
        let slot = |generation| Slot {
            generation,
            object,
            behavior: Box::new(behavior),
            dying: false,
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            // Slots at `u32::MAX` are never released, so this cannot wrap.
            let generation = self.generations[idx] + 1;
            self.generations[idx] = generation;
            self.slots[idx] = Some(slot(generation));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(slot(generation)));
            self.generations.push(generation);
            (self.slots.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ObjectId uses 32-bit indices by design."
        )]
        let id = ObjectId::new(idx as u32, generation);

        let inserted = self.index.insert(id, object.position.x);
        debug_assert!(inserted.is_ok(), "fresh ids are never indexed");

        if object.kind == Kind::Player {
            if let Some(previous) = self.player.filter(|p| self.is_alive(*p)) {
                warn!("player {id:?} replaces designated player {previous:?}");
            }
            self.player = Some(id);
        }
        debug!(
            "spawned {id:?} ({:?}) in bucket {:?}",
            object.kind,
            inserted.ok()
        );
        id
    }

    /// Queue `id` for removal at the start of the next frame.
    ///
    /// Idempotent: despawning a dying, reaped, or unknown object does nothing.
    pub fn despawn(&mut self, id: ObjectId) {
        self.enqueue(id);
    }

    /// Whether `id` refers to a live (possibly dying) object.
    pub fn is_alive(&self, id: ObjectId) -> bool {
        live_slot(&self.slots, id).is_some()
    }

    /// Lifecycle of `id`, or `None` once reaped.
    pub fn lifecycle(&self, id: ObjectId) -> Option<Lifecycle> {
        live_slot(&self.slots, id).map(|s| {
            if s.dying {
                Lifecycle::Dying
            } else {
                Lifecycle::Active
            }
        })
    }

    /// Object data for `id`.
    pub fn object(&self, id: ObjectId) -> Option<&SpatialObject> {
        live_slot(&self.slots, id).map(|s| &s.object)
    }

    /// Teleport `id` to `position`, re-bucketing it.
    pub fn set_position(&mut self, id: ObjectId, position: Point) -> Result<(), SceneError> {
        let slot =
            live_slot_mut(&mut self.slots, id).ok_or(SceneError::UnknownObject(id))?;
        slot.object.position = position;
        self.index
            .move_to(id, position.x)
            .map_err(|_| SceneError::UnknownObject(id))?;
        Ok(())
    }

    /// Replace the collision flags of `id`.
    pub fn set_flags(&mut self, id: ObjectId, flags: ObjectFlags) -> Result<(), SceneError> {
        let slot =
            live_slot_mut(&mut self.slots, id).ok_or(SceneError::UnknownObject(id))?;
        slot.object.flags = flags;
        Ok(())
    }

    /// Bucket `id` currently occupies.
    pub fn bucket_of(&self, id: ObjectId) -> Result<usize, SceneError> {
        self.index
            .bucket_of(id)
            .map_err(|_| SceneError::UnknownObject(id))
    }

    /// The designated player, if one is alive.
    pub fn player(&self) -> Option<ObjectId> {
        self.player
    }

    /// Objects queued for removal, in queue order.
    pub fn pending_removals(&self) -> &[ObjectId] {
        &self.removals
    }

    /// Buckets on screen as of the last frame.
    pub fn visible_range(&self) -> BucketRange {
        self.visible
    }

    /// Objects in the visible buckets, ascending by bucket, for drawing.
    ///
    /// Objects queued for removal this frame are still listed until the next frame reaps them.
    pub fn query_visible(&self) -> Vec<ObjectId> {
        self.index.query(self.visible).collect()
    }

    /// Visible objects whose kind is in `mask`.
    pub fn query_visible_filtered(&self, mask: KindMask) -> Vec<ObjectId> {
        self.index
            .query(self.visible)
            .filter(|id| self.object(*id).is_some_and(|o| mask.admits(o.kind)))
            .collect()
    }

    /// Watch `object` and call [`ScenePolicy::on_threshold_crossed`] each time
    /// `condition` becomes true.
    ///
    /// The trigger is armed against the object's current bucket and the visible range:
    /// if the condition already holds at registration, it fires only after the condition
    /// has turned false and true again. The trigger is dropped when its object is reaped.
    pub fn add_trigger(
        &mut self,
        object: ObjectId,
        condition: TriggerCondition,
    ) -> Result<(), SceneError> {
        if !self.is_alive(object) {
            return Err(SceneError::UnknownObject(object));
        }
        let bucket = self.bucket_of(object)?;
        self.triggers
            .push(Trigger::new(object, condition, bucket, self.visible));
        Ok(())
    }

    /// Stop advancing the camera.
    pub fn stop_scrolling(&mut self) {
        if self.scroll_speed != 0.0 {
            debug!("scrolling stopped at frame {}", self.frame);
        }
        self.scroll_speed = 0.0;
    }

    /// Resume scrolling at the configured speed.
    pub fn start_scrolling(&mut self) {
        self.scroll_speed = self.config.scroll_speed;
    }

    /// Scroll at `speed` world units per unit of frame time.
    pub fn set_scroll_speed(&mut self, speed: f64) -> Result<(), SceneError> {
        if !speed.is_finite() {
            return Err(SceneError::InvalidScrollSpeed(speed));
        }
        self.scroll_speed = speed;
        Ok(())
    }

    /// Current scroll speed.
    pub fn scroll_speed(&self) -> f64 {
        self.scroll_speed
    }

    /// Freeze the scene: [`Scene::update`] does nothing until [`Scene::resume`].
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Undo [`Scene::pause`].
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether the scene is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the player has run out of health.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Tear the scene down: every object, trigger, and pending removal is dropped.
    ///
    /// Outstanding [`ObjectId`]s become stale. Configuration, camera, and policy are kept.
    pub fn clear(&mut self) {
        for idx in 0..self.slots.len() {
            if self.slots[idx].take().is_some() {
                self.release(idx);
            }
        }
        self.index.clear();
        self.removals.clear();
        self.triggers.clear();
        self.player = None;
        self.game_over = false;
        debug!("scene cleared");
    }

    /// Reap every object queued for removal, in queue order. Returns the number reaped.
    ///
    /// [`Scene::update`] calls this first thing each frame.
    pub fn collect_garbage(&mut self) -> usize {
        let mut reaped = 0;
        for id in core::mem::take(&mut self.removals) {
            // Absent handles are fine: an object may be queued by several paths.
            let _ = self.index.remove(id);
            if live_slot(&self.slots, id).is_none() {
                continue;
            }
            self.slots[id.idx()] = None;
            self.release(id.idx());
            self.triggers.retain(|t| t.object != id);
            if self.player == Some(id) {
                self.player = None;
            }
            trace!("reaped {id:?}");
            reaped += 1;
        }
        reaped
    }

    /// Run one frame.
    ///
    /// 1. Reap objects queued during the previous frame.
    /// 2. Scroll the camera by `time_delta * scroll_speed`.
    /// 3. Recompute the visible bucket range.
    /// 4. Update visible objects and re-bucket the ones that moved.
    /// 5. Queue objects behind the window (and projectiles ahead of it) for removal.
    /// 6. Resolve projectile hits and player contacts among neighbouring buckets.
    /// 7. Fire triggers whose condition became true.
    ///
    /// Objects destroyed during steps 4 to 7 stay indexed and visible until the next call.
    /// Does nothing while paused.
    pub fn update(&mut self, time_delta: f64, input: &I) -> FrameReport {
        let mut report = FrameReport::default();
        if self.paused {
            return report;
        }

        report.reaped = self.collect_garbage();

        let mut window = self.camera.window();
        if self.scroll_speed != 0.0 {
            window = window.translated(time_delta * self.scroll_speed);
            self.camera.set_window(window);
        }
        self.visible = self.index.range_for(window.left, window.right);

        let on_screen: Vec<ObjectId> = self.index.query(self.visible).collect();
        for id in on_screen {
            self.update_object(id, time_delta, input, &mut report);
        }

        self.cull(&mut report);
        self.resolve_collisions(&mut report);
        self.fire_triggers(&mut report);

        trace!(
            "frame {}: visible {:?}, {} updated, {} moved, {} culled, {} hits, {} reaped, {} failures",
            self.frame,
            self.visible,
            report.updated,
            report.moved,
            report.culled,
            report.hits,
            report.reaped,
            report.failure_count()
        );
        self.frame += 1;
        report
    }

    // --- internals ---

    /// Return an emptied slot to the free list, unless its generation is spent.
    fn release(&mut self, idx: usize) {
        if self.generations[idx] == u32::MAX {
            debug!("slot {idx} retired after exhausting its generations");
        } else {
            self.free_list.push(idx);
        }
    }

    /// Mark `id` dying and queue it. Returns true if it was not already queued.
    fn enqueue(&mut self, id: ObjectId) -> bool {
        let Some(slot) = live_slot_mut(&mut self.slots, id) else {
            return false;
        };
        if slot.dying {
            return false;
        }
        slot.dying = true;
        slot.object.running = false;
        self.removals.push(id);
        true
    }

    fn enter_game_over(&mut self) {
        if !self.game_over {
            self.game_over = true;
            debug!("game over at frame {}", self.frame);
            self.policy.on_game_over();
        }
    }

    fn neighborhood(&self, id: ObjectId) -> Vec<ObjectId> {
        let Ok(bucket) = self.index.bucket_of(id) else {
            return Vec::new();
        };
        let bucket = signed(bucket);
        let radius = signed(self.config.neighborhood);
        self.index
            .query_range(bucket.saturating_sub(radius), bucket.saturating_add(radius))
            .collect()
    }

    fn update_object(
        &mut self,
        id: ObjectId,
        time_delta: f64,
        input: &I,
        report: &mut FrameReport,
    ) {
        let is_player = self.player == Some(id);
        let Some(slot) = live_slot_mut(&mut self.slots, id) else {
            return;
        };
        if slot.dying || (is_player && self.game_over) {
            return;
        }
        match slot.behavior.update(&slot.object, time_delta, input) {
            Ok(motion) => {
                report.updated += 1;
                let moved = motion.position != slot.object.position;
                slot.object.position = motion.position;
                if moved {
                    match self.index.move_to(id, motion.position.x) {
                        Ok(true) => report.moved += 1,
                        Ok(false) => {}
                        Err(err) => warn!("{id:?} is live but not indexed: {err}"),
                    }
                }
                if !motion.running {
                    self.enqueue(id);
                }
            }
            Err(error) => {
                warn!("isolating {id:?}: {error}");
                self.enqueue(id);
                report.failures.push(UpdateFailure { object: id, error });
            }
        }
    }

    fn cull(&mut self, report: &mut FrameReport) {
        let (Some(lo), Some(hi)) = (self.visible.lo(), self.visible.hi()) else {
            return;
        };
        let mut doomed: Vec<ObjectId> = Vec::new();
        if lo > 0 {
            doomed.extend(self.index.query_range(0, signed(lo) - 1));
        }
        let last = self.index.bucket_count() - 1;
        if hi < last {
            doomed.extend(
                self.index
                    .query_range(signed(hi) + 1, signed(last))
                    .filter(|id| self.object(*id).is_some_and(|o| o.kind == Kind::Projectile)),
            );
        }
        for id in doomed {
            if Some(id) == self.player {
                continue;
            }
            if self.enqueue(id) {
                report.culled += 1;
            }
        }
    }

    fn resolve_collisions(&mut self, report: &mut FrameReport) {
        let on_screen: Vec<ObjectId> = self.index.query(self.visible).collect();
        for id in on_screen {
            let Some(object) = self.object(id).copied() else {
                continue;
            };
            if !object.running || object.is_ghost() {
                continue;
            }
            match object.kind {
                Kind::Projectile => self.resolve_projectile(id, &object, report),
                Kind::Player => {
                    if self.player == Some(id) && !self.game_over {
                        self.resolve_player(id, report);
                    }
                }
                Kind::Collidable | Kind::Pickup => {}
            }
        }
    }

    fn resolve_projectile(
        &mut self,
        id: ObjectId,
        projectile: &SpatialObject,
        report: &mut FrameReport,
    ) {
        let owner_kind = projectile
            .owner
            .and_then(|o| self.object(o))
            .map(|o| o.kind);
        for target_id in self.neighborhood(id) {
            if target_id == id || Some(target_id) == projectile.owner {
                continue;
            }
            let is_player = self.player == Some(target_id);
            if is_player && self.game_over {
                continue;
            }
            let Some(target) = self.object(target_id) else {
                continue;
            };
            let eligible = match target.kind {
                Kind::Collidable | Kind::Player => target.running && !target.is_ghost(),
                Kind::Projectile | Kind::Pickup => false,
            };
            if !eligible
                || !projectile.overlaps(target)
                || !self.policy.can_hit(projectile, owner_kind, target)
            {
                continue;
            }

            let Some(slot) = live_slot_mut(&mut self.slots, target_id) else {
                continue;
            };
            let outcome = self.policy.on_projectile_hit(projectile, &mut slot.object);
            let target_health = slot.object.health;
            report.hits += 1;
            self.enqueue(id);
            if is_player {
                if outcome.target_destroyed || target_health == 0 {
                    self.enter_game_over();
                }
            } else if outcome.target_destroyed {
                self.enqueue(target_id);
            }
            // A projectile is spent on its first hit.
            break;
        }
    }

    fn resolve_player(&mut self, id: ObjectId, report: &mut FrameReport) {
        for other_id in self.neighborhood(id) {
            if other_id == id {
                continue;
            }
            let (Some(player), Some(other)) = (self.object(id), self.object(other_id)) else {
                continue;
            };
            if !other.running || other.is_ghost() || !player.overlaps(other) {
                continue;
            }
            let kind = other.kind;
            match kind {
                Kind::Collidable => {
                    let Some((player, enemy)) = live_pair_mut(&mut self.slots, id, other_id)
                    else {
                        continue;
                    };
                    let outcome = self.policy.on_player_hit(player, enemy);
                    let player_health = player.health;
                    report.hits += 1;
                    if outcome.target_destroyed {
                        self.enqueue(other_id);
                    }
                    if player_health == 0 {
                        self.enter_game_over();
                        break;
                    }
                }
                Kind::Pickup => {
                    let Some((player, pickup)) = live_pair_mut(&mut self.slots, id, other_id)
                    else {
                        continue;
                    };
                    if self.policy.on_pickup(player, pickup) {
                        report.pickups += 1;
                        self.enqueue(other_id);
                    }
                }
                // Projectiles resolve their own hits; other player-kind objects are inert.
                Kind::Projectile | Kind::Player => {}
            }
        }
    }

    fn fire_triggers(&mut self, report: &mut FrameReport) {
        let visible = self.visible;
        let index = &self.index;
        let mut fired: Vec<ObjectId> = Vec::new();
        self.triggers.retain_mut(|t| match index.bucket_of(t.object) {
            Ok(bucket) => {
                if t.observe(bucket, visible) {
                    fired.push(t.object);
                }
                true
            }
            Err(_) => false,
        });
        for id in fired {
            let Some(object) = self.object(id).copied() else {
                continue;
            };
            debug!("trigger on {id:?} fired at frame {}", self.frame);
            if self.policy.on_threshold_crossed(id, &object) == ScrollCommand::Stop {
                self.stop_scrolling();
            }
            report.triggered.push(id);
        }
    }
}
