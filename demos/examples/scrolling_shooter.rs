// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless side-scrolling shooter driven by a simulated 60 Hz clock.
//!
//! The player holds the fire button and drifts right; a wall of drones waits ahead,
//! with a boss gate at the end that halts scrolling when the camera reaches it.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p sidescroll_demos --example scrolling_shooter`

use kurbo::{Point, Rect, Vec2};
use sidescroll_scene::{
    Behavior, BehaviorError, Camera, FrameClock, Kind, Linear, Motion, Scene, SceneConfig,
    SpatialObject, StandardRules, Stationary, TriggerCondition, Viewport,
};

/// Per-frame input state handed to every behaviour.
#[derive(Clone, Copy, Debug, Default)]
struct Controls {
    up: bool,
    down: bool,
}

/// Keeps pace with the camera and steers on input.
struct Pilot {
    speed: f64,
}

impl Behavior<Controls> for Pilot {
    fn update(
        &mut self,
        ship: &SpatialObject,
        dt: f64,
        input: &Controls,
    ) -> Result<Motion, BehaviorError> {
        let mut step = Vec2::new(self.speed * dt, 0.0);
        if input.up {
            step.y -= self.speed * dt;
        }
        if input.down {
            step.y += self.speed * dt;
        }
        Ok(Motion::running(ship.position + step))
    }
}

const SCROLL: f64 = 0.004;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SceneConfig {
        bucket_count: 64,
        bucket_scale: 1.0,
        scroll_speed: SCROLL,
        neighborhood: 1,
    };
    let mut scene: Scene<Controls, _, _> =
        Scene::new(config, Viewport::new(0.0, 16.0), StandardRules::default())
            .expect("valid config");

    let hull = Rect::new(0.0, 0.0, 0.8, 0.8);
    let player = scene.spawn(
        SpatialObject {
            health: 3,
            ..SpatialObject::new(Kind::Player, Point::new(1.0, 4.0), hull)
        },
        Pilot { speed: SCROLL },
    );
    for i in 0..24 {
        let x = 12.0 + f64::from(i) * 1.5;
        let y = f64::from(i % 5) * 2.0;
        scene.spawn(
            SpatialObject {
                health: 2,
                score_value: 100,
                ..SpatialObject::new(Kind::Collidable, Point::new(x, y), hull)
            },
            Linear::new(Vec2::new(-0.001, 0.0)),
        );
    }
    for i in 0..6 {
        let x = 8.0 + f64::from(i) * 5.0;
        scene.spawn(
            SpatialObject::new(Kind::Pickup, Point::new(x, 4.0), hull),
            Stationary,
        );
    }
    let boss = scene.spawn(
        SpatialObject {
            health: 40,
            score_value: 5000,
            ..SpatialObject::new(Kind::Collidable, Point::new(56.0, 4.0), Rect::new(0.0, -2.0, 4.0, 2.0))
        },
        Stationary,
    );
    scene
        .add_trigger(boss, TriggerCondition::WindowReaches)
        .expect("boss was just spawned");

    let mut clock = FrameClock::starting_at(0.0);
    let mut now = 0.0;
    for frame in 0..900_u32 {
        now += 1000.0 / 60.0;
        if frame == 300 {
            clock.pause(now);
            scene.pause();
        }
        if frame == 330 {
            clock.resume(now);
            scene.resume();
        }
        let dt = clock.tick(now);

        let controls = Controls {
            up: frame % 120 < 20,
            down: (60..80).contains(&(frame % 120)),
        };
        if frame % 10 == 0 && !scene.is_game_over() {
            if let Some(ship) = scene.object(player).copied() {
                scene.spawn(
                    SpatialObject {
                        owner: Some(player),
                        ..SpatialObject::new(
                            Kind::Projectile,
                            ship.position + Vec2::new(0.8, 0.3),
                            Rect::new(0.0, 0.0, 0.3, 0.2),
                        )
                    },
                    Linear::with_ttl(Vec2::new(0.02, 0.0), 1500.0),
                );
            }
        }

        let report = scene.update(dt, &controls);
        if !report.triggered.is_empty() {
            log::info!("frame {frame}: boss gate reached, scrolling halted");
        }
        if report.hits > 0 || report.pickups > 0 {
            log::info!(
                "frame {frame}: {} hits, {} pickups, score {}",
                report.hits,
                report.pickups,
                scene.policy().score
            );
        }
        for failure in &report.failures {
            log::warn!("frame {frame}: {:?} failed: {}", failure.object, failure.error);
        }
        if scene.is_game_over() {
            log::info!("frame {frame}: game over");
            break;
        }
    }

    let rules = scene.policy();
    println!(
        "finished after {} frames: score {}, pickups {}, {} objects left, window {:?}",
        scene.frame(),
        rules.score,
        rules.pickups,
        scene.len(),
        scene.camera().window(),
    );
}
