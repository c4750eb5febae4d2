// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use sidescroll_scene::{
    Kind, Linear, Scene, SceneConfig, SpatialObject, StandardRules, Stationary, Viewport,
};

type BenchScene = Scene<(), Viewport, StandardRules>;

fn populated(enemies: usize, shots: usize) -> BenchScene {
    let config = SceneConfig {
        bucket_count: 256,
        scroll_speed: 0.001,
        ..Default::default()
    };
    let mut scene =
        Scene::new(config, Viewport::new(0.0, 24.0), StandardRules::default()).expect("valid config");
    let unit = Rect::new(0.0, 0.0, 0.5, 0.5);
    let player = scene.spawn(
        SpatialObject::new(Kind::Player, Point::new(1.0, 0.0), unit),
        Linear::new(Vec2::new(0.001, 0.0)),
    );
    for i in 0..enemies {
        let x = 4.0 + (i as f64 * 0.37) % 200.0;
        let y = (i % 16) as f64;
        scene.spawn(
            SpatialObject {
                health: 3,
                ..SpatialObject::new(Kind::Collidable, Point::new(x, y), unit)
            },
            Stationary,
        );
    }
    for i in 0..shots {
        let y = (i % 16) as f64 + 0.1;
        scene.spawn(
            SpatialObject {
                owner: Some(player),
                ..SpatialObject::new(Kind::Projectile, Point::new(1.5, y), unit)
            },
            Linear::new(Vec2::new(0.01, 0.0)),
        );
    }
    scene
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_frame");
    for &(enemies, shots) in &[(256usize, 16usize), (2048, 64)] {
        group.throughput(Throughput::Elements((enemies + shots) as u64));
        group.bench_function(format!("e{}_s{}", enemies, shots), |b| {
            b.iter_batched(
                || populated(enemies, shots),
                |mut scene| {
                    for _ in 0..60 {
                        black_box(scene.update(16.0, &()));
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_frame);
criterion_main!(benches);
