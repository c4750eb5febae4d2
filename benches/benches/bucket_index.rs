// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sidescroll_index::BucketIndex;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_xs(count: usize, span: f64, seed: u64) -> Vec<f64> {
    let mut rng = Rng::new(seed);
    (0..count).map(|_| rng.next_f64() * span).collect()
}

fn filled(buckets: usize, xs: &[f64]) -> BucketIndex<u32> {
    let mut idx = BucketIndex::new(buckets, 1.0).expect("valid geometry");
    for (i, &x) in xs.iter().enumerate() {
        let _ = idx.insert(i as u32, x);
    }
    idx
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[256usize, 1024, 4096] {
        let xs = gen_xs(n, 128.0, 0x5EED);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("n{}", n), |b| {
            b.iter_batched(
                || BucketIndex::<u32>::new(128, 1.0).expect("valid geometry"),
                |mut idx| {
                    for (i, &x) in xs.iter().enumerate() {
                        let _ = idx.insert(i as u32, x);
                    }
                    black_box(idx.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_window_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_query");
    for &n in &[1024usize, 8192] {
        let idx = filled(128, &gen_xs(n, 128.0, 0xBEEF));
        group.bench_function(format!("width16_n{}", n), |b| {
            let mut lo = 0_isize;
            b.iter(|| {
                lo = (lo + 1) % 112;
                let hits = idx.query_range(lo, lo + 15).count();
                black_box(hits);
            })
        });
        group.bench_function(format!("neighborhood_n{}", n), |b| {
            b.iter(|| {
                let mut total = 0_usize;
                for bucket in 0..128_isize {
                    total += idx.query_range(bucket - 1, bucket + 1).count();
                }
                black_box(total);
            })
        });
    }
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    let n = 2048_usize;
    let xs = gen_xs(n, 128.0, 0xC0FFEE);
    group.throughput(Throughput::Elements(n as u64));
    group.bench_function("move_small_steps", |b| {
        b.iter_batched(
            || (filled(128, &xs), xs.clone()),
            |(mut idx, mut xs)| {
                // Drift everything right; roughly a third crosses a bucket edge.
                for (i, x) in xs.iter_mut().enumerate() {
                    *x += 0.3;
                    let _ = idx.move_to(i as u32, *x);
                }
                black_box(idx.len());
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("remove_all", |b| {
        b.iter_batched(
            || filled(128, &xs),
            |mut idx| {
                for i in 0..n as u32 {
                    black_box(idx.remove(i));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_window_query, bench_churn);
criterion_main!(benches);
