//! Criterion benchmarks for the shared curriculum table.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rookery_curriculum::{CurriculumParameters, FEED_RADIUS, FISH_SPEED};

fn bench_snapshot(c: &mut Criterion) {
    let params = CurriculumParameters::with_values([(FISH_SPEED, 1.0), (FEED_RADIUS, 0.5)]);
    c.bench_function("curriculum_snapshot", |b| {
        b.iter(|| black_box(params.snapshot()));
    });
}

fn bench_set_batch_with_subscriber(c: &mut Criterion) {
    let params = CurriculumParameters::new();
    params.subscribe(FISH_SPEED, |v| {
        black_box(v);
    });
    let mut value = 0.0f32;
    c.bench_function("curriculum_set_batch", |b| {
        b.iter(|| {
            value += 0.001;
            black_box(params.set_batch([(FISH_SPEED, value), (FEED_RADIUS, value)]));
        });
    });
}

criterion_group!(benches, bench_snapshot, bench_set_batch_with_subscriber);
criterion_main!(benches);
