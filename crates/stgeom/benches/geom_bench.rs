//! Criterion microbenches for the hot geometry paths.
//!
//! - index↔world transforms on a typical volume frame.
//! - frame equality and sub-grid checks at default tolerances.
//! - time-point conversion and frame lookup on a 4D series.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use nalgebra::Vector3;
use stgeom::compat::{are_equal, is_sub_geometry, DEFAULT_COORDINATE_EPS, DEFAULT_DIRECTION_EPS};
use stgeom::gen::{proportional_volume, random_frame, volume_frame};

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    let frame = volume_frame([30, 25, 20], [0.5, 0.33, 0.78]);
    let index = Vector3::new(3.0, 3.0, 3.0);
    group.bench_function("index_to_world", |b| {
        b.iter(|| frame.index_to_world(std::hint::black_box(index)))
    });
    let world = frame.index_to_world(index);
    group.bench_function("world_to_index", |b| {
        b.iter(|| frame.world_to_index(std::hint::black_box(world)).unwrap())
    });
    group.bench_function("world_bounding_box", |b| b.iter(|| frame.world_bounding_box()));
    group.finish();
}

fn bench_compat(c: &mut Criterion) {
    let mut group = c.benchmark_group("compat");
    let a = random_frame(7);
    let b2 = a.clone();
    group.bench_function("are_equal", |b| {
        b.iter(|| {
            are_equal(
                std::hint::black_box(&a),
                std::hint::black_box(&b2),
                DEFAULT_COORDINATE_EPS,
                DEFAULT_DIRECTION_EPS,
                false,
            )
        })
    });
    group.bench_function("is_sub_geometry", |b| {
        b.iter(|| {
            is_sub_geometry(
                std::hint::black_box(&a),
                std::hint::black_box(&b2),
                DEFAULT_COORDINATE_EPS,
                DEFAULT_DIRECTION_EPS,
                false,
            )
        })
    });
    group.finish();
}

fn bench_timegeom(c: &mut Criterion) {
    let mut group = c.benchmark_group("timegeom");
    let series = proportional_volume([30, 25, 20], [0.5, 0.33, 0.78], 16);
    group.bench_function("geometry_for_time_point", |b| {
        b.iter(|| series.geometry_for_time_point(std::hint::black_box(7.5)))
    });
    group.bench_function("update_bounding_box", |b| {
        b.iter_batched(
            || series.clone(),
            |mut s| s.update_bounding_box(),
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_transforms, bench_compat, bench_timegeom);
criterion_main!(benches);
