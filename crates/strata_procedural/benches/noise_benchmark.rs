//! Benchmark for noise sampling and height lookup.
//!
//! Run with: cargo bench --package strata_procedural --bench noise_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use strata_procedural::{terrain_height, Noise2D, NoiseSettings, SimplexNoise, WorldSeed};

fn benchmark_single_sample(c: &mut Criterion) {
    let noise = SimplexNoise::new(WorldSeed::new(42));

    c.bench_function("single_noise_sample", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.sample(black_box(x), black_box(x * 0.7)))
        });
    });
}

fn benchmark_million_samples(c: &mut Criterion) {
    let noise = SimplexNoise::new(WorldSeed::new(42));

    let mut group = c.benchmark_group("million_samples");
    group.throughput(Throughput::Elements(1_000_000));
    group.sample_size(10);

    group.bench_function("1M_noise_samples", |b| {
        b.iter(|| {
            for i in 0..1_000_000 {
                let x = f64::from(i % 1000) * 0.1;
                let y = f64::from(i / 1000) * 0.1;
                black_box(noise.sample(x, y));
            }
        });
    });

    group.finish();
}

fn benchmark_terrain_height(c: &mut Criterion) {
    let noise = SimplexNoise::new(WorldSeed::new(42));
    let settings = NoiseSettings {
        seed: 42,
        ..NoiseSettings::default()
    };

    c.bench_function("terrain_height_per_column", |b| {
        let mut x = 0i32;
        b.iter(|| {
            x = x.wrapping_add(1);
            black_box(terrain_height(&noise, &settings, 64, black_box(x), black_box(x / 3)))
        });
    });
}

fn benchmark_table_construction(c: &mut Criterion) {
    c.bench_function("simplex_from_seed", |b| {
        let mut seed = 1u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(SimplexNoise::new(WorldSeed::new(black_box(seed))))
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_sample,
    benchmark_million_samples,
    benchmark_terrain_height,
    benchmark_table_construction
);
criterion_main!(benches);
