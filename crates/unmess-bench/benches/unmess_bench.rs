//! Benchmarks for unmess operations.
//!
//! Run with: `cargo bench -p unmess-bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::sync::Arc;

use unmess_core::{NoopObserver, RgbaBuffer};
use unmess_history::{HistoryManager, ImageState};
use unmess_ops::{adjust, filter, transform, Adjustments, Edit};

const SIZES: [u32; 3] = [256, 512, 1024];

fn test_image(size: u32) -> RgbaBuffer {
    RgbaBuffer::from_fn(size, size, |x, y| {
        let fx = x as f32 / size as f32;
        let fy = y as f32 / size as f32;
        [fx, fy, (fx + fy) * 0.5, 1.0]
    })
}

/// Benchmark Gaussian blur across radii.
fn bench_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("gaussian_blur");
    group.sample_size(20);

    let img = test_image(512);
    group.throughput(Throughput::Elements(512 * 512));

    for radius in [1u32, 3, 5, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, &r| {
            b.iter(|| filter::gaussian_blur(black_box(&img), r).unwrap())
        });
    }

    group.finish();
}

/// Benchmark the sharpen convolution across image sizes.
fn bench_sharpen(c: &mut Criterion) {
    let mut group = c.benchmark_group("sharpen");

    for size in SIZES {
        let img = test_image(size);
        group.throughput(Throughput::Elements(size as u64 * size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &img, |b, img| {
            b.iter(|| filter::sharpen(black_box(img), 1.5).unwrap())
        });
    }

    group.finish();
}

/// Benchmark per-pixel adjustments.
fn bench_point_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_ops");

    let img = test_image(1024);
    group.throughput(Throughput::Elements(1024 * 1024));

    group.bench_function("brightness", |b| {
        b.iter(|| adjust::brightness(black_box(&img), 0.2).unwrap())
    });
    group.bench_function("saturation", |b| {
        b.iter(|| adjust::saturation(black_box(&img), 0.5).unwrap())
    });
    group.bench_function("sepia", |b| b.iter(|| adjust::sepia(black_box(&img)).unwrap()));

    let stack = Adjustments::new().brightness(0.1).contrast(0.2).saturation(-0.3);
    group.bench_function("adjustments_stack", |b| {
        b.iter(|| stack.apply(black_box(&img), &NoopObserver).unwrap())
    });

    group.finish();
}

/// Benchmark geometric transforms.
fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");

    for size in SIZES {
        let img = test_image(size);
        group.throughput(Throughput::Elements(size as u64 * size as u64));
        group.bench_with_input(BenchmarkId::new("rotate_cw", size), &img, |b, img| {
            b.iter(|| transform::rotate_90_cw(black_box(img)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("flip_h", size), &img, |b, img| {
            b.iter(|| transform::flip_h(black_box(img)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark state derivation and history pushes.
fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");

    let state = ImageState::from_image(&test_image(256), "bench.png").unwrap();
    group.bench_function("apply_invert", |b| {
        b.iter(|| state.apply(black_box(&Edit::Invert), &NoopObserver).unwrap())
    });

    let shared = Arc::new(state);
    group.bench_function("save_state_at_capacity", |b| {
        let history = HistoryManager::new(20).unwrap();
        b.iter(|| history.save_state(Arc::clone(black_box(&shared))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_blur,
    bench_sharpen,
    bench_point_ops,
    bench_transform,
    bench_history,
);

criterion_main!(benches);
