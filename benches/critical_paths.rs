//! Criterion benchmarks for hq2x critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - YUV: direct conversion vs. the precomputed table
//! - Classify: pattern code for one neighborhood
//! - Blend: 2x2 output block for one neighborhood
//! - Upscale: whole images, parallel and sequential

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sprite_hq2x::color::{Pixel, PixelMode};
use sprite_hq2x::hqx::{Hq2x, Neighborhood, UpscaleOptions, YuvConverter};
use sprite_hq2x::surface::Bitmap;

// =============================================================================
// Test Data Generators
// =============================================================================

/// A sprite with hard diagonal edges, soft gradients and flat areas.
fn make_sprite(size: u32) -> Bitmap {
    Bitmap::from_fn(size, size, PixelMode::Rgba, |x, y| {
        if (x / 4 + y / 4) % 2 == 0 {
            Pixel::rgb(24, 20, 37)
        } else if x > y {
            Pixel::rgb((x * 255 / size) as u8, 140, (y * 255 / size) as u8)
        } else {
            Pixel::rgba(255, 236, 39, if x % 3 == 0 { 128 } else { 255 })
        }
    })
}

/// A neighborhood with an edge through the middle.
fn make_edge_neighborhood() -> Neighborhood {
    let dark = Pixel::rgb(24, 20, 37);
    let light = Pixel::rgb(255, 236, 39);
    Neighborhood::new([dark, dark, light, dark, dark, light, dark, light, light])
}

// =============================================================================
// YUV Benchmarks
// =============================================================================

fn bench_yuv(c: &mut Criterion) {
    let mut group = c.benchmark_group("yuv");

    let direct = YuvConverter::direct();
    let table = YuvConverter::precomputed();
    let a = Pixel::rgb(200, 120, 40);
    let b = Pixel::rgb(190, 130, 45);

    group.bench_function("to_yuv_direct", |bench| bench.iter(|| direct.to_yuv(black_box(a))));
    group.bench_function("to_yuv_table", |bench| bench.iter(|| table.to_yuv(black_box(a))));
    group.bench_function("differ_direct", |bench| {
        bench.iter(|| direct.differ(black_box(a), black_box(b)))
    });
    group.bench_function("differ_table", |bench| {
        bench.iter(|| table.differ(black_box(a), black_box(b)))
    });

    group.sample_size(10);
    group.bench_function("build_table", |bench| bench.iter(YuvConverter::precomputed));

    group.finish();
}

// =============================================================================
// Per-pixel Benchmarks
// =============================================================================

fn bench_pixel(c: &mut Criterion) {
    let mut group = c.benchmark_group("pixel");

    let scaler = Hq2x::new();
    let edge = make_edge_neighborhood();
    let flat = Neighborhood::uniform(Pixel::rgb(24, 20, 37));

    group.bench_function("classify_edge", |b| b.iter(|| scaler.classify(black_box(&edge))));
    group.bench_function("classify_flat", |b| b.iter(|| scaler.classify(black_box(&flat))));

    let pattern = scaler.classify(&edge);
    group.bench_function("blend_edge", |b| {
        b.iter(|| scaler.blend(black_box(pattern), black_box(&edge)))
    });

    let sprite = make_sprite(16);
    group.bench_function("magnify_pixel", |b| {
        b.iter(|| scaler.magnify_pixel(black_box(&sprite), black_box(7), black_box(9)))
    });

    group.finish();
}

// =============================================================================
// Upscale Benchmarks
// =============================================================================

fn bench_upscale(c: &mut Criterion) {
    let mut group = c.benchmark_group("upscale");

    let sequential = Hq2x::with_options(UpscaleOptions { parallel: false, yuv_table: false });
    let parallel = Hq2x::with_options(UpscaleOptions { parallel: true, yuv_table: false });
    let parallel_table = Hq2x::with_options(UpscaleOptions { parallel: true, yuv_table: true });

    for size in [16u32, 64, 256].iter() {
        let sprite = make_sprite(*size);
        group.throughput(Throughput::Elements((*size * *size) as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &sprite, |b, sprite| {
            b.iter(|| sequential.upscale(black_box(sprite)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &sprite, |b, sprite| {
            b.iter(|| parallel.upscale(black_box(sprite)))
        });
        group.bench_with_input(BenchmarkId::new("parallel_table", size), &sprite, |b, sprite| {
            b.iter(|| parallel_table.upscale(black_box(sprite)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_yuv, bench_pixel, bench_upscale);
criterion_main!(benches);
