//! Windowing, folding, and concurrent mapping benchmarks.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gatherers::{fold_running, map_concurrent, window_fixed, window_sliding};

// ============================================================================
// Windowing Benchmarks
// ============================================================================

fn bench_window_fixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_fixed");
    let data: Vec<u64> = (0..65_536).collect();
    group.throughput(Throughput::Elements(data.len() as u64));

    for size in [4, 64, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let windows = window_fixed(black_box(&data), size).unwrap().count();
                black_box(windows);
            });
        });
    }

    group.finish();
}

fn bench_window_sliding(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_sliding");
    let data: Vec<f64> = (0..16_384).map(f64::from).collect();
    group.throughput(Throughput::Elements(data.len() as u64));

    for size in [3, 20, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let total: f64 = window_sliding(black_box(data.iter().copied()), size)
                    .unwrap()
                    .map(|w| w.iter().sum::<f64>())
                    .sum();
                black_box(total);
            });
        });
    }

    group.finish();
}

// ============================================================================
// Fold Benchmarks
// ============================================================================

fn bench_fold_running(c: &mut Criterion) {
    let mut group = c.benchmark_group("fold_running");
    let data: Vec<u64> = (0..65_536).collect();
    group.throughput(Throughput::Elements(data.len() as u64));

    group.bench_function("running_sum_64k", |b| {
        b.iter(|| {
            let last = fold_running(black_box(&data), 0u64, |acc, x| acc.wrapping_add(*x)).last();
            black_box(last);
        });
    });

    group.finish();
}

// ============================================================================
// Concurrent Map Benchmarks
// ============================================================================

fn bench_map_concurrent(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_concurrent");
    let data: Vec<u64> = (0..4096).collect();
    group.throughput(Throughput::Elements(data.len() as u64));

    for workers in [1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(workers),
            &workers,
            |b, &workers| {
                b.iter(|| {
                    let out = map_concurrent(black_box(&data), workers, |x| {
                        Ok::<_, ()>((0..64).fold(*x, |h, i| h.rotate_left(5) ^ i))
                    })
                    .unwrap();
                    black_box(out);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_window_fixed,
    bench_window_sliding,
    bench_fold_running,
    bench_map_concurrent,
);
criterion_main!(benches);
