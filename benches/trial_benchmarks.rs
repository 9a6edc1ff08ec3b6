//! Trial runner benchmarks.
//!
//! Run with: cargo bench --bench trial_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use distsim::prelude::*;

/// Exponential trial at increasing sample counts.
fn bench_exponential_trial(c: &mut Criterion) {
    let mut group = c.benchmark_group("exponential_trial");
    group.sample_size(50);

    for n in [1_000_u64, 10_000, 100_000] {
        group.throughput(Throughput::Elements(n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut rng = SimRng::new(42);
            let mut generator = ExponentialGenerator::new(30.0).unwrap_or_else(|e| {
                unreachable!("valid lam rejected: {e}")
            });
            b.iter(|| {
                let hist = run_trial(0.0, 120.0, 24, &mut generator, n, &mut rng);
                black_box(hist)
            });
        });
    }

    group.finish();
}

/// Triangular trial: rejection sampling costs about two uniform pairs per point.
fn bench_triangular_trial(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangular_trial");
    group.sample_size(50);

    for n in [1_000_u64, 10_000, 100_000] {
        group.throughput(Throughput::Elements(n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut rng = SimRng::new(42);
            b.iter(|| {
                let hist = run_trial(0.0, 1.0, 20, &mut TriangularGenerator, n, &mut rng);
                black_box(hist)
            });
        });
    }

    group.finish();
}

/// Bucket count should not affect per-point cost.
fn bench_bucket_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("bucket_count");

    for subintervals in [10_usize, 100, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(subintervals),
            &subintervals,
            |b, &subintervals| {
                let mut rng = SimRng::new(7);
                let mut uniform = |rng: &mut SimRng| rng.gen_f64();
                b.iter(|| {
                    let hist = run_trial(0.0, 1.0, subintervals, &mut uniform, 10_000, &mut rng);
                    black_box(hist)
                });
            },
        );
    }

    group.finish();
}

/// Both default scenarios end to end.
fn bench_run_all(c: &mut Criterion) {
    let config = SimConfig::builder().seed(42).build();
    c.bench_function("run_all_default", |b| {
        b.iter(|| {
            let mut sink = FigureRecorder::new();
            black_box(run_all(&config, &mut sink))
        });
    });
}

criterion_group!(
    benches,
    bench_exponential_trial,
    bench_triangular_trial,
    bench_bucket_count,
    bench_run_all
);
criterion_main!(benches);
