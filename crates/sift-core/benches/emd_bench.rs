//! Benchmarks for the EMD pipeline
//!
//! Run with: cargo bench -p sift-core --bench emd_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sift_core::envelope::build_envelope;
use sift_core::hilbert::instantaneous_attributes;
use sift_core::prelude::*;
use sift_core::{find_extrema, Sifter};
use std::f64::consts::PI;
use std::time::Duration;

fn two_tones(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64 / 256.0;
            (2.0 * PI * 16.0 * t).sin() + (2.0 * PI * t).sin()
        })
        .collect()
}

// ============================================================================
// Building Blocks
// ============================================================================

fn bench_extrema(c: &mut Criterion) {
    let mut group = c.benchmark_group("extrema");

    for n in [1024usize, 4096, 16384].iter() {
        let data = two_tones(*n);
        group.throughput(Throughput::Elements(*n as u64));
        group.bench_with_input(BenchmarkId::new("find_extrema", n), n, |b, _| {
            b.iter(|| find_extrema(black_box(&data), 5, 1e-7))
        });
    }

    group.finish();
}

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope");

    for n in [1024usize, 4096, 16384].iter() {
        let data = two_tones(*n);
        let extrema = find_extrema(&data, 5, 1e-7);
        group.throughput(Throughput::Elements(*n as u64));
        group.bench_with_input(BenchmarkId::new("spline_envelope", n), n, |b, _| {
            b.iter(|| build_envelope(black_box(&data), black_box(&extrema), false))
        });
    }

    group.finish();
}

// ============================================================================
// Sifting & Decomposition
// ============================================================================

fn bench_sift(c: &mut Criterion) {
    let mut group = c.benchmark_group("sift");
    let config = EmdConfig::default();
    let sifter = Sifter::new(&config);
    let data = two_tones(4096);

    group.throughput(Throughput::Elements(data.len() as u64));
    group.bench_function("extract_imf", |b| {
        b.iter(|| sifter.extract_imf(black_box(&data)))
    });

    group.finish();
}

fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");
    group.measurement_time(Duration::from_secs(5));

    for criterion in [StoppageCriterion::C1, StoppageCriterion::C2, StoppageCriterion::C3].iter() {
        let config = EmdConfig {
            stoppage_criterion: *criterion,
            ..Default::default()
        };
        let Ok(emd) = Emd::new(config) else {
            continue;
        };
        let data = two_tones(4096);

        group.throughput(Throughput::Elements(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("two_tones", criterion.name()), criterion, |b, _| {
            b.iter(|| emd.decompose(black_box(&data)))
        });
    }

    group.finish();
}

fn bench_hilbert(c: &mut Criterion) {
    let mut group = c.benchmark_group("hilbert");

    for n in [1024usize, 4096].iter() {
        let data = two_tones(*n);
        group.throughput(Throughput::Elements(*n as u64));
        group.bench_with_input(BenchmarkId::new("instantaneous", n), n, |b, _| {
            b.iter(|| instantaneous_attributes(black_box(&data), 256.0))
        });
    }

    group.finish();
}

criterion_group!(
    name = block_benches;
    config = Criterion::default();
    targets = bench_extrema, bench_envelope
);

criterion_group!(
    name = emd_benches;
    config = Criterion::default();
    targets = bench_sift, bench_decompose, bench_hilbert
);

criterion_main!(block_benches, emd_benches);
