//! Harness self-cost benchmark suite
//!
//! Measures what the harness itself adds on top of a thunk:
//! - Per-run overhead at several iteration counts, with and without samples
//! - Clock read cost
//! - Record serialization and parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use poly_bench_harness::{BenchResult, Clock, Runner};

fn bench_run_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_overhead");

    for iterations in [16u64, 256, 4096] {
        group.throughput(Throughput::Elements(iterations));

        group.bench_with_input(
            BenchmarkId::new("with_samples", iterations),
            &iterations,
            |bencher, &iterations| {
                let runner = Runner::new();
                bencher.iter(|| runner.run(iterations, 0, || black_box(1u64)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("totals_only", iterations),
            &iterations,
            |bencher, &iterations| {
                let runner = Runner::new().capture_samples(false);
                bencher.iter(|| runner.run(iterations, 0, || black_box(1u64)))
            },
        );
    }

    group.finish();
}

fn bench_clock(c: &mut Criterion) {
    c.bench_function("clock_elapsed_nanos", |bencher| {
        bencher.iter(|| Clock::elapsed_nanos(black_box(Clock::now())))
    });
}

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");

    for len in [0usize, 100, 10_000] {
        // Deterministic samples for stable benches
        let samples: Vec<u64> = (0..len as u64).map(|i| 900 + (i * 37) % 200).collect();
        let record = BenchResult::from_samples(samples);
        let json = record.to_json().expect("well-formed record");

        group.bench_with_input(BenchmarkId::new("to_json", len), &record, |bencher, record| {
            bencher.iter(|| black_box(record).to_json())
        });

        group.bench_with_input(BenchmarkId::new("from_json", len), &json, |bencher, json| {
            bencher.iter(|| BenchResult::from_json(black_box(json)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_run_overhead, bench_clock, bench_serialization);
criterion_main!(benches);
