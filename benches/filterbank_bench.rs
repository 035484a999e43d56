//! Streaming Filterbank Benchmarks
//!
//! Measures the per-sample cost of the streaming update across optimisation
//! levels, plus the one-time cost of priming the windows after a reset.
//!
//! Run with:
//!   cargo bench --bench filterbank_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cwt_bank::{Filterbank, Optimisation};
use std::f64::consts::PI;

/// Test data: a two-tone signal
fn generate_signal(count: usize, sample_rate: f64) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let t = i as f64 / sample_rate;
            (2.0 * PI * 5.0 * t).sin() + 0.5 * (2.0 * PI * 18.0 * t).sin()
        })
        .collect()
}

/// Benchmark steady-state update cost per optimisation level
fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("filterbank_update");
    let sample_rate = 100.0;
    let signal = generate_signal(1024, sample_rate);

    for optimisation in [
        Optimisation::None,
        Optimisation::Standard2,
        Optimisation::Aggressive2,
    ] {
        group.throughput(Throughput::Elements(signal.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("stream", format!("{optimisation:?}")),
            &optimisation,
            |b, &optimisation| {
                let mut fb = Filterbank::new(sample_rate, 1.0, 30.0, 4.0).unwrap();
                fb.set_optimisation(optimisation).unwrap();
                // Warm up past the priming phase
                for &value in &signal {
                    fb.update(value);
                }
                b.iter(|| {
                    for &value in &signal {
                        fb.update(black_box(value));
                    }
                    black_box(fb.result_power()[0])
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the first update after a reset, which primes every window
fn bench_priming(c: &mut Criterion) {
    let mut group = c.benchmark_group("filterbank_priming");

    for optimisation in [Optimisation::None, Optimisation::Standard2] {
        group.bench_with_input(
            BenchmarkId::new("first_update", format!("{optimisation:?}")),
            &optimisation,
            |b, &optimisation| {
                let mut fb = Filterbank::new(100.0, 1.0, 30.0, 4.0).unwrap();
                fb.set_optimisation(optimisation).unwrap();
                b.iter(|| {
                    fb.reset();
                    fb.update(black_box(1.0));
                    black_box(fb.result_power()[0])
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_update, bench_priming);
criterion_main!(benches);
