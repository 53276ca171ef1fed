//! Criterion benchmarks for the watcher hot paths.
//!
//! Benchmarks:
//! 1. Single-index Ichimoku tuple at the series tail
//! 2. Full trailing-window snapshot assembly

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kumo_core::domain::Bar;
use kumo_core::indicators::{self, IchimokuPoint};
use kumo_core::signal::Signal;
use kumo_core::snapshot;

fn make_bars(n: usize) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
            }
        })
        .collect()
}

fn bench_compute_latest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ichimoku_latest");
    for n in [100usize, 500, 2500] {
        let bars = make_bars(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &bars, |b, bars| {
            b.iter(|| indicators::compute(black_box(bars), bars.len() - 1));
        });
    }
    group.finish();
}

fn bench_snapshot_build(c: &mut Criterion) {
    let bars = make_bars(2500);
    let latest: IchimokuPoint = indicators::compute(&bars, bars.len() - 1).unwrap();

    c.bench_function("snapshot_build_40_bar_window", |b| {
        b.iter(|| {
            snapshot::build(
                black_box("GLD"),
                black_box(&bars),
                &latest,
                Signal::Neutral,
                Vec::new(),
            )
        });
    });
}

criterion_group!(benches, bench_compute_latest, bench_snapshot_build);
criterion_main!(benches);
