//! Compares the three convolution strategies on the shapes the selection tables cover.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dicetables::defs::{d100, d6};
use dicetables::{Combiner, Distribution, Strategy};

const ALL: [Strategy; 3] = [Strategy::Flattened, Strategy::Dictionary, Strategy::Indexed];

fn weighted(size: i64, occurrence: i64) -> Distribution {
    Distribution::new((0..size).map(|e| (e, occurrence))).unwrap_or_default()
}

fn bench_increment_size(c: &mut Criterion) {
    let combiner = Combiner::default();
    let current = weighted(50, 1);
    let mut group = c.benchmark_group("increment_size");

    for size in [2, 4, 8, 20, 50, 100] {
        let increment = weighted(size, 1);
        for strategy in ALL {
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), size),
                &increment,
                |b, increment| {
                    b.iter(|| combiner.combine_with(strategy, black_box(&current), 3, black_box(increment)))
                },
            );
        }
    }

    group.finish();
}

fn bench_times(c: &mut Criterion) {
    let combiner = Combiner::default();
    let identity = Distribution::identity();
    let mut group = c.benchmark_group("times");

    for times in [1, 2, 5, 10, 20] {
        for strategy in ALL {
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), times),
                &times,
                |b, &times| b.iter(|| combiner.combine_with(strategy, black_box(&identity), times, &d6())),
            );
        }
    }

    group.finish();
}

fn bench_dense_increment(c: &mut Criterion) {
    let combiner = Combiner::default();
    let increment = weighted(4, 2);
    let mut group = c.benchmark_group("dense_increment");

    for current_size in [5, 10, 50, 100] {
        let current = weighted(current_size, 1);
        for strategy in [Strategy::Dictionary, Strategy::Indexed] {
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), current_size),
                &current,
                |b, current| b.iter(|| combiner.combine_with(strategy, black_box(current), 20, &increment)),
            );
        }
    }

    group.finish();
}

fn bench_selected(c: &mut Criterion) {
    let combiner = Combiner::default();
    let identity = Distribution::identity();
    let die = d100();

    c.bench_function("selected/10d100", |b| {
        b.iter(|| combiner.combine(black_box(&identity), 10, &die))
    });
    c.bench_function("remove/10d100", |b| {
        let combined = combiner.combine(&identity, 10, &die).unwrap_or_default();
        b.iter(|| combiner.remove(black_box(&combined), 10, &die))
    });
}

criterion_group!(
    benches,
    bench_increment_size,
    bench_times,
    bench_dense_increment,
    bench_selected,
);

criterion_main!(benches);
