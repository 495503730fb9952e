//! Benchmarks for fair value prediction and classification

use card_fair_value::{classify, DecisionConfig, FairValueEstimator, PriceRow, SeriesStore};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn store(cards: usize, days: i64) -> SeriesStore {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let rows = (0..cards).flat_map(|card| {
        (0..days).map(move |day| {
            PriceRow::new(
                format!("sv2a-{:03}", card),
                start + Duration::days(day),
                Decimal::from(100 + day % 17) + Decimal::from(card as i64),
            )
        })
    });
    SeriesStore::from_rows(rows).unwrap()
}

fn benchmark_predict_uncached(c: &mut Criterion) {
    let estimator = FairValueEstimator::builder(store(200, 365))
        .cache_capacity(0)
        .build();

    c.bench_function("predict_uncached", |b| {
        b.iter(|| estimator.predict(black_box("sv2a-042"), None))
    });
}

fn benchmark_predict_cached(c: &mut Criterion) {
    let estimator = FairValueEstimator::new(store(200, 365));
    estimator.predict("sv2a-042", None).unwrap();

    c.bench_function("predict_cached", |b| {
        b.iter(|| estimator.predict(black_box("sv2a-042"), None))
    });
}

fn benchmark_classify(c: &mut Criterion) {
    let config = DecisionConfig::default();

    c.bench_function("classify", |b| {
        b.iter(|| classify(black_box(dec!(87.50)), black_box(dec!(96.25)), &config))
    });
}

criterion_group!(
    benches,
    benchmark_predict_uncached,
    benchmark_predict_cached,
    benchmark_classify
);
criterion_main!(benches);
