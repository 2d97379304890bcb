//! Series synthesizer integration tests against the static source

use rand::rngs::StdRng;
use rand::SeedableRng;
use ratewatch::currency::Currency;
use ratewatch::rates::StaticRateSource;
use ratewatch::series::{MonthlySeriesBuilder, WeeklySeriesBuilder, MONTHLY_PERIODS, WEEKLY_PERIODS};
use ratewatch::stats::compute_stats;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const EUR_RATE: f64 = 0.923456;

fn usd_source() -> StaticRateSource {
    StaticRateSource::new().with_rates(Currency::USD, &[("EUR", EUR_RATE), ("GBP", 0.79)])
}

#[tokio::test]
async fn weekly_series_has_seven_ordered_periods() {
    let source = usd_source();
    let series = WeeklySeriesBuilder::new(Currency::USD, Currency::EUR)
        .build(&source)
        .await
        .unwrap();

    assert_eq!(series.len(), WEEKLY_PERIODS);
    assert_eq!(series.sample_count(), WEEKLY_PERIODS);
    assert_eq!(source.call_count(), WEEKLY_PERIODS);
    for value in series.values() {
        assert_eq!(value, EUR_RATE);
    }
}

#[tokio::test]
async fn weekly_series_soft_fails_single_period() {
    let source = usd_source().fail_on_calls(&[2]);
    let series = WeeklySeriesBuilder::new(Currency::USD, Currency::EUR)
        .build(&source)
        .await
        .unwrap();

    // The failed period is absent; the loop still ran to completion.
    assert_eq!(series.len(), WEEKLY_PERIODS);
    assert_eq!(series.sample_count(), WEEKLY_PERIODS - 1);
    assert!(series.samples()[2].is_none());
    assert!(series.samples()[1].is_some());
    assert!(series.samples()[3].is_some());
}

#[tokio::test]
async fn weekly_series_missing_target_is_absent() {
    let source = StaticRateSource::new().with_rates(Currency::USD, &[("GBP", 0.79)]);
    let series = WeeklySeriesBuilder::new(Currency::USD, Currency::EUR)
        .build(&source)
        .await
        .unwrap();

    assert_eq!(series.sample_count(), 0);
    assert!(compute_stats(&series).unwrap().is_none());
}

#[tokio::test]
async fn weekly_progress_reports_every_period() {
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();
    let source = usd_source();

    WeeklySeriesBuilder::new(Currency::USD, Currency::EUR)
        .on_progress(move |done, total| {
            assert_eq!(total, WEEKLY_PERIODS);
            counter.store(done, Ordering::SeqCst);
        })
        .build(&source)
        .await
        .unwrap();

    assert_eq!(seen.load(Ordering::SeqCst), WEEKLY_PERIODS);
}

#[tokio::test]
async fn monthly_series_jitter_stays_within_bounds() {
    let source = usd_source();
    let mut rng = StdRng::seed_from_u64(42);

    let series = MonthlySeriesBuilder::new(Currency::USD, Currency::EUR, 2024)
        .with_delay(Duration::ZERO)
        .build(&source, &mut rng)
        .await
        .unwrap();

    assert_eq!(series.len(), MONTHLY_PERIODS);
    assert_eq!(series.sample_count(), MONTHLY_PERIODS);
    // Rounding to 6 decimals can push a boundary value out by at most 5e-7.
    let lo = EUR_RATE * 0.975 - 1e-6;
    let hi = EUR_RATE * 1.025 + 1e-6;
    for value in series.values() {
        assert!(value >= lo && value <= hi, "jittered rate {} out of bounds", value);
    }
}

#[tokio::test]
async fn monthly_series_is_deterministic_for_a_seed() {
    let build = || async {
        let source = usd_source();
        let mut rng = StdRng::seed_from_u64(7);
        MonthlySeriesBuilder::new(Currency::USD, Currency::EUR, 2023)
            .with_delay(Duration::ZERO)
            .build(&source, &mut rng)
            .await
            .unwrap()
    };

    let a = build().await;
    let b = build().await;
    assert_eq!(a.values(), b.values());
}

#[tokio::test]
async fn monthly_series_labels_run_january_to_december() {
    let source = usd_source();
    let mut rng = StdRng::seed_from_u64(1);

    let series = MonthlySeriesBuilder::new(Currency::USD, Currency::EUR, 2024)
        .with_delay(Duration::ZERO)
        .build(&source, &mut rng)
        .await
        .unwrap();

    assert_eq!(series.period_labels().first().map(String::as_str), Some("Jan"));
    assert_eq!(series.period_labels().last().map(String::as_str), Some("Dec"));
}

#[tokio::test]
async fn monthly_series_all_failures_yield_empty_result() {
    let failing: Vec<usize> = (0..MONTHLY_PERIODS).collect();
    let source = usd_source().fail_on_calls(&failing);
    let mut rng = StdRng::seed_from_u64(3);

    let series = MonthlySeriesBuilder::new(Currency::USD, Currency::EUR, 2024)
        .with_delay(Duration::ZERO)
        .build(&source, &mut rng)
        .await
        .unwrap();

    assert_eq!(series.len(), MONTHLY_PERIODS);
    assert_eq!(series.sample_count(), 0);
    assert!(compute_stats(&series).unwrap().is_none());
}
