//! Converter session integration tests

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratewatch::currency::Currency;
use ratewatch::error::RateWatchError;
use ratewatch::format::format_amount;
use ratewatch::rates::{RateTable, StaticRateSource};
use ratewatch::session::ConverterSession;
use std::collections::HashMap;
use std::time::Duration;

fn two_way_source() -> StaticRateSource {
    // Stable, consistent rates in both directions.
    StaticRateSource::new()
        .with_rates(Currency::USD, &[("EUR", 0.92), ("GBP", 0.79)])
        .with_rates(Currency::EUR, &[("USD", 1.0 / 0.92), ("GBP", 0.86)])
}

fn table(base: Currency, rates: &[(&str, f64)]) -> RateTable {
    let rates: HashMap<String, f64> = rates
        .iter()
        .map(|(code, rate)| (code.to_string(), *rate))
        .collect();
    RateTable::new(base, rates, Utc::now())
}

#[tokio::test]
async fn convert_uses_loaded_rates() {
    let source = two_way_source();
    let mut session = ConverterSession::new(Currency::USD, Currency::EUR);
    session.set_amount(100.0);

    assert!(session.load_rates(&source).await.unwrap());
    let conversion = session.convert().unwrap();

    assert_eq!(conversion.rate, 0.92);
    assert!((conversion.converted - 92.0).abs() < 1e-9);
    assert_eq!(format_amount(conversion.converted), "92.00");
}

#[tokio::test]
async fn negative_amount_clamps_to_zero() {
    let source = two_way_source();
    let mut session = ConverterSession::new(Currency::USD, Currency::EUR);
    session.set_amount(-42.0);
    session.load_rates(&source).await.unwrap();

    let conversion = session.convert().unwrap();
    assert_eq!(conversion.amount, 0.0);
    assert_eq!(format_amount(conversion.converted), "0.00");
}

#[tokio::test]
async fn double_swap_is_idempotent() {
    let source = two_way_source();
    let mut session = ConverterSession::new(Currency::USD, Currency::EUR);
    session.set_amount(100.0);

    session.load_rates(&source).await.unwrap();
    let original = session.convert().unwrap();

    session.swap_currencies();
    session.load_rates(&source).await.unwrap();
    let swapped = session.convert().unwrap();
    assert!((swapped.rate - 1.0 / 0.92).abs() < 1e-9);

    session.swap_currencies();
    session.load_rates(&source).await.unwrap();
    let restored = session.convert().unwrap();

    assert_eq!(restored.base, original.base);
    assert_eq!(restored.quote, original.quote);
    assert!((restored.converted - original.converted).abs() < 0.01);
}

#[tokio::test]
async fn swap_invalidates_held_table() {
    let source = two_way_source();
    let mut session = ConverterSession::new(Currency::USD, Currency::EUR);
    session.load_rates(&source).await.unwrap();
    assert!(session.has_rates());

    session.swap_currencies();
    assert!(!session.has_rates());
    assert!(matches!(
        session.convert().unwrap_err(),
        RateWatchError::RateNotFound(_)
    ));
}

#[test]
fn superseded_load_is_discarded() {
    let mut session = ConverterSession::new(Currency::USD, Currency::EUR);

    let stale = session.begin_load();
    let fresh = session.begin_load();

    // The older load lands last but must not win.
    assert!(session.apply_rates(fresh, table(Currency::USD, &[("EUR", 0.95)])));
    assert!(!session.apply_rates(stale, table(Currency::USD, &[("EUR", 0.50)])));

    session.set_amount(100.0);
    let conversion = session.convert().unwrap();
    assert_eq!(conversion.rate, 0.95);
}

#[tokio::test]
async fn missing_target_rate_errors() {
    let source = StaticRateSource::new().with_rates(Currency::USD, &[("GBP", 0.79)]);
    let mut session = ConverterSession::new(Currency::USD, Currency::EUR);
    session.load_rates(&source).await.unwrap();

    let err = session.convert().unwrap_err();
    assert!(matches!(err, RateWatchError::RateNotFound(code) if code == "EUR"));
}

#[tokio::test]
async fn load_surfaces_source_failure() {
    let source = StaticRateSource::new()
        .with_rates(Currency::USD, &[("EUR", 0.92)])
        .fail_on_calls(&[0]);
    let mut session = ConverterSession::new(Currency::USD, Currency::EUR);

    let err = session.load_rates(&source).await.unwrap_err();
    assert!(matches!(err, RateWatchError::Network(_)));
    assert!(!session.has_rates());
}

#[tokio::test]
async fn weekly_report_computes_stats() {
    let source = two_way_source();
    let session = ConverterSession::new(Currency::USD, Currency::EUR);

    let report = session.weekly_report(&source).await.unwrap();
    let stats = report.stats.unwrap();

    assert_eq!(stats.sample_count, 7);
    assert_eq!(stats.max, 0.92);
    assert_eq!(stats.min, 0.92);
}

#[tokio::test]
async fn yearly_report_validates_year_and_computes_stats() {
    let source = two_way_source();
    let mut session = ConverterSession::new(Currency::USD, Currency::EUR);
    session.set_monthly_delay(Duration::ZERO);
    let mut rng = StdRng::seed_from_u64(42);

    let err = session.yearly_report(&source, 1901, &mut rng).await.unwrap_err();
    assert!(matches!(err, RateWatchError::InvalidData(_)));

    let report = session.yearly_report(&source, 2024, &mut rng).await.unwrap();
    let stats = report.stats.unwrap();

    assert_eq!(stats.sample_count, 12);
    assert!(stats.min <= stats.mean && stats.mean <= stats.max);
    // Jitter is bounded by ±2.5% of the base rate.
    assert!(stats.min >= 0.92 * 0.975 - 1e-6);
    assert!(stats.max <= 0.92 * 1.025 + 1e-6);
}
