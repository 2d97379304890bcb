//! Series synthesis: weekly and monthly rate sampling
//!
//! Both builders fail soft: a fetch failure for one period yields an absent
//! sample for that period only and the loop runs to completion. Requests are
//! awaited one at a time in period order, never fanned out.

use crate::currency::Currency;
use crate::error::{RateWatchError, Result};
use crate::rates::RateSource;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;

/// One rate observation for a period, or explicitly absent (never zero)
pub type Sample = Option<f64>;

/// Number of periods in a weekly series
pub const WEEKLY_PERIODS: usize = 7;
/// Number of periods in a monthly series
pub const MONTHLY_PERIODS: usize = 12;

/// Symmetric jitter bound for the synthetic monthly series, as a fraction
/// of the rate value.
const MONTHLY_JITTER_FRACTION: f64 = 0.025;
const DEFAULT_INTER_REQUEST_DELAY_MS: u64 = 200;
const SAMPLE_DECIMALS: u32 = 6;

/// Round to a fixed number of decimal places
pub(crate) fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Ordered sequence of samples, one per period label
#[derive(Debug, Clone)]
pub struct Series {
    label: String,
    period_labels: Vec<String>,
    samples: Vec<Sample>,
}

impl Series {
    /// Create a series; label and sample counts must match
    pub fn new(label: String, period_labels: Vec<String>, samples: Vec<Sample>) -> Result<Self> {
        if period_labels.len() != samples.len() {
            return Err(RateWatchError::InvalidData(format!(
                "series has {} labels but {} samples",
                period_labels.len(),
                samples.len()
            )));
        }
        Ok(Self {
            label,
            period_labels,
            samples,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn period_labels(&self) -> &[String] {
        &self.period_labels
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Total number of periods, absent or not
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of non-absent samples
    pub fn sample_count(&self) -> usize {
        self.samples.iter().flatten().count()
    }

    /// Non-absent samples in period order
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().flatten().copied().collect()
    }
}

type ProgressFn = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Builds a 7-day series, oldest day first
///
/// The rate service has no dated endpoint, so every day samples the current
/// rate. This is a known approximation, not genuine history.
pub struct WeeklySeriesBuilder {
    base: Currency,
    target: Currency,
    on_progress: Option<ProgressFn>,
}

impl WeeklySeriesBuilder {
    pub fn new(base: Currency, target: Currency) -> Self {
        Self {
            base,
            target,
            on_progress: None,
        }
    }

    /// Report `(periods_done, periods_total)` after each period
    pub fn on_progress(mut self, f: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    pub async fn build<S: RateSource>(&self, source: &S) -> Result<Series> {
        let today = Utc::now().date_naive();
        let mut labels = Vec::with_capacity(WEEKLY_PERIODS);
        let mut samples = Vec::with_capacity(WEEKLY_PERIODS);

        for offset in (0..WEEKLY_PERIODS).rev() {
            let date = today - ChronoDuration::days(offset as i64);
            labels.push(date.format("%b %d").to_string());

            let sample = match source.fetch_rates(self.base).await {
                Ok(table) => table
                    .rate(self.target.code())
                    .map(|rate| round_to(rate, SAMPLE_DECIMALS)),
                Err(e) => {
                    log::warn!("weekly fetch for {} failed: {}", date, e);
                    None
                }
            };
            samples.push(sample);

            if let Some(callback) = &self.on_progress {
                callback(WEEKLY_PERIODS - offset, WEEKLY_PERIODS);
            }
        }

        Series::new(
            format!("{} → {}", self.base, self.target),
            labels,
            samples,
        )
    }
}

/// Builds a 12-month series for a selected year, January first
///
/// The service only reports current rates, so each month samples the current
/// rate and perturbs it with uniform jitter of up to ±2.5%. The RNG is
/// supplied by the caller so tests can seed it. A small delay between
/// iterations keeps the outbound call rate down.
pub struct MonthlySeriesBuilder {
    base: Currency,
    target: Currency,
    year: i32,
    delay: Duration,
    on_progress: Option<ProgressFn>,
}

impl MonthlySeriesBuilder {
    pub fn new(base: Currency, target: Currency, year: i32) -> Self {
        Self {
            base,
            target,
            year,
            delay: Duration::from_millis(DEFAULT_INTER_REQUEST_DELAY_MS),
            on_progress: None,
        }
    }

    /// Override the inter-request delay (tests pass `Duration::ZERO`)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Report `(periods_done, periods_total)` after each period
    pub fn on_progress(mut self, f: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    pub async fn build<S: RateSource>(&self, source: &S, rng: &mut StdRng) -> Result<Series> {
        let mut labels = Vec::with_capacity(MONTHLY_PERIODS);
        let mut samples = Vec::with_capacity(MONTHLY_PERIODS);

        for month in 1..=MONTHLY_PERIODS as u32 {
            let date = NaiveDate::from_ymd_opt(self.year, month, 15).ok_or_else(|| {
                RateWatchError::InvalidData(format!("invalid report month {}-{}", self.year, month))
            })?;
            labels.push(date.format("%b").to_string());

            let sample = match source.fetch_rates(self.base).await {
                Ok(table) => table.rate(self.target.code()).map(|rate| {
                    let jitter =
                        rng.gen_range(-MONTHLY_JITTER_FRACTION..=MONTHLY_JITTER_FRACTION) * rate;
                    round_to(rate + jitter, SAMPLE_DECIMALS)
                }),
                Err(e) => {
                    log::warn!("monthly fetch for {} failed: {}", date.format("%Y-%m"), e);
                    None
                }
            };
            samples.push(sample);

            if let Some(callback) = &self.on_progress {
                callback(month as usize, MONTHLY_PERIODS);
            }

            if month < MONTHLY_PERIODS as u32 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        Series::new(
            format!("{} → {} ({})", self.base, self.target, self.year),
            labels,
            samples,
        )
    }
}
