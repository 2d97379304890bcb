//! Converter session: owns the selected pair, amount, rate snapshot, and
//! load sequencing
//!
//! All state that the display depends on lives here, not in free-floating
//! globals. Overlapping loads are serialized by a generation counter: a load
//! that has been superseded by a newer one is discarded when it lands.

use crate::currency::{Currency, CurrencyPair};
use crate::error::{RateWatchError, Result};
use crate::rates::{RateSource, RateTable};
use crate::series::{MonthlySeriesBuilder, Series, WeeklySeriesBuilder};
use crate::stats::{compute_stats, RateStats};
use chrono::{DateTime, Datelike, Utc};
use rand::rngs::StdRng;
use std::time::Duration;

/// Earliest year the yearly report accepts
pub const MIN_REPORT_YEAR: i32 = 1999;

const DEFAULT_MONTHLY_DELAY_MS: u64 = 200;

/// Result of one conversion against the held rate snapshot
#[derive(Debug, Clone)]
pub struct Conversion {
    pub amount: f64,
    pub converted: f64,
    pub rate: f64,
    pub base: Currency,
    pub quote: Currency,
    pub fetched_at: DateTime<Utc>,
}

/// A synthesized series together with its statistics
///
/// `stats` is `None` when the series had no valid samples; the caller keeps
/// whatever it was showing before.
#[derive(Debug, Clone)]
pub struct Report {
    pub series: Series,
    pub stats: Option<RateStats>,
}

/// Owns conversion state for one user session
pub struct ConverterSession {
    pair: CurrencyPair,
    amount: f64,
    table: Option<RateTable>,
    generation: u64,
    monthly_delay: Duration,
}

impl ConverterSession {
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self {
            pair: CurrencyPair::new(base, quote),
            amount: 0.0,
            table: None,
            generation: 0,
            monthly_delay: Duration::from_millis(DEFAULT_MONTHLY_DELAY_MS),
        }
    }

    pub fn pair(&self) -> CurrencyPair {
        self.pair
    }

    pub fn base(&self) -> Currency {
        self.pair.base
    }

    pub fn quote(&self) -> Currency {
        self.pair.quote
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Set the amount to convert; negative input clamps to 0
    pub fn set_amount(&mut self, amount: f64) {
        self.amount = amount.max(0.0);
    }

    pub fn has_rates(&self) -> bool {
        self.table.is_some()
    }

    /// Override the inter-request delay used by the yearly report
    pub fn set_monthly_delay(&mut self, delay: Duration) {
        self.monthly_delay = delay;
    }

    /// Start a new load, superseding any load still in flight
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Install a fetched table unless a newer load has started since;
    /// returns whether the table was applied
    pub fn apply_rates(&mut self, generation: u64, table: RateTable) -> bool {
        if generation != self.generation {
            log::debug!(
                "discarding superseded rate load (generation {} < {})",
                generation,
                self.generation
            );
            return false;
        }
        self.table = Some(table);
        true
    }

    /// Fetch and install the rate table for the current base currency
    pub async fn load_rates<S: RateSource>(&mut self, source: &S) -> Result<bool> {
        let generation = self.begin_load();
        let table = source.fetch_rates(self.pair.base).await?;
        Ok(self.apply_rates(generation, table))
    }

    /// Convert the session amount using the held snapshot
    pub fn convert(&self) -> Result<Conversion> {
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| RateWatchError::RateNotFound(self.pair.quote.code().to_string()))?;
        let rate = table.rate_for(self.pair.quote)?;

        Ok(Conversion {
            amount: self.amount,
            converted: self.amount * rate,
            rate,
            base: self.pair.base,
            quote: self.pair.quote,
            fetched_at: table.fetched_at(),
        })
    }

    /// Swap base and quote. The held table is scoped to the old base, so it
    /// is dropped and a reload is required before the next conversion.
    pub fn swap_currencies(&mut self) {
        self.pair = self.pair.inverse();
        self.table = None;
    }

    /// Builder for the 7-day series of the current pair
    pub fn weekly_series(&self) -> WeeklySeriesBuilder {
        WeeklySeriesBuilder::new(self.pair.base, self.pair.quote)
    }

    /// Builder for the 12-month series of the current pair
    pub fn monthly_series(&self, year: i32) -> Result<MonthlySeriesBuilder> {
        validate_year(year)?;
        Ok(
            MonthlySeriesBuilder::new(self.pair.base, self.pair.quote, year)
                .with_delay(self.monthly_delay),
        )
    }

    /// Synthesize the 7-day series and compute its statistics
    pub async fn weekly_report<S: RateSource>(&self, source: &S) -> Result<Report> {
        let series = self.weekly_series().build(source).await?;
        let stats = compute_stats(&series)?;
        Ok(Report { series, stats })
    }

    /// Synthesize the 12-month series for `year` and compute its statistics
    pub async fn yearly_report<S: RateSource>(
        &self,
        source: &S,
        year: i32,
        rng: &mut StdRng,
    ) -> Result<Report> {
        let series = self.monthly_series(year)?.build(source, rng).await?;
        let stats = compute_stats(&series)?;
        Ok(Report { series, stats })
    }
}

/// Validate a report year: four digits, not in the future
pub fn validate_year(year: i32) -> Result<()> {
    let current = Utc::now().year();
    if year < MIN_REPORT_YEAR || year > current {
        return Err(RateWatchError::InvalidData(format!(
            "report year must be between {} and {}, got {}",
            MIN_REPORT_YEAR, current, year
        )));
    }
    Ok(())
}
