//! # ratewatch
//!
//! Currency conversion and exchange-rate reporting.
//!
//! ratewatch fetches current exchange rates from a public REST service,
//! converts amounts between currencies, synthesizes weekly and yearly rate
//! series, and computes descriptive statistics (max, min, mean, change,
//! volatility, trend) over them.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ratewatch::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let source = ExchangeRateApiSource::new()?;
//! let mut session = ConverterSession::new(Currency::USD, Currency::EUR);
//!
//! session.set_amount(100.0);
//! session.load_rates(&source).await?;
//! let conversion = session.convert()?;
//! println!("{:.2} {}", conversion.converted, conversion.quote);
//!
//! let report = session.weekly_report(&source).await?;
//! if let Some(stats) = &report.stats {
//!     println!("7-day trend: {}", stats.trend);
//! }
//! # Ok(())
//! # }
//! ```

pub mod chart;
pub mod currency;
pub mod error;
pub mod format;
pub mod rates;
pub mod series;
pub mod session;
pub mod stats;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::chart::{ChartData, ChartSlot, TermChart};
    pub use crate::currency::{flag_for_code, Currency, CurrencyPair};
    pub use crate::error::{RateWatchError, Result};
    pub use crate::rates::{ExchangeRateApiSource, RateSource, RateTable, StaticRateSource};
    pub use crate::series::{
        MonthlySeriesBuilder, Sample, Series, WeeklySeriesBuilder, MONTHLY_PERIODS, WEEKLY_PERIODS,
    };
    pub use crate::session::{Conversion, ConverterSession, Report};
    pub use crate::stats::{compute_stats, RateStats, Trend};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_lib_compile() {
        // Smoke test to ensure library compiles
    }
}
