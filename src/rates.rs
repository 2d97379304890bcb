//! Rate source adapter and rate table snapshots
//!
//! A [`RateTable`] is a wholesale snapshot of rates for one base currency;
//! every fetch replaces the previous table, there are no merge semantics.
//! Sources implement [`RateSource`]: a single fetch per call, no retry and
//! no caching, so the caller decides whether to surface or swallow failures.

use crate::currency::Currency;
use crate::error::{RateWatchError, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const EXCHANGE_RATE_API_BASE_URL: &str = "https://api.exchangerate-api.com/v4/latest";

/// Snapshot mapping of currency code to rate, scoped to one base currency
#[derive(Debug, Clone)]
pub struct RateTable {
    base: Currency,
    rates: HashMap<String, f64>,
    fetched_at: DateTime<Utc>,
}

impl RateTable {
    /// Build a table from raw rates; non-finite and non-positive entries
    /// are dropped.
    pub fn new(base: Currency, rates: HashMap<String, f64>, fetched_at: DateTime<Utc>) -> Self {
        let rates = rates
            .into_iter()
            .filter(|(_, rate)| rate.is_finite() && *rate > 0.0)
            .collect();
        Self {
            base,
            rates,
            fetched_at,
        }
    }

    /// Base currency this snapshot is scoped to
    pub fn base(&self) -> Currency {
        self.base
    }

    /// When the snapshot was fetched
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Rate for an arbitrary currency code, if present
    pub fn rate(&self, code: &str) -> Option<f64> {
        if code == self.base.code() {
            return Some(1.0);
        }
        self.rates.get(code).copied()
    }

    /// Rate for a known currency; errors when the service did not report it
    pub fn rate_for(&self, currency: Currency) -> Result<f64> {
        self.rate(currency.code())
            .ok_or_else(|| RateWatchError::RateNotFound(currency.code().to_string()))
    }

    /// Convert an amount from the base currency to `to`
    pub fn convert(&self, amount: f64, to: Currency) -> Result<f64> {
        let rate = self.rate_for(to)?;
        Ok(amount * rate)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Trait for exchange-rate sources
pub trait RateSource: Send + Sync {
    /// Fetch the current rate table for a base currency
    fn fetch_rates(
        &self,
        base: Currency,
    ) -> impl std::future::Future<Output = Result<RateTable>> + Send;

    /// Get the source name
    fn name(&self) -> &str;
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    base: Option<String>,
    rates: HashMap<String, f64>,
}

/// exchangerate-api.com source (no API key required)
pub struct ExchangeRateApiSource {
    client: Client,
    base_url: String,
}

impl ExchangeRateApiSource {
    /// Create a new source against the public endpoint
    pub fn new() -> Result<Self> {
        Self::with_base_url(EXCHANGE_RATE_API_BASE_URL)
    }

    /// Create a source against a custom endpoint (used by tests)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                RateWatchError::Network(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl RateSource for ExchangeRateApiSource {
    async fn fetch_rates(&self, base: Currency) -> Result<RateTable> {
        let url = format!("{}/{}", self.base_url, base.code());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RateWatchError::Network(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(RateWatchError::BadResponse(format!(
                "rate service returned status {}",
                response.status()
            )));
        }

        let body: LatestRatesResponse = response
            .json()
            .await
            .map_err(|e| RateWatchError::BadResponse(format!("JSON parse error: {}", e)))?;

        if let Some(reported) = &body.base {
            if reported != base.code() {
                log::warn!(
                    "rate service reported base {} for a {} request",
                    reported,
                    base.code()
                );
            }
        }

        Ok(RateTable::new(base, body.rates, Utc::now()))
    }

    fn name(&self) -> &str {
        "exchangerate-api"
    }
}

/// In-memory rate source for tests and offline demos
///
/// Holds one rate table per base currency and can be scripted to fail on
/// specific call indices to exercise soft-fail paths.
pub struct StaticRateSource {
    tables: HashMap<Currency, HashMap<String, f64>>,
    fail_on: HashSet<usize>,
    calls: AtomicUsize,
}

impl StaticRateSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            fail_on: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Add a rate table for a base currency
    pub fn with_rates(mut self, base: Currency, rates: &[(&str, f64)]) -> Self {
        let table = rates
            .iter()
            .map(|(code, rate)| (code.to_string(), *rate))
            .collect();
        self.tables.insert(base, table);
        self
    }

    /// Script transport failures for the given zero-based call indices
    pub fn fail_on_calls(mut self, calls: &[usize]) -> Self {
        self.fail_on.extend(calls.iter().copied());
        self
    }

    /// Number of fetches made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for StaticRateSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RateSource for StaticRateSource {
    async fn fetch_rates(&self, base: Currency) -> Result<RateTable> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&call) {
            return Err(RateWatchError::Network(format!(
                "scripted failure on call {}",
                call
            )));
        }

        let rates = self.tables.get(&base).ok_or_else(|| {
            RateWatchError::BadResponse(format!("no rates configured for base {}", base))
        })?;

        Ok(RateTable::new(base, rates.clone(), Utc::now()))
    }

    fn name(&self) -> &str {
        "static"
    }
}
