//! Descriptive statistics over a rate series
//!
//! [`compute_stats`] is a pure function of its input: no hidden state, and
//! deterministic given deterministic input. An all-absent series is a defined
//! empty state (`Ok(None)`), not an error; a zero baseline or zero mean is an
//! error, never a silent NaN or infinity.

use crate::error::{RateWatchError, Result};
use crate::series::{round_to, Series};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Samples on each edge used for trend classification. Shorter series use
/// all available samples on both edges instead.
const TREND_WINDOW: usize = 3;

/// Coarse direction of a series, comparing early vs late window averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Rising => "rising",
            Trend::Falling => "falling",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable statistics snapshot over the non-absent samples of a series
///
/// Recomputed from scratch on every refresh; never merged with a prior
/// snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateStats {
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    /// Last sample minus first sample
    pub change: f64,
    /// Change relative to the first sample, rounded to 2 decimals
    pub change_percent: f64,
    /// Population standard deviation as a percentage of the mean,
    /// rounded to 2 decimals
    pub volatility_percent: f64,
    pub trend: Trend,
    pub sample_count: usize,
}

/// Compute statistics over the non-absent samples of `series`
///
/// Returns `Ok(None)` when no valid samples remain; the caller must leave
/// any previously displayed values untouched in that case.
pub fn compute_stats(series: &Series) -> Result<Option<RateStats>> {
    let values = series.values();
    if values.is_empty() {
        return Ok(None);
    }

    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    let first = values[0];
    let last = values[values.len() - 1];
    if first == 0.0 {
        return Err(RateWatchError::DivisionByZero(
            "first sample is zero, cannot compute percent change".to_string(),
        ));
    }
    let change = last - first;
    let change_percent = round_to(change / first * 100.0, 2);

    if mean == 0.0 {
        return Err(RateWatchError::DivisionByZero(
            "mean is zero, cannot compute volatility".to_string(),
        ));
    }
    // Population variance: divisor is the count, not count - 1.
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    let volatility_percent = round_to(variance.sqrt() / mean * 100.0, 2);

    let window = TREND_WINDOW.min(values.len());
    let start_avg = values[..window].iter().sum::<f64>() / window as f64;
    let end_avg = values[values.len() - window..].iter().sum::<f64>() / window as f64;
    let trend = if end_avg > start_avg {
        Trend::Rising
    } else if end_avg < start_avg {
        Trend::Falling
    } else {
        Trend::Stable
    };

    Ok(Some(RateStats {
        max,
        min,
        mean,
        change,
        change_percent,
        volatility_percent,
        trend,
        sample_count: values.len(),
    }))
}
