//! Display formatting for conversions and statistics

use crate::currency::Currency;
use crate::stats::{RateStats, Trend};
use chrono::{DateTime, Utc};
use colored::Colorize;

/// Unit rate with 6 decimals
pub fn format_rate(rate: f64) -> String {
    format!("{:.6}", rate)
}

/// Monetary amount with 2 decimals
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Percentage with 2 decimals
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Signed change with a leading '+' for positive values, color-cued
pub fn format_change(change: f64, change_percent: f64) -> String {
    let sign = if change > 0.0 { "+" } else { "" };
    let text = format!("{}{:.6} ({:.2}%)", sign, change, change_percent);
    if change > 0.0 {
        text.green().to_string()
    } else if change < 0.0 {
        text.red().to_string()
    } else {
        text
    }
}

/// Trend with direction glyph and color cue
pub fn format_trend(trend: Trend) -> String {
    match trend {
        Trend::Rising => format!("📈 {}", "rising".green()),
        Trend::Falling => format!("📉 {}", "falling".red()),
        Trend::Stable => "➡️ stable".to_string(),
    }
}

/// Unit-rate line, e.g. `1 USD = 0.920000 EUR`
pub fn format_unit_rate(base: Currency, quote: Currency, rate: f64) -> String {
    format!("1 {} = {} {}", base.code(), format_rate(rate), quote.code())
}

/// Last-updated timestamp line
pub fn format_updated_at(fetched_at: DateTime<Utc>) -> String {
    format!("Updated: {}", fetched_at.format("%Y-%m-%d %H:%M:%S UTC"))
}

/// Multi-line statistics panel for a report
pub fn render_stats_panel(stats: &RateStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {} {}\n", "Max rate:".bold(), format_rate(stats.max)));
    out.push_str(&format!("  {} {}\n", "Min rate:".bold(), format_rate(stats.min)));
    out.push_str(&format!("  {} {}\n", "Average:".bold(), format_rate(stats.mean)));
    out.push_str(&format!(
        "  {} {}\n",
        "Change:".bold(),
        format_change(stats.change, stats.change_percent)
    ));
    out.push_str(&format!(
        "  {} {}\n",
        "Volatility:".bold(),
        format_percent(stats.volatility_percent)
    ));
    out.push_str(&format!("  {} {}\n", "Trend:".bold(), format_trend(stats.trend)));
    out.push_str(&format!("  {} {}\n", "Samples:".bold(), stats.sample_count));
    out
}
