//! Currency types and pair handling

use crate::error::{RateWatchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency enumeration (ISO 4217 codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen
    JPY,
    /// Swiss Franc
    CHF,
    /// Canadian Dollar
    CAD,
    /// Australian Dollar
    AUD,
    /// Chinese Yuan
    CNY,
    /// Hong Kong Dollar
    HKD,
    /// Singapore Dollar
    SGD,
    /// Russian Ruble
    RUB,
    /// Kyrgyzstani Som
    KGS,
}

impl Currency {
    /// Get ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::CNY => "CNY",
            Currency::HKD => "HKD",
            Currency::SGD => "SGD",
            Currency::RUB => "RUB",
            Currency::KGS => "KGS",
        }
    }

    /// Get currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::CHF => "CHF",
            Currency::CAD => "C$",
            Currency::AUD => "A$",
            Currency::CNY => "¥",
            Currency::HKD => "HK$",
            Currency::SGD => "S$",
            Currency::RUB => "₽",
            Currency::KGS => "с",
        }
    }

    /// Get flag glyph for display
    pub fn flag(&self) -> &'static str {
        flag_for_code(self.code())
    }

    /// Parse from ISO code
    pub fn from_code(code: &str) -> Result<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "CHF" => Ok(Currency::CHF),
            "CAD" => Ok(Currency::CAD),
            "AUD" => Ok(Currency::AUD),
            "CNY" => Ok(Currency::CNY),
            "HKD" => Ok(Currency::HKD),
            "SGD" => Ok(Currency::SGD),
            "RUB" => Ok(Currency::RUB),
            "KGS" => Ok(Currency::KGS),
            _ => Err(RateWatchError::InvalidData(format!(
                "Unknown currency: {}",
                code
            ))),
        }
    }

    /// Get all supported currencies
    pub fn all() -> Vec<Currency> {
        vec![
            Currency::USD,
            Currency::EUR,
            Currency::GBP,
            Currency::JPY,
            Currency::CHF,
            Currency::CAD,
            Currency::AUD,
            Currency::CNY,
            Currency::HKD,
            Currency::SGD,
            Currency::RUB,
            Currency::KGS,
        ]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Flag glyph for an arbitrary currency code; unknown codes map to a
/// generic placeholder.
pub fn flag_for_code(code: &str) -> &'static str {
    match code.to_uppercase().as_str() {
        "USD" => "🇺🇸",
        "EUR" => "🇪🇺",
        "GBP" => "🇬🇧",
        "JPY" => "🇯🇵",
        "CHF" => "🇨🇭",
        "CAD" => "🇨🇦",
        "AUD" => "🇦🇺",
        "CNY" => "🇨🇳",
        "HKD" => "🇭🇰",
        "SGD" => "🇸🇬",
        "RUB" => "🇷🇺",
        "KGS" => "🇰🇬",
        _ => "💱",
    }
}

/// Currency pair: amounts convert from `base` to `quote`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    /// Create new currency pair
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// Get the inverse pair
    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote,
            quote: self.base,
        }
    }

    /// Parse from string (e.g., "EUR/USD" or "EURUSD")
    pub fn from_string(s: &str) -> Result<Self> {
        if s.contains('/') {
            let parts: Vec<&str> = s.split('/').collect();
            if parts.len() != 2 {
                return Err(RateWatchError::InvalidData(format!(
                    "Invalid currency pair format: {}",
                    s
                )));
            }
            Ok(Self {
                base: Currency::from_code(parts[0])?,
                quote: Currency::from_code(parts[1])?,
            })
        } else if s.len() == 6 {
            // Format: EURUSD (3 chars each)
            Ok(Self {
                base: Currency::from_code(&s[0..3])?,
                quote: Currency::from_code(&s[3..6])?,
            })
        } else {
            Err(RateWatchError::InvalidData(format!(
                "Invalid currency pair format: {}",
                s
            )))
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
