//! Currency - Currency codes and their rounding precision
//!
//! The engine never converts between currencies. A currency is only used
//! to pick the number of decimal places every expense is rounded to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Minor units assumed for codes we do not know
pub const DEFAULT_MINOR_UNITS: u32 = 2;

/// Errors that can occur when parsing currencies
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("Empty currency code")]
    EmptyCode,

    #[error("Currency code too long (max 10 chars): {0}")]
    TooLong(String),

    #[error("Invalid currency code format: {0}")]
    InvalidFormat(String),
}

/// Currency codes
///
/// # Examples
/// ```
/// use assetbook_core::Currency;
///
/// let usd: Currency = "usd".parse().unwrap();
/// assert_eq!(usd, Currency::Usd);
/// assert_eq!(usd.minor_units(), 2);
///
/// let jpy = Currency::Jpy;
/// assert_eq!(jpy.minor_units(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    // === Fiat ===
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
    /// Swiss Franc
    Chf,
    /// Japanese Yen
    Jpy,
    /// Korean Won
    Krw,
    /// Vietnamese Dong
    Vnd,
    /// Kuwaiti Dinar
    Kwd,
    /// Bahraini Dinar
    Bhd,

    // === Crypto ===
    /// Bitcoin
    Btc,
    /// Tether USD
    Usdt,

    /// Any other code, rounded with `DEFAULT_MINOR_UNITS`
    Other(String),
}

impl Currency {
    /// Returns the currency code as a string slice
    pub fn code(&self) -> &str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Chf => "CHF",
            Currency::Jpy => "JPY",
            Currency::Krw => "KRW",
            Currency::Vnd => "VND",
            Currency::Kwd => "KWD",
            Currency::Bhd => "BHD",
            Currency::Btc => "BTC",
            Currency::Usdt => "USDT",
            Currency::Other(s) => s.as_str(),
        }
    }

    /// Number of decimal places of the smallest unit (ISO 4217 exponent)
    pub fn minor_units(&self) -> u32 {
        match self {
            Currency::Jpy | Currency::Krw | Currency::Vnd => 0,
            Currency::Usd | Currency::Eur | Currency::Gbp | Currency::Chf => 2,
            Currency::Kwd | Currency::Bhd => 3,
            Currency::Usdt => 6,
            Currency::Btc => 8,
            Currency::Other(_) => DEFAULT_MINOR_UNITS,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_uppercase();

        if s.is_empty() {
            return Err(CurrencyError::EmptyCode);
        }

        if s.len() > 10 {
            return Err(CurrencyError::TooLong(s));
        }

        if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CurrencyError::InvalidFormat(s));
        }

        Ok(match s.as_str() {
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            "GBP" => Currency::Gbp,
            "CHF" => Currency::Chf,
            "JPY" => Currency::Jpy,
            "KRW" => Currency::Krw,
            "VND" => Currency::Vnd,
            "KWD" => Currency::Kwd,
            "BHD" => Currency::Bhd,
            "BTC" => Currency::Btc,
            "USDT" => Currency::Usdt,
            _ => Currency::Other(s),
        })
    }
}

impl TryFrom<String> for Currency {
    type Error = CurrencyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Currency> for String {
    fn from(c: Currency) -> Self {
        c.code().to_string()
    }
}
