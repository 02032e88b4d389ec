//! Depreciation methods and their per-year formulas
//!
//! Each strategy only knows how to compute the raw expense for a year.
//! Rounding, clipping at the residual value and the final-year plug are
//! shared and live in the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::ConfigError;

/// Accounting method used to spread cost over useful life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepreciationMethod {
    /// Equal expense every year
    StraightLine,

    /// Fixed caller-supplied rate applied to the remaining book value
    DecliningBalance,

    /// Rate of `2 / usefulLife` applied to the remaining book value
    DoubleDecliningBalance,

    /// Expense weighted by remaining life over the sum of the years' digits
    SumOfYearsDigits,
}

impl DepreciationMethod {
    pub const ALL: [DepreciationMethod; 4] = [
        DepreciationMethod::StraightLine,
        DepreciationMethod::DecliningBalance,
        DepreciationMethod::DoubleDecliningBalance,
        DepreciationMethod::SumOfYearsDigits,
    ];

    /// Parse a method token leniently.
    ///
    /// Accepts `STRAIGHT_LINE`, `straight_line` and `straight-line`.
    pub fn parse_token(token: &str) -> Result<Self, ConfigError> {
        let normalized = token.trim().replace('-', "_").to_uppercase();
        normalized
            .parse()
            .map_err(|_| ConfigError::UnknownMethod(token.to_string()))
    }

    /// True only for the method that takes a caller-supplied rate
    pub fn requires_rate(&self) -> bool {
        matches!(self, DepreciationMethod::DecliningBalance)
    }

    /// True for methods that charge more in early years
    pub fn is_accelerated(&self) -> bool {
        !matches!(self, DepreciationMethod::StraightLine)
    }
}

/// Raw expense formula selected once per calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strategy {
    StraightLine {
        annual: Decimal,
    },
    DecliningBalance {
        rate: Decimal,
    },
    SumOfYearsDigits {
        depreciable: Decimal,
        life: u32,
        digits_sum: Decimal,
    },
}

impl Strategy {
    /// Pick the formula for a method.
    ///
    /// `rate` is only read for `DecliningBalance`; validation guarantees it
    /// is present and within (0, 1] for that method.
    pub(crate) fn select(
        method: DepreciationMethod,
        depreciable: Decimal,
        life: u32,
        rate: Option<Decimal>,
    ) -> Self {
        let years = Decimal::from(life);
        match method {
            DepreciationMethod::StraightLine => Strategy::StraightLine {
                annual: depreciable / years,
            },
            DepreciationMethod::DecliningBalance => Strategy::DecliningBalance {
                rate: rate.unwrap_or(Decimal::ZERO),
            },
            DepreciationMethod::DoubleDecliningBalance => Strategy::DecliningBalance {
                rate: Decimal::TWO / years,
            },
            DepreciationMethod::SumOfYearsDigits => {
                let n = u64::from(life);
                Strategy::SumOfYearsDigits {
                    depreciable,
                    life,
                    digits_sum: Decimal::from(n * (n + 1) / 2),
                }
            }
        }
    }

    /// Unrounded expense for a 1-indexed year. None on decimal overflow.
    pub(crate) fn raw_expense(&self, year: u32, beginning: Decimal) -> Option<Decimal> {
        match *self {
            Strategy::StraightLine { annual } => Some(annual),
            Strategy::DecliningBalance { rate } => beginning.checked_mul(rate),
            Strategy::SumOfYearsDigits {
                depreciable,
                life,
                digits_sum,
            } => {
                let remaining = Decimal::from(life.saturating_sub(year) + 1);
                // Multiply first for exactness; divide first near Decimal::MAX
                remaining
                    .checked_mul(depreciable)
                    .and_then(|product| product.checked_div(digits_sum))
                    .or_else(|| depreciable.checked_div(digits_sum)?.checked_mul(remaining))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_token_roundtrip() {
        for method in DepreciationMethod::ALL {
            let token = method.to_string();
            assert_eq!(DepreciationMethod::parse_token(&token).unwrap(), method);
        }
        assert_eq!(
            DepreciationMethod::SumOfYearsDigits.to_string(),
            "SUM_OF_YEARS_DIGITS"
        );
    }

    #[test]
    fn test_parse_token_lenient() {
        assert_eq!(
            DepreciationMethod::parse_token("straight-line").unwrap(),
            DepreciationMethod::StraightLine
        );
        assert_eq!(
            DepreciationMethod::parse_token(" double_declining_balance ").unwrap(),
            DepreciationMethod::DoubleDecliningBalance
        );
    }

    #[test]
    fn test_parse_token_unknown() {
        let result = DepreciationMethod::parse_token("UNITS_OF_PRODUCTION");
        assert_eq!(
            result,
            Err(ConfigError::UnknownMethod("UNITS_OF_PRODUCTION".to_string()))
        );
    }

    #[test]
    fn test_serde_tokens() {
        let json = serde_json::to_string(&DepreciationMethod::DecliningBalance).unwrap();
        assert_eq!(json, "\"DECLINING_BALANCE\"");

        let bad: Result<DepreciationMethod, _> = serde_json::from_str("\"LINEAR\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_requires_rate() {
        assert!(DepreciationMethod::DecliningBalance.requires_rate());
        assert!(!DepreciationMethod::DoubleDecliningBalance.requires_rate());
        assert!(!DepreciationMethod::StraightLine.requires_rate());
    }

    #[test]
    fn test_accelerated_methods() {
        let accelerated: Vec<_> = DepreciationMethod::ALL
            .into_iter()
            .filter(DepreciationMethod::is_accelerated)
            .collect();
        assert_eq!(accelerated.len(), 3);
        assert!(!accelerated.contains(&DepreciationMethod::StraightLine));
    }

    #[test]
    fn test_straight_line_constant() {
        let s = Strategy::select(DepreciationMethod::StraightLine, dec!(9000), 5, None);
        assert_eq!(s.raw_expense(1, dec!(10000)), Some(dec!(1800)));
        assert_eq!(s.raw_expense(4, dec!(4600)), Some(dec!(1800)));
    }

    #[test]
    fn test_double_declining_rate() {
        let s = Strategy::select(
            DepreciationMethod::DoubleDecliningBalance,
            dec!(9000),
            5,
            None,
        );
        assert_eq!(s, Strategy::DecliningBalance { rate: dec!(0.4) });
        assert_eq!(s.raw_expense(2, dec!(6000)), Some(dec!(2400)));
    }

    #[test]
    fn test_sum_of_years_digits_weights() {
        // S = 15 for a 5-year life
        let s = Strategy::select(DepreciationMethod::SumOfYearsDigits, dec!(15000), 5, None);
        assert_eq!(s.raw_expense(1, dec!(0)), Some(dec!(5000)));
        assert_eq!(s.raw_expense(3, dec!(0)), Some(dec!(3000)));
        assert_eq!(s.raw_expense(5, dec!(0)), Some(dec!(1000)));
    }

    #[test]
    fn test_sum_of_years_digits_large_cost() {
        // 3 * 3e28 overflows, 3e28 / 6 * 3 does not
        let cost = Decimal::from_i128_with_scale(3 * 10_i128.pow(28), 0);
        let s = Strategy::select(DepreciationMethod::SumOfYearsDigits, cost, 3, None);
        assert_eq!(
            s.raw_expense(1, cost),
            Some(Decimal::from_i128_with_scale(15 * 10_i128.pow(27), 0))
        );
    }

    #[test]
    fn test_declining_balance_overflow_is_reported() {
        let s = Strategy::DecliningBalance { rate: dec!(2) };
        assert_eq!(s.raw_expense(1, Decimal::MAX), None);
    }
}
