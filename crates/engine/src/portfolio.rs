//! Portfolio totals across many computed schedules

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::schedule::DepreciationResult;

/// A computed schedule together with how long the asset has been in service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub result: DepreciationResult,
    pub years_in_service: u32,
}

impl Holding {
    pub fn new(result: DepreciationResult, years_in_service: u32) -> Self {
        Self {
            result,
            years_in_service,
        }
    }

    pub fn book_value(&self) -> Decimal {
        self.result.book_value_after(self.years_in_service)
    }

    pub fn remaining_life(&self) -> u32 {
        self.result.remaining_life(self.years_in_service)
    }

    pub fn is_fully_depreciated(&self) -> bool {
        self.result.is_fully_depreciated(self.years_in_service)
    }
}

/// Aggregate view of a set of holdings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_assets: usize,
    pub total_cost: Decimal,
    pub total_book_value: Decimal,
    pub total_depreciation: Decimal,
    pub fully_depreciated_assets: usize,
    /// Mean years in service, rounded to 2 places
    pub average_age: Decimal,
}

impl PortfolioSummary {
    /// Totals across holdings. Fails with `PortfolioOverflow` when a sum
    /// leaves the decimal range.
    pub fn from_holdings(holdings: &[Holding]) -> Result<Self, EngineError> {
        if holdings.is_empty() {
            return Ok(Self::default());
        }

        let total_cost = checked_total(holdings.iter().map(|h| h.result.initial_cost))?;
        let total_book_value = checked_total(holdings.iter().map(Holding::book_value))?;
        let total_years: u64 = holdings.iter().map(|h| u64::from(h.years_in_service)).sum();
        let average_age = (Decimal::from(total_years) / Decimal::from(holdings.len()))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        Ok(Self {
            total_assets: holdings.len(),
            total_cost,
            total_book_value,
            total_depreciation: total_cost - total_book_value,
            fully_depreciated_assets: holdings.iter().filter(|h| h.is_fully_depreciated()).count(),
            average_age,
        })
    }
}

fn checked_total(mut values: impl Iterator<Item = Decimal>) -> Result<Decimal, EngineError> {
    values.try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v).ok_or(EngineError::PortfolioOverflow)
    })
}

/// Holdings with at most `threshold_years` of life left, excluding those
/// already at the end of their useful life
pub fn nearing_end_of_life(holdings: &[Holding], threshold_years: u32) -> Vec<&Holding> {
    holdings
        .iter()
        .filter(|h| {
            let remaining = h.remaining_life();
            remaining > 0 && remaining <= threshold_years
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calculate;
    use crate::method::DepreciationMethod;
    use crate::request::DepreciationRequest;
    use rust_decimal_macros::dec;

    fn holding(id: &str, cost: Decimal, residual: Decimal, life: u32, years: u32) -> Holding {
        let request = DepreciationRequest::new(
            id,
            id,
            cost,
            residual,
            life,
            DepreciationMethod::StraightLine,
        );
        Holding::new(calculate(&request).unwrap(), years)
    }

    #[test]
    fn test_empty_portfolio() {
        let summary = PortfolioSummary::from_holdings(&[]).unwrap();
        assert_eq!(summary, PortfolioSummary::default());
        assert_eq!(summary.total_assets, 0);
    }

    #[test]
    fn test_summary_totals() {
        let holdings = vec![
            // 1000 -> 100 over 3 years, 1 year in: book 700
            holding("a", dec!(1000), dec!(100), 3, 1),
            // 500 -> 0 over 2 years, 5 years in: fully depreciated
            holding("b", dec!(500), dec!(0), 2, 5),
            // 2000 -> 200 over 10 years, new
            holding("c", dec!(2000), dec!(200), 10, 0),
        ];

        let summary = PortfolioSummary::from_holdings(&holdings).unwrap();
        assert_eq!(summary.total_assets, 3);
        assert_eq!(summary.total_cost, dec!(3500));
        assert_eq!(summary.total_book_value, dec!(2700));
        assert_eq!(summary.total_depreciation, dec!(800));
        assert_eq!(summary.fully_depreciated_assets, 1);
        assert_eq!(summary.average_age, dec!(2));
    }

    #[test]
    fn test_average_age_rounding() {
        let holdings = vec![
            holding("a", dec!(100), dec!(0), 5, 1),
            holding("b", dec!(100), dec!(0), 5, 1),
            holding("c", dec!(100), dec!(0), 5, 2),
        ];
        assert_eq!(
            PortfolioSummary::from_holdings(&holdings).unwrap().average_age,
            dec!(1.33)
        );
    }

    #[test]
    fn test_totals_past_decimal_range_fail() {
        // Each asset is valid on its own; together they exceed Decimal::MAX
        let cost = Decimal::from_i128_with_scale(5 * 10_i128.pow(28), 0);
        let holdings = vec![
            holding("a", cost, dec!(0), 2, 0),
            holding("b", cost, dec!(0), 2, 1),
        ];

        assert_eq!(
            PortfolioSummary::from_holdings(&holdings),
            Err(EngineError::PortfolioOverflow)
        );
    }

    #[test]
    fn test_nearing_end_of_life() {
        let holdings = vec![
            holding("done", dec!(100), dec!(0), 3, 3),
            holding("one-left", dec!(100), dec!(0), 3, 2),
            holding("two-left", dec!(100), dec!(0), 5, 3),
            holding("fresh", dec!(100), dec!(0), 10, 0),
        ];

        let ids: Vec<&str> = nearing_end_of_life(&holdings, 2)
            .iter()
            .map(|h| h.result.asset_id.as_str())
            .collect();
        assert_eq!(ids, vec!["one-left", "two-left"]);
    }
}
