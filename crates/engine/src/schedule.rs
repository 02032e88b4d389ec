//! Depreciation schedules and whole-year queries over them

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::method::DepreciationMethod;

/// One year of a depreciation schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// 1-indexed year of service
    pub year: u32,
    pub beginning_book_value: Decimal,
    pub depreciation_expense: Decimal,
    pub accumulated_depreciation: Decimal,
    pub ending_book_value: Decimal,
}

/// Engine output for one asset.
///
/// # Invariants
/// - `schedule.len() == useful_life`, years run 1..=useful_life
/// - each year begins at the previous year's ending book value
/// - the last entry ends exactly at `residual_value`
/// - `total_depreciation == initial_cost - residual_value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationResult {
    pub asset_id: String,
    pub asset_name: String,
    pub method: DepreciationMethod,
    pub initial_cost: Decimal,
    pub residual_value: Decimal,
    pub useful_life: u32,
    pub total_depreciation: Decimal,
    pub schedule: Vec<ScheduleEntry>,
}

/// Change in book value between two year-ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub asset_id: String,
    pub from_year: u32,
    pub to_year: u32,
    pub current_value: Decimal,
    pub projected_value: Decimal,
    pub depreciation_between: Decimal,
}

impl DepreciationResult {
    /// Entry for a 1-indexed year
    pub fn entry(&self, year: u32) -> Option<&ScheduleEntry> {
        let index = usize::try_from(year).ok()?.checked_sub(1)?;
        self.schedule.get(index)
    }

    /// Book value at the end of `years_in_service` whole years.
    ///
    /// Zero years returns the initial cost; anything past the useful life
    /// returns the residual value.
    pub fn book_value_after(&self, years_in_service: u32) -> Decimal {
        if years_in_service == 0 {
            return self.initial_cost;
        }
        self.entry(years_in_service.min(self.useful_life))
            .map(|e| e.ending_book_value)
            .unwrap_or(self.residual_value)
    }

    pub fn accumulated_after(&self, years_in_service: u32) -> Decimal {
        if years_in_service == 0 {
            return Decimal::ZERO;
        }
        self.entry(years_in_service.min(self.useful_life))
            .map(|e| e.accumulated_depreciation)
            .unwrap_or(self.total_depreciation)
    }

    pub fn remaining_life(&self, years_in_service: u32) -> u32 {
        self.useful_life.saturating_sub(years_in_service)
    }

    /// True once the book value has reached the residual value
    pub fn is_fully_depreciated(&self, years_in_service: u32) -> bool {
        self.book_value_after(years_in_service) <= self.residual_value
    }

    /// First year's expense; constant every year for straight-line
    pub fn annual_depreciation(&self) -> Decimal {
        self.schedule
            .first()
            .map(|e| e.depreciation_expense)
            .unwrap_or(Decimal::ZERO)
    }

    /// Project book value forward from one year-end to a later one
    pub fn project(&self, from_year: u32, to_year: u32) -> Result<Projection, EngineError> {
        if to_year <= from_year {
            return Err(EngineError::InvalidProjection {
                from: from_year,
                to: to_year,
            });
        }

        let current_value = self.book_value_after(from_year);
        let projected_value = self.book_value_after(to_year);

        Ok(Projection {
            asset_id: self.asset_id.clone(),
            from_year,
            to_year,
            current_value,
            projected_value,
            depreciation_between: current_value - projected_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(year: u32, begin: Decimal, expense: Decimal, acc: Decimal) -> ScheduleEntry {
        ScheduleEntry {
            year,
            beginning_book_value: begin,
            depreciation_expense: expense,
            accumulated_depreciation: acc,
            ending_book_value: begin - expense,
        }
    }

    /// 1000 cost, 100 residual, 3 years straight-line
    fn sample() -> DepreciationResult {
        DepreciationResult {
            asset_id: "asset-001".to_string(),
            asset_name: "Laptop".to_string(),
            method: DepreciationMethod::StraightLine,
            initial_cost: dec!(1000),
            residual_value: dec!(100),
            useful_life: 3,
            total_depreciation: dec!(900),
            schedule: vec![
                entry(1, dec!(1000), dec!(300), dec!(300)),
                entry(2, dec!(700), dec!(300), dec!(600)),
                entry(3, dec!(400), dec!(300), dec!(900)),
            ],
        }
    }

    #[test]
    fn test_entry_lookup() {
        let result = sample();
        assert_eq!(result.entry(2).unwrap().beginning_book_value, dec!(700));
        assert!(result.entry(0).is_none());
        assert!(result.entry(4).is_none());
    }

    #[test]
    fn test_book_value_after() {
        let result = sample();
        assert_eq!(result.book_value_after(0), dec!(1000));
        assert_eq!(result.book_value_after(1), dec!(700));
        assert_eq!(result.book_value_after(3), dec!(100));
        assert_eq!(result.book_value_after(40), dec!(100));
    }

    #[test]
    fn test_accumulated_after() {
        let result = sample();
        assert_eq!(result.accumulated_after(0), dec!(0));
        assert_eq!(result.accumulated_after(2), dec!(600));
        assert_eq!(result.accumulated_after(9), dec!(900));
    }

    #[test]
    fn test_remaining_life_and_fully_depreciated() {
        let result = sample();
        assert_eq!(result.remaining_life(1), 2);
        assert_eq!(result.remaining_life(5), 0);
        assert!(!result.is_fully_depreciated(2));
        assert!(result.is_fully_depreciated(3));
    }

    #[test]
    fn test_annual_depreciation() {
        assert_eq!(sample().annual_depreciation(), dec!(300));
    }

    #[test]
    fn test_project_forward() {
        let projection = sample().project(1, 3).unwrap();
        assert_eq!(projection.current_value, dec!(700));
        assert_eq!(projection.projected_value, dec!(100));
        assert_eq!(projection.depreciation_between, dec!(600));
    }

    #[test]
    fn test_project_must_move_forward() {
        let result = sample().project(2, 2);
        assert_eq!(result, Err(EngineError::InvalidProjection { from: 2, to: 2 }));
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["method"], "STRAIGHT_LINE");
        assert_eq!(value["usefulLife"], 3);
        assert_eq!(value["totalDepreciation"], "900");
        assert_eq!(value["schedule"][0]["beginningBookValue"], "1000");
        assert!(value["schedule"][0].get("accumulatedDepreciation").is_some());
    }
}
