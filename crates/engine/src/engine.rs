//! Depreciation Engine - request in, schedule out
//!
//! The engine is stateless apart from its configuration. It can be shared
//! across threads and called concurrently; identical requests always
//! produce identical schedules.

use assetbook_core::Amount;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::method::Strategy;
use crate::request::{DepreciationRequest, ValidatedRequest};
use crate::schedule::{DepreciationResult, ScheduleEntry};

/// Builds depreciation schedules under a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct DepreciationEngine {
    config: EngineConfig,
}

impl DepreciationEngine {
    /// Create an engine, rejecting invalid configuration up front
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run only the preconditions
    pub fn validate(&self, request: &DepreciationRequest) -> Result<(), EngineError> {
        request.validate(&self.config)?;
        Ok(())
    }

    /// Produce the full schedule for a request.
    ///
    /// Validation is total: on any violation nothing is computed.
    pub fn calculate(&self, request: &DepreciationRequest) -> Result<DepreciationResult, EngineError> {
        let validated = request.validate(&self.config)?;

        debug!(
            asset_id = %request.asset_id,
            method = %validated.method,
            useful_life = validated.useful_life,
            precision = self.config.precision,
            "Calculating depreciation schedule"
        );

        let schedule = self.build_schedule(&request.asset_id, &validated)?;
        let total_depreciation = schedule
            .last()
            .map(|e| e.accumulated_depreciation)
            .unwrap_or_default();

        debug!(
            asset_id = %request.asset_id,
            %total_depreciation,
            "Depreciation schedule complete"
        );

        Ok(DepreciationResult {
            asset_id: request.asset_id.clone(),
            asset_name: request.asset_name.clone(),
            method: validated.method,
            initial_cost: validated.initial_cost.value(),
            residual_value: validated.residual_value.value(),
            useful_life: validated.useful_life,
            total_depreciation,
            schedule,
        })
    }

    /// Walk the years, carrying book value forward.
    ///
    /// Non-final years: raw formula, rounded, clamped to
    /// `[0, beginning - residual]`. Final year: `beginning - residual`.
    fn build_schedule(
        &self,
        asset_id: &str,
        request: &ValidatedRequest,
    ) -> Result<Vec<ScheduleEntry>, EngineError> {
        let strategy = Strategy::select(
            request.method,
            request.depreciable(),
            request.useful_life,
            request.rate,
        );
        let precision = self.config.precision;
        let residual = request.residual_value;
        let life = request.useful_life;

        let mut schedule = Vec::with_capacity(life as usize);
        let mut beginning = request.initial_cost.with_min_scale(precision);
        let mut accumulated = Amount::ZERO;

        for year in 1..=life {
            let headroom = beginning.saturating_sub(&residual);

            let expense = if year == life {
                headroom.with_min_scale(precision)
            } else {
                let raw = strategy
                    .raw_expense(year, beginning.value())
                    .ok_or(EngineError::Overflow { year })?;
                let rounded = Amount::new(raw).unwrap_or(Amount::ZERO).round_dp(precision);

                if rounded > headroom {
                    if !headroom.is_zero() {
                        debug!(asset_id, year, "Book value reached residual; expense clipped");
                    }
                    headroom
                } else {
                    rounded
                }
            };

            let ending = beginning.saturating_sub(&expense);
            accumulated = accumulated
                .checked_add(&expense)
                .ok_or(EngineError::Overflow { year })?;

            schedule.push(ScheduleEntry {
                year,
                beginning_book_value: beginning.value(),
                depreciation_expense: expense.value(),
                accumulated_depreciation: accumulated.value(),
                ending_book_value: ending.value(),
            });

            beginning = ending;
        }

        Ok(schedule)
    }
}

/// Calculate with the default configuration (2 decimal places)
pub fn calculate(request: &DepreciationRequest) -> Result<DepreciationResult, EngineError> {
    DepreciationEngine::default().calculate(request)
}
