//! Depreciation requests and their preconditions

use assetbook_core::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::{EngineConfig, RatePolicy};
use crate::error::{FieldViolation, ValidationError};
use crate::method::DepreciationMethod;

/// Input record for a single asset.
///
/// Monetary fields are raw decimals so that negative values reach
/// validation and come back as field errors instead of parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationRequest {
    pub asset_id: String,
    pub asset_name: String,
    pub initial_cost: Decimal,
    pub residual_value: Decimal,
    pub useful_life: u32,
    pub method: DepreciationMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depreciation_rate: Option<Decimal>,
}

/// A request that passed every precondition
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidatedRequest {
    pub initial_cost: Amount,
    pub residual_value: Amount,
    pub useful_life: u32,
    pub method: DepreciationMethod,
    /// Caller rate, only kept for DECLINING_BALANCE
    pub rate: Option<Decimal>,
}

impl ValidatedRequest {
    pub fn depreciable(&self) -> Decimal {
        self.initial_cost.value() - self.residual_value.value()
    }
}

impl DepreciationRequest {
    pub fn new(
        asset_id: impl Into<String>,
        asset_name: impl Into<String>,
        initial_cost: Decimal,
        residual_value: Decimal,
        useful_life: u32,
        method: DepreciationMethod,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            asset_name: asset_name.into(),
            initial_cost,
            residual_value,
            useful_life,
            method,
            depreciation_rate: None,
        }
    }

    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.depreciation_rate = Some(rate);
        self
    }

    /// Check every precondition, collecting all violations.
    pub(crate) fn validate(&self, config: &EngineConfig) -> Result<ValidatedRequest, ValidationError> {
        let mut violations = Vec::new();

        if self.asset_id.trim().is_empty() {
            violations.push(FieldViolation::new("assetId", "must not be empty"));
        }
        if self.asset_name.trim().is_empty() {
            violations.push(FieldViolation::new("assetName", "must not be empty"));
        }

        let initial_cost = Amount::new(self.initial_cost).ok();
        if initial_cost.is_none() {
            violations.push(FieldViolation::new(
                "initialCost",
                "must be greater than or equal to 0",
            ));
        }
        let residual_value = Amount::new(self.residual_value).ok();
        if residual_value.is_none() {
            violations.push(FieldViolation::new(
                "residualValue",
                "must be greater than or equal to 0",
            ));
        }
        if let (Some(cost), Some(residual)) = (initial_cost, residual_value) {
            if residual > cost {
                violations.push(FieldViolation::new(
                    "residualValue",
                    "must not exceed initialCost",
                ));
            }
        }

        if self.useful_life == 0 {
            violations.push(FieldViolation::new("usefulLife", "must be at least 1"));
        } else if self.useful_life > config.max_useful_life {
            violations.push(FieldViolation::new(
                "usefulLife",
                format!("must not exceed {}", config.max_useful_life),
            ));
        }

        let rate = self.check_rate(config.rate_policy, &mut violations);

        match (initial_cost, residual_value) {
            (Some(initial_cost), Some(residual_value)) if violations.is_empty() => {
                Ok(ValidatedRequest {
                    initial_cost,
                    residual_value,
                    useful_life: self.useful_life,
                    method: self.method,
                    rate,
                })
            }
            _ => Err(ValidationError { violations }),
        }
    }

    fn check_rate(&self, policy: RatePolicy, violations: &mut Vec<FieldViolation>) -> Option<Decimal> {
        let Some(rate) = self.depreciation_rate else {
            if self.method.requires_rate() {
                violations.push(FieldViolation::new(
                    "depreciationRate",
                    format!("is required for {}", self.method),
                ));
            }
            return None;
        };

        if rate <= Decimal::ZERO || rate > Decimal::ONE {
            violations.push(FieldViolation::new(
                "depreciationRate",
                "must be greater than 0 and at most 1",
            ));
            return None;
        }

        if self.method.requires_rate() {
            return Some(rate);
        }

        match policy {
            RatePolicy::Reject => violations.push(FieldViolation::new(
                "depreciationRate",
                format!(
                    "is only accepted for {}, not {}",
                    DepreciationMethod::DecliningBalance,
                    self.method
                ),
            )),
            RatePolicy::Ignore => tracing::warn!(
                asset_id = %self.asset_id,
                method = %self.method,
                %rate,
                "depreciationRate ignored; method derives its own rate"
            ),
        }
        None
    }

    /// SHA-256 hex digest of the request content.
    ///
    /// Decimals are normalized first, so `1000` and `1000.00` produce the
    /// same fingerprint. Suitable as a cache key for results.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();

        let fields = [
            self.asset_id.clone(),
            self.asset_name.clone(),
            self.initial_cost.normalize().to_string(),
            self.residual_value.normalize().to_string(),
            self.useful_life.to_string(),
            self.method.to_string(),
            self.depreciation_rate
                .map(|r| r.normalize().to_string())
                .unwrap_or_default(),
        ];
        for field in &fields {
            hasher.update((field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }

        hex::encode(hasher.finalize())
    }
}
