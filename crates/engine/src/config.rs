//! Engine configuration
//!
//! Rounding precision and validation limits are configuration, not
//! constants, so one engine can serve currencies with different minor units.

use assetbook_core::Currency;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Largest scale a `rust_decimal::Decimal` can hold
pub const MAX_PRECISION: u32 = 28;

/// Configuration for the depreciation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Decimal places every expense is rounded to
    #[serde(default = "default_precision")]
    pub precision: u32,

    /// Upper bound on `usefulLife`, keeps schedules bounded
    #[serde(default = "default_max_useful_life")]
    pub max_useful_life: u32,

    /// What to do with a rate supplied for a method that does not use one
    #[serde(default)]
    pub rate_policy: RatePolicy,
}

/// Handling of `depreciationRate` on methods other than DECLINING_BALANCE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RatePolicy {
    /// Reject the request with a validation error on `depreciationRate`
    #[default]
    Reject,

    /// Accept the request, log a warning, and derive the rate from the method
    Ignore,
}

fn default_precision() -> u32 {
    2
}

fn default_max_useful_life() -> u32 {
    100
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            max_useful_life: default_max_useful_life(),
            rate_policy: RatePolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults with precision taken from the currency's minor units
    pub fn for_currency(currency: &Currency) -> Self {
        Self {
            precision: currency.minor_units(),
            ..Self::default()
        }
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_rate_policy(mut self, policy: RatePolicy) -> Self {
        self.rate_policy = policy;
        self
    }

    /// Load configuration from a JSON file and validate it
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let load_err = |reason: String| ConfigError::Load {
            path: path.display().to_string(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        let config: Self = serde_json::from_str(&content).map_err(|e| load_err(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::PrecisionTooLarge(self.precision));
        }
        if self.max_useful_life == 0 {
            return Err(ConfigError::ZeroMaxUsefulLife);
        }
        Ok(())
    }
}
