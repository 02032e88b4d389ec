//! Engine errors

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::config::MAX_PRECISION;

/// Errors returned by the depreciation engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The caller sent a request that breaks one or more preconditions
    #[error("Invalid depreciation request: {0}")]
    Validation(#[from] ValidationError),

    /// The engine itself is misconfigured or was handed an unknown token
    #[error("Engine configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Decimal overflow while computing year {year}")]
    Overflow { year: u32 },

    #[error("Decimal overflow while totaling portfolio")]
    PortfolioOverflow,

    #[error("Projection must move forward: from year {from} to year {to}")]
    InvalidProjection { from: u32, to: u32 },
}

impl EngineError {
    /// True when the caller can fix the error by correcting its input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::Validation(_) | EngineError::InvalidProjection { .. }
        )
    }
}

/// A single violated precondition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Wire name of the offending field (e.g. `residualValue`)
    pub field: &'static str,
    pub constraint: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, constraint: impl Into<String>) -> Self {
        Self {
            field,
            constraint: constraint.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.constraint)
    }
}

/// Every precondition a request violated, in field order
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{}", summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Check whether a given field was reported
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration and token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown depreciation method: {0}")]
    UnknownMethod(String),

    #[error("Precision {0} exceeds the maximum decimal scale of {max}", max = MAX_PRECISION)]
    PrecisionTooLarge(u32),

    #[error("max_useful_life must be at least 1")]
    ZeroMaxUsefulLife,

    #[error("Failed to load config from {path}: {reason}")]
    Load { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_field() {
        let err = ValidationError {
            violations: vec![
                FieldViolation::new("residualValue", "must not exceed initialCost"),
                FieldViolation::new("usefulLife", "must be at least 1"),
            ],
        };

        assert_eq!(
            err.to_string(),
            "residualValue must not exceed initialCost; usefulLife must be at least 1"
        );
        assert!(err.has_field("usefulLife"));
        assert!(!err.has_field("method"));
    }

    #[test]
    fn test_client_error_classification() {
        let validation = EngineError::Validation(ValidationError { violations: vec![] });
        let config = EngineError::Configuration(ConfigError::UnknownMethod("X".into()));

        assert!(validation.is_client_error());
        assert!(!config.is_client_error());
        assert!(!EngineError::Overflow { year: 3 }.is_client_error());
        assert!(!EngineError::PortfolioOverflow.is_client_error());
    }

    #[test]
    fn test_precision_message_names_limit() {
        let err = ConfigError::PrecisionTooLarge(30);
        assert_eq!(
            err.to_string(),
            "Precision 30 exceeds the maximum decimal scale of 28"
        );
    }
}
