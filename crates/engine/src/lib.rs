//! AssetBook Engine - Depreciation schedules
//!
//! Turns a `DepreciationRequest` into a `DepreciationResult`: one entry per
//! year of useful life, rounded to the configured precision, with the final
//! year plugged so the schedule always lands exactly on the residual value.
//!
//! # Key Types
//! - `DepreciationEngine`: Validates requests and builds schedules
//! - `DepreciationMethod`: Straight-line, declining balance, double declining, SYD
//! - `DepreciationResult`: The schedule plus whole-year queries over it
//! - `PortfolioSummary`: Totals across many assets

pub mod config;
pub mod engine;
pub mod error;
pub mod method;
pub mod portfolio;
pub mod request;
pub mod schedule;

pub use config::{EngineConfig, RatePolicy};
pub use engine::{calculate, DepreciationEngine};
pub use error::{ConfigError, EngineError, FieldViolation, ValidationError};
pub use method::DepreciationMethod;
pub use portfolio::{nearing_end_of_life, Holding, PortfolioSummary};
pub use request::DepreciationRequest;
pub use schedule::{DepreciationResult, Projection, ScheduleEntry};
