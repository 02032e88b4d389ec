//! AssetBook Core - Domain types
//!
//! This crate contains the fundamental types shared by the engine and CLI:
//! - `Amount`: Non-negative decimal wrapper for monetary values
//! - `Currency`: Currency codes and their minor-unit precision

pub mod amount;
pub mod currency;

pub use amount::{Amount, AmountError};
pub use currency::{Currency, CurrencyError};
