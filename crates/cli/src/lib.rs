//! AssetBook CLI - caller-side orchestration
//!
//! This crate provides the `assetbook` binary and the command functions it
//! dispatches to, kept in a library so they can be tested directly.

pub mod commands;
pub mod input;

pub use commands::EngineOptions;
