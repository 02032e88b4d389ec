//! Command implementations

use anyhow::{Context, Result};
use assetbook_core::Currency;
use assetbook_engine::{
    nearing_end_of_life, DepreciationEngine, DepreciationMethod, DepreciationResult,
    EngineConfig, EngineError, Holding, PortfolioSummary, Projection,
};
use serde::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::input::{load_portfolio, load_request};

/// Engine settings gathered from global flags.
///
/// Precedence: `precision` over `currency` over the config file.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub config: Option<PathBuf>,
    pub currency: Option<String>,
    pub precision: Option<u32>,
}

impl EngineOptions {
    pub fn build(&self) -> Result<DepreciationEngine> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_file(path)?,
            None => EngineConfig::default(),
        };

        if let Some(code) = &self.currency {
            let currency: Currency = code
                .parse()
                .with_context(|| format!("Invalid currency {code:?}"))?;
            config.precision = currency.minor_units();
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }

        Ok(DepreciationEngine::new(config)?)
    }
}

/// Summary output, optionally with assets close to the end of their life
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    #[serde(flatten)]
    pub summary: PortfolioSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearing_end_of_life: Option<Vec<String>>,
}

/// Calculate a schedule, optionally overriding the request's method token
pub fn calculate(
    engine: &DepreciationEngine,
    input: &Path,
    method: Option<&str>,
) -> Result<DepreciationResult> {
    let mut request = load_request(input)?;
    if let Some(token) = method {
        request.method = DepreciationMethod::parse_token(token).map_err(EngineError::from)?;
    }
    tracing::info!(asset_id = %request.asset_id, method = %request.method, "calculate");
    Ok(engine.calculate(&request)?)
}

pub fn project(
    engine: &DepreciationEngine,
    input: &Path,
    from_year: u32,
    to_year: u32,
) -> Result<Projection> {
    let result = calculate(engine, input, None)?;
    Ok(result.project(from_year, to_year)?)
}

pub fn summary(
    engine: &DepreciationEngine,
    portfolio: &Path,
    nearing_end: Option<u32>,
) -> Result<SummaryReport> {
    let items = load_portfolio(portfolio)?;
    tracing::info!(assets = items.len(), "summarizing portfolio");

    let holdings = items
        .into_iter()
        .map(|item| {
            let result = engine
                .calculate(&item.request)
                .with_context(|| format!("Asset {}", item.request.asset_id))?;
            Ok(Holding::new(result, item.years_in_service))
        })
        .collect::<Result<Vec<_>>>()?;

    let nearing_end_of_life = nearing_end.map(|threshold| {
        nearing_end_of_life(&holdings, threshold)
            .into_iter()
            .map(|h| h.result.asset_id.clone())
            .collect()
    });

    Ok(SummaryReport {
        summary: PortfolioSummary::from_holdings(&holdings)?,
        nearing_end_of_life,
    })
}

pub fn fingerprint(input: &Path) -> Result<String> {
    Ok(load_request(input)?.fingerprint())
}

/// Render a schedule as a fixed-width text table
pub fn render_table(result: &DepreciationResult) -> String {
    let mut out = format!(
        "{} ({}) - {} over {} years\n",
        result.asset_name, result.asset_id, result.method, result.useful_life
    );
    out.push_str(&table_row(
        "Year",
        "Beginning",
        "Expense",
        "Accumulated",
        "Ending",
    ));
    for e in &result.schedule {
        out.push_str(&table_row(
            e.year,
            e.beginning_book_value,
            e.depreciation_expense,
            e.accumulated_depreciation,
            e.ending_book_value,
        ));
    }
    out.push_str(&format!(
        "Total depreciation: {}\n",
        result.total_depreciation
    ));
    out
}

fn table_row(
    year: impl Display,
    beginning: impl Display,
    expense: impl Display,
    accumulated: impl Display,
    ending: impl Display,
) -> String {
    format!("{year:>4}  {beginning:>16}  {expense:>16}  {accumulated:>16}  {ending:>16}\n")
}
