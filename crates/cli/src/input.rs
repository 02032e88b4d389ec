//! Reading requests and portfolios from files or stdin

use anyhow::{Context, Result};
use assetbook_engine::DepreciationRequest;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// One line of a portfolio file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub request: DepreciationRequest,
    #[serde(default)]
    pub years_in_service: u32,
}

/// Read a file, or stdin when the path is `-`
pub fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn load_request(path: &Path) -> Result<DepreciationRequest> {
    let content = read_source(path)?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid depreciation request in {}", path.display()))
}

pub fn load_portfolio(path: &Path) -> Result<Vec<PortfolioItem>> {
    let content = read_source(path)?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid portfolio in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_request() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"assetId":"a1","assetName":"Van","initialCost":30000,"residualValue":5000,"usefulLife":5,"method":"STRAIGHT_LINE"}}"#
        )
        .unwrap();

        let request = load_request(file.path()).unwrap();
        assert_eq!(request.asset_id, "a1");
        assert_eq!(request.useful_life, 5);
    }

    #[test]
    fn test_load_request_bad_method() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"assetId":"a1","assetName":"Van","initialCost":1,"residualValue":0,"usefulLife":5,"method":"LINEAR"}}"#
        )
        .unwrap();

        let err = load_request(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid depreciation request"));
    }

    #[test]
    fn test_portfolio_years_default_to_zero() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"request":{{"assetId":"a1","assetName":"Van","initialCost":1,"residualValue":0,"usefulLife":2,"method":"SUM_OF_YEARS_DIGITS"}}}}]"#
        )
        .unwrap();

        let items = load_portfolio(file.path()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].years_in_service, 0);
    }

    #[test]
    fn test_missing_file() {
        let err = load_request(Path::new("/nonexistent/request.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
