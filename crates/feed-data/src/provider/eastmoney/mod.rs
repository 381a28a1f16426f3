//! Eastmoney estimate feed provider.
//!
//! Fetches the intraday valuation-estimate table and per-fund settled
//! unit-value history from the Eastmoney fund API. The wire format has
//! drifted over time between a column/row envelope and a plain array of
//! objects, so both shapes are accepted and handed to the normalizer as a
//! [`RawTable`] without further interpretation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::FeedError;
use crate::models::{NavPoint, RawTable};
use crate::provider::FeedProvider;

const PROVIDER_ID: &str = "EASTMONEY";

const DEFAULT_BASE_URL: &str = "https://api.fund.eastmoney.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the Eastmoney provider.
#[derive(Clone, Debug)]
pub struct EastmoneyConfig {
    /// Base URL of the fund API.
    pub base_url: String,
    /// Request timeout. A timed-out fetch is reported as [`FeedError::Timeout`]
    /// and treated by callers like any other provider failure.
    pub timeout: Duration,
}

impl Default for EastmoneyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Eastmoney estimate feed provider.
pub struct EastmoneyProvider {
    client: reqwest::Client,
    base_url: String,
}

impl EastmoneyProvider {
    /// Create a provider with the given configuration.
    pub fn new(config: EastmoneyConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FeedError::ProviderUnavailable {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, url: &str) -> Result<Value, FeedError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_request_error)?;

        if !response.status().is_success() {
            return Err(FeedError::ProviderUnavailable {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} from {}", response.status(), url),
            });
        }

        response.json::<Value>().await.map_err(map_request_error)
    }
}

fn map_request_error(error: reqwest::Error) -> FeedError {
    if error.is_timeout() {
        FeedError::Timeout {
            provider: PROVIDER_ID.to_string(),
        }
    } else {
        FeedError::Network(error)
    }
}

#[async_trait]
impl FeedProvider for EastmoneyProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_estimates(&self) -> Result<RawTable, FeedError> {
        let url = format!("{}/fund/estimates", self.base_url);
        let payload = self.get_json(&url).await?;
        let table = parse_table(&payload)?;
        debug!(rows = table.rows.len(), "fetched estimate table");
        Ok(table)
    }

    async fn fetch_nav_history(&self, code: &str) -> Result<Vec<NavPoint>, FeedError> {
        let url = format!("{}/fund/{}/nav-history", self.base_url, code);
        let payload = self.get_json(&url).await?;
        let points = parse_nav_history(&payload);
        debug!(code, points = points.len(), "fetched nav history");
        Ok(points)
    }
}

/// Parse a payload into a raw table.
///
/// Accepts both observed wire shapes:
/// - an envelope `{"columns": [...], "rows": [[...], ...]}`
/// - a plain array of objects, whose keys become the columns
///
/// Cells are stringified as-is; interpretation belongs to the normalizer.
fn parse_table(payload: &Value) -> Result<RawTable, FeedError> {
    if let Some(object) = payload.as_object() {
        let columns = object
            .get("columns")
            .and_then(Value::as_array)
            .map(|cols| cols.iter().map(cell_to_string).collect::<Vec<_>>());
        let rows = object.get("rows").and_then(Value::as_array);
        if let (Some(columns), Some(rows)) = (columns, rows) {
            let rows = rows
                .iter()
                .map(|row| match row.as_array() {
                    Some(cells) => cells.iter().map(cell_to_string).collect(),
                    None => Vec::new(),
                })
                .collect();
            return Ok(RawTable::new(columns, rows));
        }
    }

    if let Some(records) = payload.as_array() {
        return Ok(records_to_table(records));
    }

    Err(FeedError::UnexpectedPayload {
        message: "estimate payload is neither a column/row envelope nor an array".to_string(),
    })
}

fn records_to_table(records: &[Value]) -> RawTable {
    let columns: Vec<String> = records
        .iter()
        .find_map(Value::as_object)
        .map(|first| first.keys().cloned().collect())
        .unwrap_or_default();

    let rows = records
        .iter()
        .filter_map(Value::as_object)
        .map(|record| {
            columns
                .iter()
                .map(|col| record.get(col).map(cell_to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    RawTable::new(columns, rows)
}

fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parse a nav-history payload, skipping rows that cannot be read.
///
/// A partially malformed history is still useful; rows with an unreadable
/// date or value are dropped with a warning rather than failing the fetch.
fn parse_nav_history(payload: &Value) -> Vec<NavPoint> {
    let Some(records) = payload.as_array() else {
        warn!("nav history payload is not an array, treating as empty");
        return Vec::new();
    };

    let mut points: Vec<NavPoint> = records
        .iter()
        .filter_map(|record| {
            let object = record.as_object()?;
            let date = ["date", "净值日期", "淨值日期"]
                .iter()
                .find_map(|key| object.get(*key))
                .and_then(Value::as_str)
                .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())?;
            let nav = ["nav", "unit_value", "单位净值", "單位淨值"]
                .iter()
                .find_map(|key| object.get(*key))
                .and_then(|value| match value {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                })?;
            Some(NavPoint { date, nav })
        })
        .collect();

    points.sort_by_key(|point| point.date);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_column_row_envelope() {
        let payload = json!({
            "columns": ["基金代码", "基金简称", "估算净值", "估算涨跌幅"],
            "rows": [["005827", "蓝筹精选", 1.62, "+0.80"]],
        });
        let table = parse_table(&payload).unwrap();
        assert_eq!(table.columns.len(), 4);
        assert_eq!(table.rows[0][0], "005827");
        assert_eq!(table.rows[0][2], "1.62");
        assert_eq!(table.rows[0][3], "+0.80");
    }

    #[test]
    fn parses_array_of_objects() {
        let payload = json!([
            {"code": "005827", "name": "蓝筹精选", "gsz": "1.62", "gszzl": "0.80"},
            {"code": "110011", "name": "优质企业", "gsz": "3.50", "gszzl": "-1.10"},
        ]);
        let table = parse_table(&payload).unwrap();
        assert_eq!(table.rows.len(), 2);
        let code_idx = table.columns.iter().position(|c| c == "code").unwrap();
        assert_eq!(table.rows[1][code_idx], "110011");
    }

    #[test]
    fn rejects_non_tabular_payload() {
        let payload = json!("oops");
        assert!(matches!(
            parse_table(&payload),
            Err(FeedError::UnexpectedPayload { .. })
        ));
    }

    #[test]
    fn nav_history_skips_malformed_rows_and_sorts() {
        let payload = json!([
            {"净值日期": "2024-03-02", "单位净值": "1.6100"},
            {"净值日期": "not-a-date", "单位净值": "1.0"},
            {"净值日期": "2024-03-01", "单位净值": 1.60},
        ]);
        let points = parse_nav_history(&payload);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(points[0].nav, 1.6);
        assert_eq!(points[1].nav, 1.61);
    }
}
