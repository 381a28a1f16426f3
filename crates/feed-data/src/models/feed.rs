use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One fund's estimate within a normalized feed snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRow {
    /// Fund code, an opaque string key. Leading zeros matter.
    pub code: String,
    /// Fund display name. "unknown" when the provider omitted the column.
    pub name: String,
    /// Current estimated unit value.
    pub estimated_value: f64,
    /// Signed percentage points relative to the previous settled unit value
    /// (e.g. `1.23` means +1.23%).
    pub estimated_change_pct: f64,
}

/// A feed snapshot conforming to the fixed four-column schema.
///
/// Ephemeral: rebuilt on every fetch, never persisted. Codes are unique
/// within one snapshot; the last row wins when the provider repeats one.
/// A code being absent is "no data for that fund", not an error.
#[derive(Clone, Debug, Default)]
pub struct NormalizedFeed {
    rows: Vec<FeedRow>,
    by_code: HashMap<String, usize>,
}

impl NormalizedFeed {
    /// Build a snapshot from normalized rows, indexing them by code.
    pub fn from_rows(rows: Vec<FeedRow>) -> Self {
        let by_code = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (row.code.clone(), idx))
            .collect();
        Self { rows, by_code }
    }

    /// Look up a fund by exact string equality on its code.
    pub fn get(&self, code: &str) -> Option<&FeedRow> {
        self.by_code.get(code).map(|idx| &self.rows[*idx])
    }

    /// All rows in feed order.
    pub fn rows(&self) -> &[FeedRow] {
        &self.rows
    }

    /// Number of funds in this snapshot.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the snapshot carries no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One settled unit-value observation in a fund's history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavPoint {
    /// Settlement date.
    pub date: NaiveDate,
    /// Settled unit value for that date.
    pub nav: f64,
}
