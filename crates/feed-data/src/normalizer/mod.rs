//! Feed normalizer: maps an arbitrary provider table onto the fixed schema.
//!
//! Providers rename, reorder, and localize their columns between versions.
//! Rather than scattering per-call-site renames across the codebase, the
//! drift is absorbed here once:
//!
//! 1. Known aliases of each canonical column are renamed to canonical.
//! 2. Columns with no alias match fall back to a fixed positional mapping:
//!    the first four columns are taken as code, name, value, change-percent.
//! 3. An empty or absent table yields `None` ("no data") so callers can
//!    distinguish a failed fetch from "feed present but fund X missing".
//!
//! The normalizer is total: for any input it returns without panicking,
//! substituting sentinel values for malformed or missing cells.

use lazy_static::lazy_static;
use std::collections::HashMap;
use tracing::debug;

use crate::models::{FeedRow, NormalizedFeed, RawTable};

/// Sentinel for string fields whose column is missing from the table.
pub const UNKNOWN: &str = "unknown";

/// The four canonical columns, in positional-fallback order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Canonical {
    Code,
    Name,
    EstimatedValue,
    EstimatedChangePct,
}

const POSITIONAL_ORDER: [Canonical; 4] = [
    Canonical::Code,
    Canonical::Name,
    Canonical::EstimatedValue,
    Canonical::EstimatedChangePct,
];

lazy_static! {
    /// Known historical and localized header variants of each canonical column.
    static ref COLUMN_ALIASES: HashMap<&'static str, Canonical> = {
        let mut m = HashMap::new();
        for alias in [
            "code", "fund_code", "fundcode", "symbol", "基金代码", "基金代碼",
        ] {
            m.insert(alias, Canonical::Code);
        }
        for alias in [
            "name", "fund_name", "short_name", "基金简称", "基金簡稱", "基金名称",
            "基金名稱",
        ] {
            m.insert(alias, Canonical::Name);
        }
        for alias in [
            "estimated_value", "estimate", "nav_estimate", "unit_value", "gsz",
            "估算净值", "估算淨值", "估算值",
        ] {
            m.insert(alias, Canonical::EstimatedValue);
        }
        for alias in [
            "estimated_change_pct", "change_pct", "pct_change", "gszzl",
            "估算涨跌幅", "估算漲跌幅", "涨跌幅", "漲跌幅",
        ] {
            m.insert(alias, Canonical::EstimatedChangePct);
        }
        m
    };
}

/// Normalize a raw provider table onto the canonical four-column schema.
///
/// Returns `None` when the table is absent or carries no rows; callers must
/// treat that as "no data", not as an error and not as "zero matches".
pub fn normalize(raw: Option<&RawTable>) -> Option<NormalizedFeed> {
    let table = raw?;
    if table.is_empty() {
        return None;
    }

    let mapping = resolve_columns(&table.columns);
    debug!(
        columns = table.columns.len(),
        rows = table.rows.len(),
        "normalizing feed table"
    );

    let rows = table
        .rows
        .iter()
        .map(|cells| FeedRow {
            code: string_field(cells, mapping.code),
            name: string_field(cells, mapping.name),
            estimated_value: numeric_field(cells, mapping.estimated_value),
            estimated_change_pct: numeric_field(cells, mapping.estimated_change_pct),
        })
        .collect();

    Some(NormalizedFeed::from_rows(rows))
}

/// Resolved cell index for each canonical column, if any column supplies it.
struct ColumnMapping {
    code: Option<usize>,
    name: Option<usize>,
    estimated_value: Option<usize>,
    estimated_change_pct: Option<usize>,
}

fn resolve_columns(columns: &[String]) -> ColumnMapping {
    let mut resolved: HashMap<Canonical, usize> = HashMap::new();

    // Alias pass: first matching column per canonical field wins.
    for (idx, header) in columns.iter().enumerate() {
        let key = header.trim().to_ascii_lowercase();
        if let Some(canonical) = COLUMN_ALIASES.get(key.as_str()) {
            resolved.entry(*canonical).or_insert(idx);
        }
    }

    // Positional fallback for anything the alias pass did not place.
    for (idx, canonical) in POSITIONAL_ORDER.iter().enumerate() {
        if idx < columns.len() {
            resolved.entry(*canonical).or_insert(idx);
        }
    }

    ColumnMapping {
        code: resolved.get(&Canonical::Code).copied(),
        name: resolved.get(&Canonical::Name).copied(),
        estimated_value: resolved.get(&Canonical::EstimatedValue).copied(),
        estimated_change_pct: resolved.get(&Canonical::EstimatedChangePct).copied(),
    }
}

fn string_field(cells: &[String], idx: Option<usize>) -> String {
    match idx.and_then(|i| cells.get(i)) {
        Some(cell) => cell.trim().to_string(),
        None => UNKNOWN.to_string(),
    }
}

/// Coerce a cell to f64, substituting 0 for malformed or missing values so a
/// single bad row never invalidates the batch. Tolerates a leading `+` and a
/// trailing percent sign.
fn numeric_field(cells: &[String], idx: Option<usize>) -> f64 {
    let Some(cell) = idx.and_then(|i| cells.get(i)) else {
        return 0.0;
    };
    let trimmed = cell.trim().trim_end_matches('%').trim_start_matches('+');
    trimmed.parse::<f64>().unwrap_or(0.0)
}
