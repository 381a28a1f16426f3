use serde::{Deserialize, Serialize};

/// A provider response as a plain 2-D table.
///
/// Column names, order, and count are not guaranteed stable across provider
/// versions; cells are kept as strings until the normalizer interprets them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawTable {
    /// Column headers as received, possibly renamed between provider versions.
    pub columns: Vec<String>,
    /// Row cells, positionally aligned with `columns`.
    /// Rows may be ragged; missing cells are treated as absent fields.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a table from headers and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// True when the table carries no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
