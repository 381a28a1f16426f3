use std::fmt;

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A user's recorded position in one fund.
///
/// The fund code is the ledger key, not a field here: it is an opaque
/// string (leading zeros matter, no numeric coercion anywhere).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Units held. Zero is valid (simulation/watch-only rows).
    pub shares: f64,
    /// Average net-value-per-share paid. Zero is valid.
    #[serde(rename = "cost")]
    pub cost_basis: f64,
    /// Acquisition date. Earlier ledger versions did not record it; when
    /// absent, holding-duration metrics are undefined for this entry.
    #[serde(rename = "date", default, skip_serializing_if = "Option::is_none")]
    pub acquired_on: Option<NaiveDate>,
}

/// The holdings ledger: fund code -> [`Holding`], in insertion order.
///
/// Insertion order is part of the contract: reconciliation output rows
/// follow it, so repeated refreshes over an unchanged ledger are stable.
/// On disk the ledger is a single JSON object of code -> holding; the
/// custom serde below round-trips that object exactly, order included.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    entries: Vec<(String, Holding)>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of holdings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no holdings are recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a holding by exact code.
    pub fn get(&self, code: &str) -> Option<&Holding> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == code)
            .map(|(_, holding)| holding)
    }

    /// Add or replace a holding.
    ///
    /// Re-adding a known code replaces its record entirely (no merge) while
    /// keeping its position; a new code is appended at the end.
    pub fn upsert(&mut self, code: impl Into<String>, holding: Holding) {
        let code = code.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == code) {
            Some(entry) => entry.1 = holding,
            None => self.entries.push((code, holding)),
        }
    }

    /// Drop all holdings.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Holdings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Holding)> {
        self.entries
            .iter()
            .map(|(code, holding)| (code.as_str(), holding))
    }
}

impl Serialize for Ledger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, holding) in &self.entries {
            map.serialize_entry(code, holding)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Ledger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LedgerVisitor;

        impl<'de> Visitor<'de> for LedgerVisitor {
            type Value = Ledger;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of fund code to holding")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Ledger, A::Error> {
                let mut ledger = Ledger::new();
                // Document order becomes insertion order; a duplicated key
                // replaces the earlier record, matching upsert semantics.
                while let Some((code, holding)) = access.next_entry::<String, Holding>()? {
                    ledger.upsert(code, holding);
                }
                Ok(ledger)
            }
        }

        deserializer.deserialize_map(LedgerVisitor)
    }
}
