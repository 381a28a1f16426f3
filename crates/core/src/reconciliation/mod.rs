//! Reconciliation module - joining the ledger against the estimate feed.

mod reconciliation_engine;
mod reconciliation_model;

pub use reconciliation_engine::*;
pub use reconciliation_model::*;

#[cfg(test)]
mod reconciliation_engine_tests;
