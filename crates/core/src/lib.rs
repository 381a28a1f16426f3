//! Fundwatch Core - ledger, reconciliation, and the monitor session.
//!
//! This crate contains the business logic for fundwatch: the persisted
//! holdings ledger, the pure valuation-reconciliation engine, and the
//! monitor service that wires both to the estimate feed. Presentation is
//! someone else's job; everything here exposes plain data.

pub mod errors;
pub mod ledger;
pub mod monitor;
pub mod reconciliation;
pub mod utils;

// Re-export common types from the ledger and reconciliation modules
pub use ledger::*;
pub use reconciliation::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
