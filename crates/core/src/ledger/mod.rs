//! Portfolio ledger module - holdings model and file-backed persistence.

mod ledger_model;
mod ledger_store;
mod ledger_traits;

pub use ledger_model::*;
pub use ledger_store::*;
pub use ledger_traits::*;
