use crate::errors::Result;
use crate::ledger::{Holding, Ledger};

/// Trait for ledger persistence.
///
/// Pure data access: no valuation rules live here. Implementations must
/// make `load` total (missing or unreadable state degrades to an empty
/// ledger, never a crash) and `save` atomic from the caller's perspective
/// (a concurrent `load` never observes a partial write).
pub trait LedgerStoreTrait: Send + Sync {
    /// Load the persisted ledger. Missing state is an empty ledger;
    /// unreadable state degrades to empty with a logged warning.
    fn load(&self) -> Ledger;

    /// Persist the full ledger, overwriting any previous state.
    fn save(&self, ledger: &Ledger) -> Result<()>;

    /// Load, add-or-replace one holding, persist. Returns the new ledger.
    fn upsert(&self, code: &str, holding: Holding) -> Result<Ledger>;

    /// Reset to an empty ledger and persist immediately.
    fn clear(&self) -> Result<()>;
}
