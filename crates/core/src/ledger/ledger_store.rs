use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use log::{debug, warn};

use crate::errors::{LedgerError, Result};
use crate::ledger::{Holding, Ledger, LedgerStoreTrait};

/// File-backed ledger store.
///
/// The whole ledger lives in one JSON file (object of code -> holding).
/// Writes go to a sibling temp file and are renamed into place, so a
/// concurrent `load` sees either the old snapshot or the new one, never a
/// half-written file. A mutex serializes writers; the last completed write
/// wins.
pub struct FileLedgerStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileLedgerStore {
    /// Create a store over the given file path. The file need not exist;
    /// absence is an empty ledger.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lock the writer mutex, recovering from poison if necessary.
    /// A poisoned lock only means another writer panicked mid-save; the
    /// on-disk state is still a complete snapshot thanks to the rename.
    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|poisoned| {
            warn!("Ledger writer mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn read_ledger(&self) -> Ledger {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No ledger file at {}, starting empty", self.path.display());
                return Ledger::new();
            }
            Err(e) => {
                warn!(
                    "Ledger file {} is unreadable ({}), degrading to empty",
                    self.path.display(),
                    e
                );
                return Ledger::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(ledger) => ledger,
            Err(e) => {
                // Corrupt state is silent data loss for the user, so it is
                // logged loudly and distinctly from "no ledger yet".
                warn!(
                    "Ledger file {} is corrupt ({}), degrading to empty",
                    self.path.display(),
                    e
                );
                Ledger::new()
            }
        }
    }

    fn write_ledger(&self, ledger: &Ledger) -> Result<()> {
        let encoded = serde_json::to_string_pretty(ledger)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(LedgerError::Io)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, encoded).map_err(LedgerError::Io)?;
        fs::rename(&tmp, &self.path).map_err(LedgerError::Io)?;
        debug!(
            "Persisted ledger with {} holdings to {}",
            ledger.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl LedgerStoreTrait for FileLedgerStore {
    fn load(&self) -> Ledger {
        self.read_ledger()
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let _guard = self.lock_writer();
        self.write_ledger(ledger)
    }

    fn upsert(&self, code: &str, holding: Holding) -> Result<Ledger> {
        // Load-mutate-save under the writer lock so two upserts cannot
        // interleave and drop each other's entries.
        let _guard = self.lock_writer();
        let mut ledger = self.read_ledger();
        ledger.upsert(code, holding);
        self.write_ledger(&ledger)?;
        Ok(ledger)
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.lock_writer();
        self.write_ledger(&Ledger::new())
    }
}
