//! Core error types for fundwatch.
//!
//! Failure kinds are propagated as values so callers can distinguish them
//! instead of uniformly swallowing exceptions. Row-level feed problems and
//! unmatched holdings are not represented here at all: they are absorbed
//! where they occur (normalizer sentinels, unmatched-code lists) and never
//! abort a batch.

use thiserror::Error;

use fundwatch_feed_data::FeedError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the fundwatch core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Feed operation failed: {0}")]
    Feed(#[from] FeedError),

    #[error("Ledger operation failed: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors from the persisted ledger store.
///
/// Note that an unreadable ledger is NOT an error on load: corruption
/// degrades to an empty ledger (with a logged warning) so the caller can
/// always render something. These variants cover write failures.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Ledger I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ledger serialization failed: {0}")]
    Serialization(String),
}
