//! Error types for the feed data crate.

use thiserror::Error;

/// Errors that can occur while fetching estimate feed data.
///
/// Row-level problems (malformed numbers, missing cells) are not errors:
/// the normalizer absorbs them with sentinel values so a single bad row
/// never invalidates the batch. These variants cover whole-call failures.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The provider could not satisfy the request.
    /// Callers should treat this as "no feed data" for the current refresh.
    #[error("Provider unavailable: {provider} - {message}")]
    ProviderUnavailable {
        /// The provider that failed
        provider: String,
        /// The failure description from the provider
        message: String,
    },

    /// The request to the provider timed out.
    /// Equivalent to provider failure for the current refresh.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider responded with a payload that could not be read as a table.
    #[error("Unexpected payload: {message}")]
    UnexpectedPayload {
        /// Description of what was received
        message: String,
    },

    /// A network error occurred while communicating with the provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
