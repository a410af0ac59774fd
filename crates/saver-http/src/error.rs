use thiserror::Error;

/// Failures while building an [`crate::HttpLedger`]. Request failures are
/// reported as [`saver_core::LedgerError`].
#[derive(Debug, Error)]
pub enum HttpLedgerError {
    #[error("Invalid API base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
