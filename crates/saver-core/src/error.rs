use saver_domain::GoalId;
use thiserror::Error;

/// Failures reported by a [`crate::RemoteLedger`] implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The ledger answered, but refused the call.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// The ledger answered with a body the client could not read.
    #[error("Unexpected ledger response: {0}")]
    Decode(String),
    /// No response was received.
    #[error("Ledger unreachable: {0}")]
    Unreachable(String),
}

/// Terminal outcome of a single funding attempt. Never retried automatically.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FundingError {
    /// Rejected locally before any network call.
    #[error("{0}")]
    Validation(String),
    /// Another funding call for the same goal has not resolved yet.
    #[error("A saving for goal {0} is still being processed.")]
    InFlight(GoalId),
    /// The ledger answered with an error.
    #[error("{0}")]
    ConflictOrServer(String),
    /// The ledger never answered.
    #[error("Network error: {0}")]
    Network(String),
}

impl FundingError {
    /// Returns `true` when the attempt never reached the network layer.
    pub fn is_local(&self) -> bool {
        matches!(self, FundingError::Validation(_) | FundingError::InFlight(_))
    }
}

impl From<LedgerError> for FundingError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Rejected { message, .. } => FundingError::ConflictOrServer(message),
            LedgerError::Decode(message) => FundingError::ConflictOrServer(message),
            LedgerError::Unreachable(message) => FundingError::Network(message),
        }
    }
}

/// Collection-level fetch failure. Surfaces instead of any partial data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to load goals.")]
    Goals(#[source] LedgerError),
    #[error("Failed to load badges.")]
    Badges(#[source] LedgerError),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Goal not found: {0}")]
    GoalNotFound(GoalId),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Funding(#[from] FundingError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
