//! Domain errors for the call ingestion system.

use thiserror::Error;

use crate::domain::models::LookupKind;

/// Domain-level errors that can occur while ingesting a call.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Campaign {0} does not exist")]
    UnknownCampaign(i64),

    #[error("{kind} not found: {name}")]
    LookupMiss { kind: LookupKind, name: String },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Failed to persist call: {0}")]
    PersistFailed(String),
}

impl DomainError {
    /// True for errors caused by the submitted data rather than a dependency.
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::UnknownCampaign(_) | Self::LookupMiss { .. }
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::StoreUnavailable(err.to_string())
    }
}
