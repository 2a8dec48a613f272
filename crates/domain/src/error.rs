//! Domain error types.

use entity_store::EntityStoreError;
use thiserror::Error;

use crate::commission::{CommissionError, CommissionOperation};

/// Errors that can occur during marketplace operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced artist, customer, or commission does not exist.
    #[error("cannot {operation}: {entity} {id} not found")]
    NotFound {
        entity: &'static str,
        id: String,
        operation: &'static str,
    },

    /// A required field was missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The lifecycle guard refused the operation.
    #[error("cannot {operation}: {reason}")]
    InvalidTransaction {
        operation: CommissionOperation,
        reason: &'static str,
    },

    /// A revision was requested after the revision budget ran out.
    #[error("cannot {operation}: {reason}")]
    NoRemainingRevision {
        operation: CommissionOperation,
        reason: &'static str,
    },

    /// An error occurred in the entity store.
    #[error("Entity store error: {0}")]
    Store(#[from] EntityStoreError),
}

impl DomainError {
    pub(crate) fn not_found(
        entity: &'static str,
        id: impl std::fmt::Display,
        operation: &'static str,
    ) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
            operation,
        }
    }

    /// Stable, machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NotFound { .. } => "not_found",
            DomainError::InvalidInput(_) => "invalid_input",
            DomainError::InvalidTransaction { .. } => "invalid_transaction",
            DomainError::NoRemainingRevision { .. } => "no_remaining_revision",
            DomainError::Store(_) => "store",
        }
    }
}

impl From<CommissionError> for DomainError {
    fn from(e: CommissionError) -> Self {
        match e {
            CommissionError::InvalidTransaction { operation, reason } => {
                DomainError::InvalidTransaction { operation, reason }
            }
            CommissionError::NoRemainingRevision { operation, reason } => {
                DomainError::NoRemainingRevision { operation, reason }
            }
            CommissionError::ArtworkUrlRequired => DomainError::InvalidInput(e.to_string()),
        }
    }
}
