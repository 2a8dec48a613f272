//! Commission entity, status, and lifecycle rules.

mod entity;
pub mod lifecycle;
mod status;

pub use entity::Commission;
pub use lifecycle::{CommissionOperation, Denial, DenialKind, guard};
pub use status::CommissionStatus;

use thiserror::Error;

/// Errors that can occur when transitioning a commission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommissionError {
    /// The operation is not legal in the commission's current status.
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

    /// Artwork was submitted without a URL.
    #[error("artwork url must not be empty")]
    ArtworkUrlRequired,
}

impl CommissionError {
    fn denied(operation: CommissionOperation, denial: Denial) -> Self {
        match denial.kind {
            DenialKind::InvalidTransaction => CommissionError::InvalidTransaction {
                operation,
                reason: denial.reason,
            },
            DenialKind::NoRemainingRevision => CommissionError::NoRemainingRevision {
                operation,
                reason: denial.reason,
            },
        }
    }
}
