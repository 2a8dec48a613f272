//! Commission status.

use serde::{Deserialize, Serialize};

/// The state of a commission in its lifecycle.
///
/// State transitions:
/// ```text
/// Pending ──accept──► Accepted ──submit──► ArtworkSubmitted ──approve──► Approved
///    │                   ▲                      │
///    │                   └──request revision────┘
///    │
///    └──reject──► Rejected
///
/// Pending | Accepted | ArtworkSubmitted ──cancel──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CommissionStatus {
    /// Requested by the customer, awaiting the artist's decision.
    #[default]
    Pending,

    /// Accepted by the artist, artwork in progress.
    Accepted,

    /// Artwork delivered, awaiting the customer's approval or revision request.
    ArtworkSubmitted,

    /// Artwork approved by the customer (terminal state).
    Approved,

    /// Declined by the artist (terminal state).
    Rejected,

    /// Cancelled by either party (terminal state).
    Cancelled,
}

impl CommissionStatus {
    /// Returns true once the artist has accepted the commission.
    pub fn is_accepted(&self) -> bool {
        matches!(
            self,
            CommissionStatus::Accepted | CommissionStatus::ArtworkSubmitted
        )
    }

    /// Returns true while submitted artwork awaits the customer.
    pub fn is_artwork_submitted(&self) -> bool {
        matches!(self, CommissionStatus::ArtworkSubmitted)
    }

    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CommissionStatus::Approved | CommissionStatus::Rejected | CommissionStatus::Cancelled
        )
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionStatus::Pending => "pending",
            CommissionStatus::Accepted => "accepted",
            CommissionStatus::ArtworkSubmitted => "artwork_submitted",
            CommissionStatus::Approved => "approved",
            CommissionStatus::Rejected => "rejected",
            CommissionStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for CommissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
