//! Commission entity.

use chrono::{DateTime, Utc};
use common::{ArtistId, CommissionId, CustomerId};
use serde::{Deserialize, Serialize};

use crate::artist::Artist;

use super::{CommissionError, CommissionOperation, CommissionStatus, lifecycle};

/// A unit of work linking one artist and one customer.
///
/// Price and revision budget are copied from the artist when the commission
/// is created and never re-read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commission {
    id: CommissionId,

    customer_id: CustomerId,

    artist_id: ArtistId,

    /// Price agreed at request time.
    price: u64,

    /// Revisions the customer may still request. Never increases.
    remaining_revisions: u8,

    /// Latest submitted artwork; empty until the first submission.
    #[serde(default)]
    artwork_url: String,

    status: CommissionStatus,

    #[serde(default)]
    created_at: DateTime<Utc>,

    #[serde(default)]
    updated_at: DateTime<Utc>,
}

impl Commission {
    /// Creates a pending commission for `artist` on behalf of `customer_id`.
    pub fn new(
        id: CommissionId,
        artist: &Artist,
        customer_id: CustomerId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_id,
            artist_id: artist.id,
            price: artist.price,
            remaining_revisions: artist.revision_budget,
            artwork_url: String::new(),
            status: CommissionStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

// Query methods
impl Commission {
    pub fn id(&self) -> CommissionId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn artist_id(&self) -> ArtistId {
        self.artist_id
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn remaining_revisions(&self) -> u8 {
        self.remaining_revisions
    }

    pub fn artwork_url(&self) -> &str {
        &self.artwork_url
    }

    pub fn status(&self) -> CommissionStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns true if the commission is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Operations the guard would currently permit.
    pub fn available_operations(&self) -> Vec<CommissionOperation> {
        CommissionOperation::ALL
            .into_iter()
            .filter(|op| lifecycle::guard(self.status, self.remaining_revisions, *op).is_ok())
            .collect()
    }
}

// Transition methods. Each checks the guard before touching any field, so a
// refused transition leaves the commission unchanged.
impl Commission {
    fn check(&self, operation: CommissionOperation) -> Result<(), CommissionError> {
        lifecycle::guard(self.status, self.remaining_revisions, operation)
            .map_err(|denial| CommissionError::denied(operation, denial))
    }

    pub fn accept(&mut self) -> Result<(), CommissionError> {
        self.check(CommissionOperation::Accept)?;
        self.status = CommissionStatus::Accepted;
        Ok(())
    }

    pub fn reject(&mut self) -> Result<(), CommissionError> {
        self.check(CommissionOperation::Reject)?;
        self.status = CommissionStatus::Rejected;
        Ok(())
    }

    /// Records delivered artwork. A resubmission replaces the previous URL.
    pub fn submit_artwork(&mut self, url: impl Into<String>) -> Result<(), CommissionError> {
        self.check(CommissionOperation::SubmitArtwork)?;

        let url = url.into();
        if url.trim().is_empty() {
            return Err(CommissionError::ArtworkUrlRequired);
        }

        self.artwork_url = url;
        self.status = CommissionStatus::ArtworkSubmitted;
        Ok(())
    }

    /// Consumes one revision and sends the commission back to the artist.
    pub fn request_revision(&mut self) -> Result<(), CommissionError> {
        let operation = CommissionOperation::RequestRevision;
        self.check(operation)?;

        self.remaining_revisions = self.remaining_revisions.checked_sub(1).ok_or(
            CommissionError::NoRemainingRevision {
                operation,
                reason: lifecycle::REASON_NO_REVISIONS,
            },
        )?;
        self.status = CommissionStatus::Accepted;
        Ok(())
    }

    pub fn approve(&mut self) -> Result<(), CommissionError> {
        self.check(CommissionOperation::Approve)?;
        self.status = CommissionStatus::Approved;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), CommissionError> {
        self.check(CommissionOperation::Cancel)?;
        self.status = CommissionStatus::Cancelled;
        Ok(())
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
