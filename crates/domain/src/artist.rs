//! Artist records.

use common::ArtistId;
use serde::{Deserialize, Serialize};

/// A registered artist. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,

    pub name: String,

    /// Price charged per commission.
    pub price: u64,

    /// Revisions granted to each new commission.
    pub revision_budget: u8,
}
