//! Shared identifier types for the commission marketplace.

mod types;

pub use types::{ArtistId, CommissionId, CustomerId, IdGenerator, UuidGenerator};
