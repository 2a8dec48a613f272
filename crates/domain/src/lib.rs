//! Domain layer for the commission marketplace.
//!
//! This crate provides:
//! - Artist, Customer, and Commission records
//! - The commission lifecycle guard and transition methods
//! - `MarketplaceService`, which validates references, runs the guard, and
//!   persists results through the entity stores

pub mod artist;
pub mod commands;
pub mod commission;
pub mod customer;
pub mod error;
pub mod service;

pub use artist::Artist;
pub use commands::{CreateArtist, CreateCommission, CreateCustomer, SubmitArtwork};
pub use commission::{
    Commission, CommissionError, CommissionOperation, CommissionStatus, Denial, DenialKind, guard,
};
pub use customer::Customer;
pub use error::DomainError;
pub use service::MarketplaceService;
