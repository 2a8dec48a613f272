//! Marketplace commands.

use common::{ArtistId, CommissionId, CustomerId};

use crate::error::DomainError;

/// Command to register a new artist.
#[derive(Debug, Clone)]
pub struct CreateArtist {
    pub name: String,

    /// Price per commission; must be non-zero.
    pub price: u64,

    /// Revisions each commission starts with; zero is allowed.
    pub revision_budget: u8,
}

impl CreateArtist {
    /// Creates a new CreateArtist command.
    pub fn new(name: impl Into<String>, price: u64, revision_budget: u8) -> Self {
        Self {
            name: name.into(),
            price,
            revision_budget,
        }
    }

    /// Checks required fields before anything is stored.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_name("artist", &self.name)?;
        if self.price == 0 {
            return Err(DomainError::InvalidInput(
                "artist price must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Command to register a new customer.
#[derive(Debug, Clone)]
pub struct CreateCustomer {
    pub name: String,
}

impl CreateCustomer {
    /// Creates a new CreateCustomer command.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Checks required fields before anything is stored.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_name("customer", &self.name)
    }
}

/// Command to request a commission from an artist.
#[derive(Debug, Clone, Copy)]
pub struct CreateCommission {
    pub artist_id: ArtistId,
    pub customer_id: CustomerId,
}

impl CreateCommission {
    /// Creates a new CreateCommission command.
    pub fn new(artist_id: ArtistId, customer_id: CustomerId) -> Self {
        Self {
            artist_id,
            customer_id,
        }
    }
}

/// Command to deliver artwork for a commission.
#[derive(Debug, Clone)]
pub struct SubmitArtwork {
    pub commission_id: CommissionId,
    pub url: String,
}

impl SubmitArtwork {
    /// Creates a new SubmitArtwork command.
    pub fn new(commission_id: CommissionId, url: impl Into<String>) -> Self {
        Self {
            commission_id,
            url: url.into(),
        }
    }
}

fn require_name(entity: &str, name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidInput(format!(
            "{entity} name must not be empty"
        )));
    }
    Ok(())
}
