//! Marketplace service: the single entry point for reads and writes.

use std::sync::Arc;

use chrono::Utc;
use common::{ArtistId, CommissionId, CustomerId, IdGenerator, UuidGenerator};
use entity_store::{InMemoryEntityStore, SharedStore};
use tokio::sync::Mutex;

use crate::artist::Artist;
use crate::commands::{CreateArtist, CreateCommission, CreateCustomer, SubmitArtwork};
use crate::commission::{Commission, CommissionError, CommissionOperation};
use crate::customer::Customer;
use crate::error::DomainError;

/// Service for managing artists, customers, and commissions.
///
/// The service owns the three stores. Mutating operations are serialized
/// through a single writer lock held across the whole
/// load → check → mutate → store cycle, so each one either fully applies or
/// leaves every store untouched. Reads do not take the lock.
pub struct MarketplaceService {
    artists: SharedStore<ArtistId, Artist>,
    customers: SharedStore<CustomerId, Customer>,
    commissions: SharedStore<CommissionId, Commission>,
    ids: Arc<dyn IdGenerator>,
    writer: Mutex<()>,
}

impl MarketplaceService {
    /// Creates a new service over the given stores.
    pub fn new(
        artists: SharedStore<ArtistId, Artist>,
        customers: SharedStore<CustomerId, Customer>,
        commissions: SharedStore<CommissionId, Commission>,
    ) -> Self {
        Self {
            artists,
            customers,
            commissions,
            ids: Arc::new(UuidGenerator),
            writer: Mutex::new(()),
        }
    }

    /// Creates a service backed by fresh, empty in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryEntityStore::new()),
            Arc::new(InMemoryEntityStore::new()),
            Arc::new(InMemoryEntityStore::new()),
        )
    }

    /// Replaces the identifier source.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// Number of commissions ever requested.
    pub async fn commission_count(&self) -> Result<usize, DomainError> {
        Ok(self.commissions.len().await?)
    }
}

// Artists
impl MarketplaceService {
    /// Registers a new artist.
    #[tracing::instrument(skip(self))]
    pub async fn create_artist(&self, cmd: CreateArtist) -> Result<Artist, DomainError> {
        cmd.validate()?;

        let _writer = self.writer.lock().await;
        let artist = Artist {
            id: self.ids.artist_id(),
            name: cmd.name,
            price: cmd.price,
            revision_budget: cmd.revision_budget,
        };
        self.artists.put(artist.id, artist.clone()).await?;

        metrics::counter!("marketplace_entities_created_total", "entity" => "artist").increment(1);
        tracing::info!(artist_id = %artist.id, "artist registered");
        Ok(artist)
    }

    /// Lists all artists in ID order.
    #[tracing::instrument(skip(self))]
    pub async fn list_artists(&self) -> Result<Vec<Artist>, DomainError> {
        Ok(self.artists.values().await?)
    }

    /// Loads an artist by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_artist(&self, id: ArtistId) -> Result<Artist, DomainError> {
        self.artists
            .get(&id)
            .await?
            .ok_or_else(|| DomainError::not_found("artist", id, "read artist"))
    }
}

// Customers
impl MarketplaceService {
    /// Registers a new customer.
    #[tracing::instrument(skip(self))]
    pub async fn create_customer(&self, cmd: CreateCustomer) -> Result<Customer, DomainError> {
        cmd.validate()?;

        let _writer = self.writer.lock().await;
        let customer = Customer {
            id: self.ids.customer_id(),
            name: cmd.name,
        };
        self.customers.put(customer.id, customer.clone()).await?;

        metrics::counter!("marketplace_entities_created_total", "entity" => "customer")
            .increment(1);
        tracing::info!(customer_id = %customer.id, "customer registered");
        Ok(customer)
    }

    /// Lists all customers in ID order.
    #[tracing::instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<Customer>, DomainError> {
        Ok(self.customers.values().await?)
    }

    /// Loads a customer by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, DomainError> {
        self.customers
            .get(&id)
            .await?
            .ok_or_else(|| DomainError::not_found("customer", id, "read customer"))
    }
}

// Commissions
impl MarketplaceService {
    /// Requests a commission, fixing the artist's current price and revision
    /// budget into it.
    #[tracing::instrument(skip(self))]
    pub async fn create_commission(
        &self,
        cmd: CreateCommission,
    ) -> Result<Commission, DomainError> {
        const OPERATION: &str = "create commission";

        let _writer = self.writer.lock().await;
        let artist = self
            .artists
            .get(&cmd.artist_id)
            .await?
            .ok_or_else(|| DomainError::not_found("artist", cmd.artist_id, OPERATION))?;
        let customer = self
            .customers
            .get(&cmd.customer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("customer", cmd.customer_id, OPERATION))?;

        let commission = Commission::new(self.ids.commission_id(), &artist, customer.id, Utc::now());
        self.commissions
            .put(commission.id(), commission.clone())
            .await?;

        metrics::counter!("marketplace_entities_created_total", "entity" => "commission")
            .increment(1);
        tracing::info!(
            commission_id = %commission.id(),
            artist_id = %artist.id,
            customer_id = %customer.id,
            price = commission.price(),
            "commission requested"
        );
        Ok(commission)
    }

    /// Lists every commission ever requested, in ID order.
    #[tracing::instrument(skip(self))]
    pub async fn list_commissions(&self) -> Result<Vec<Commission>, DomainError> {
        Ok(self.commissions.values().await?)
    }

    /// Loads a commission by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_commission(&self, id: CommissionId) -> Result<Commission, DomainError> {
        self.commissions
            .get(&id)
            .await?
            .ok_or_else(|| DomainError::not_found("commission", id, "read commission"))
    }

    /// Lists the commissions requested from an artist.
    #[tracing::instrument(skip(self))]
    pub async fn list_commissions_for_artist(
        &self,
        artist_id: ArtistId,
    ) -> Result<Vec<Commission>, DomainError> {
        if !self.artists.contains(&artist_id).await? {
            return Err(DomainError::not_found(
                "artist",
                artist_id,
                "list artist commissions",
            ));
        }

        let mut commissions = self.commissions.values().await?;
        commissions.retain(|c| c.artist_id() == artist_id);
        Ok(commissions)
    }

    /// Lists the commissions a customer has requested.
    #[tracing::instrument(skip(self))]
    pub async fn list_commissions_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Commission>, DomainError> {
        if !self.customers.contains(&customer_id).await? {
            return Err(DomainError::not_found(
                "customer",
                customer_id,
                "list customer commissions",
            ));
        }

        let mut commissions = self.commissions.values().await?;
        commissions.retain(|c| c.customer_id() == customer_id);
        Ok(commissions)
    }

    /// Artist accepts a pending commission.
    #[tracing::instrument(skip(self))]
    pub async fn accept_commission(&self, id: CommissionId) -> Result<Commission, DomainError> {
        self.transition(id, CommissionOperation::Accept, Commission::accept)
            .await
    }

    /// Artist declines a pending commission.
    #[tracing::instrument(skip(self))]
    pub async fn reject_commission(&self, id: CommissionId) -> Result<Commission, DomainError> {
        self.transition(id, CommissionOperation::Reject, Commission::reject)
            .await
    }

    /// Artist delivers artwork for an accepted commission.
    #[tracing::instrument(skip(self))]
    pub async fn submit_artwork(&self, cmd: SubmitArtwork) -> Result<Commission, DomainError> {
        let url = cmd.url;
        self.transition(
            cmd.commission_id,
            CommissionOperation::SubmitArtwork,
            |commission| commission.submit_artwork(url),
        )
        .await
    }

    /// Customer asks for changes, consuming one revision.
    #[tracing::instrument(skip(self))]
    pub async fn request_revision(&self, id: CommissionId) -> Result<Commission, DomainError> {
        self.transition(
            id,
            CommissionOperation::RequestRevision,
            Commission::request_revision,
        )
        .await
    }

    /// Customer approves the submitted artwork.
    #[tracing::instrument(skip(self))]
    pub async fn approve_commission(&self, id: CommissionId) -> Result<Commission, DomainError> {
        self.transition(id, CommissionOperation::Approve, Commission::approve)
            .await
    }

    /// Either party cancels a commission that has not yet ended.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_commission(&self, id: CommissionId) -> Result<Commission, DomainError> {
        self.transition(id, CommissionOperation::Cancel, Commission::cancel)
            .await
    }

    /// Loads a commission, applies one lifecycle operation to a copy, and
    /// stores the copy only if the operation succeeded.
    async fn transition<F>(
        &self,
        id: CommissionId,
        operation: CommissionOperation,
        apply: F,
    ) -> Result<Commission, DomainError>
    where
        F: FnOnce(&mut Commission) -> Result<(), CommissionError>,
    {
        let _writer = self.writer.lock().await;

        let mut commission = self
            .commissions
            .get(&id)
            .await?
            .ok_or_else(|| DomainError::not_found("commission", id, operation.as_str()))?;
        let from = commission.status();

        if let Err(err) = apply(&mut commission) {
            let err = DomainError::from(err);
            metrics::counter!(
                "commission_transitions_denied_total",
                "operation" => operation.as_str(),
                "kind" => err.kind()
            )
            .increment(1);
            tracing::debug!(commission_id = %id, %from, error = %err, "commission transition denied");
            return Err(err);
        }

        commission.touch(Utc::now());
        self.commissions.put(id, commission.clone()).await?;

        metrics::counter!("commission_transitions_total", "operation" => operation.as_str())
            .increment(1);
        tracing::info!(
            commission_id = %id,
            %operation,
            %from,
            to = %commission.status(),
            remaining_revisions = commission.remaining_revisions(),
            "commission transitioned"
        );
        Ok(commission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commission::CommissionStatus;

    async fn setup(revision_budget: u8) -> (MarketplaceService, Artist, Customer) {
        let service = MarketplaceService::in_memory();
        let artist = service
            .create_artist(CreateArtist::new("Mira", 15_000, revision_budget))
            .await
            .unwrap();
        let customer = service
            .create_customer(CreateCustomer::new("Ada"))
            .await
            .unwrap();
        (service, artist, customer)
    }

    #[tokio::test]
    async fn test_create_and_get_artist() {
        let (service, artist, _) = setup(2).await;

        let loaded = service.get_artist(artist.id).await.unwrap();
        assert_eq!(loaded, artist);
        assert_eq!(service.list_artists().await.unwrap(), vec![artist]);
    }

    #[tokio::test]
    async fn test_invalid_artist_is_not_stored() {
        let service = MarketplaceService::in_memory();
        let result = service.create_artist(CreateArtist::new("", 100, 1)).await;

        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        assert!(service.list_artists().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_customer() {
        let service = MarketplaceService::in_memory();
        let id = CustomerId::new();

        let err = service.get_customer(id).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("cannot read customer: customer {id} not found")
        );
    }

    #[tokio::test]
    async fn test_create_commission_snapshots_artist() {
        let (service, artist, customer) = setup(2).await;

        let commission = service
            .create_commission(CreateCommission::new(artist.id, customer.id))
            .await
            .unwrap();

        assert_eq!(commission.status(), CommissionStatus::Pending);
        assert_eq!(commission.price(), 15_000);
        assert_eq!(commission.remaining_revisions(), 2);
        assert_eq!(commission.artwork_url(), "");
        assert_eq!(
            service.get_commission(commission.id()).await.unwrap(),
            commission
        );
    }

    #[tokio::test]
    async fn test_transition_persists_result() {
        let (service, artist, customer) = setup(1).await;
        let commission = service
            .create_commission(CreateCommission::new(artist.id, customer.id))
            .await
            .unwrap();

        let accepted = service.accept_commission(commission.id()).await.unwrap();
        assert_eq!(accepted.status(), CommissionStatus::Accepted);

        let stored = service.get_commission(commission.id()).await.unwrap();
        assert_eq!(stored.status(), CommissionStatus::Accepted);
        assert!(stored.updated_at() >= commission.updated_at());
    }

    #[tokio::test]
    async fn test_denied_transition_is_not_persisted() {
        let (service, artist, customer) = setup(1).await;
        let commission = service
            .create_commission(CreateCommission::new(artist.id, customer.id))
            .await
            .unwrap();

        let err = service.approve_commission(commission.id()).await.unwrap_err();
        assert_eq!(err.kind(), "invalid_transaction");
        assert_eq!(
            err.to_string(),
            "cannot approve: commission has yet to be accepted"
        );
        assert_eq!(
            service.get_commission(commission.id()).await.unwrap(),
            commission
        );
    }

    #[tokio::test]
    async fn test_transition_on_missing_commission() {
        let service = MarketplaceService::in_memory();
        let id = CommissionId::new();

        let err = service.cancel_commission(id).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound {
                entity: "commission",
                operation: "cancel",
                ..
            }
        ));
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[tokio::test]
    async fn test_commissions_filtered_by_party() {
        let (service, artist, customer) = setup(1).await;
        let other_artist = service
            .create_artist(CreateArtist::new("Juno", 900, 0))
            .await
            .unwrap();

        let first = service
            .create_commission(CreateCommission::new(artist.id, customer.id))
            .await
            .unwrap();
        let second = service
            .create_commission(CreateCommission::new(other_artist.id, customer.id))
            .await
            .unwrap();

        let for_artist = service.list_commissions_for_artist(artist.id).await.unwrap();
        assert_eq!(for_artist, vec![first.clone()]);

        let for_customer = service
            .list_commissions_for_customer(customer.id)
            .await
            .unwrap();
        assert_eq!(for_customer.len(), 2);
        assert!(for_customer.contains(&first));
        assert!(for_customer.contains(&second));

        let missing = service.list_commissions_for_artist(ArtistId::new()).await;
        assert!(matches!(missing, Err(DomainError::NotFound { .. })));
    }
}
