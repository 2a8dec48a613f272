use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a registered artist.
    ArtistId
);

entity_id!(
    /// Unique identifier for a registered customer.
    CustomerId
);

entity_id!(
    /// Unique identifier for a commission.
    ///
    /// Commissions are never deleted, so a commission ID stays resolvable
    /// for the lifetime of the ledger.
    CommissionId
);

/// Source of fresh, opaque identifiers.
///
/// Uniqueness is assumed rather than checked: collisions are treated as
/// impossible for the UUID v4 space.
pub trait IdGenerator: Send + Sync {
    fn artist_id(&self) -> ArtistId;
    fn customer_id(&self) -> CustomerId;
    fn commission_id(&self) -> CommissionId;
}

/// Random (v4) UUID generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn artist_id(&self) -> ArtistId {
        ArtistId::new()
    }

    fn customer_id(&self) -> CustomerId {
        CustomerId::new()
    }

    fn commission_id(&self) -> CommissionId {
        CommissionId::new()
    }
}
