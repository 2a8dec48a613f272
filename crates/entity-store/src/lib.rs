pub mod error;
pub mod memory;
pub mod namespace;
pub mod postgres;
pub mod store;

pub use error::{EntityStoreError, Result};
pub use memory::InMemoryEntityStore;
pub use namespace::Namespace;
pub use postgres::{PostgresEntityStore, connect, run_migrations};
pub use sqlx::PgPool;
pub use store::{EntityKey, EntityStore, EntityValue, SharedStore};
