use thiserror::Error;

/// Errors that can occur when interacting with an entity store.
#[derive(Debug, Error)]
pub enum EntityStoreError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for entity store operations.
pub type Result<T> = std::result::Result<T, EntityStoreError>;
