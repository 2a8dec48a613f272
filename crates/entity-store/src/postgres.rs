use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::{
    Namespace, Result,
    store::{EntityKey, EntityStore, EntityValue},
};

/// PostgreSQL-backed entity store.
///
/// All namespaces share the `entities` table; each store instance is bound
/// to exactly one [`Namespace`]. Values are persisted as JSONB, so adding
/// fields with serde defaults keeps previously written rows readable.
pub struct PostgresEntityStore<K, V> {
    pool: PgPool,
    namespace: Namespace,
    _phantom: PhantomData<fn() -> (K, V)>,
}

impl<K, V> PostgresEntityStore<K, V> {
    /// Creates a store over `namespace` using the given pool.
    pub fn new(pool: PgPool, namespace: Namespace) -> Self {
        Self {
            pool,
            namespace,
            _phantom: PhantomData,
        }
    }
}

impl<K, V> Clone for PostgresEntityStore<K, V> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone(), self.namespace)
    }
}

/// Opens a connection pool to `database_url`.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    tracing::info!(max_connections, "connected to PostgreSQL");
    Ok(pool)
}

/// Runs the database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

#[async_trait]
impl<K: EntityKey, V: EntityValue> EntityStore<K, V> for PostgresEntityStore<K, V> {
    async fn put(&self, key: K, value: V) -> Result<Option<V>> {
        let key = key.to_string();
        let encoded = serde_json::to_value(&value)?;

        let mut tx = self.pool.begin().await?;

        // Row locks cannot cover a key that does not exist yet, so writers of
        // the same key queue on a transaction-scoped advisory lock instead.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1), hashtext($2))")
            .bind(self.namespace.as_str())
            .bind(&key)
            .execute(&mut *tx)
            .await?;

        let previous: Option<serde_json::Value> = sqlx::query_scalar(
            "SELECT value FROM entities WHERE namespace = $1 AND key = $2",
        )
        .bind(self.namespace.as_str())
        .bind(&key)
        .fetch_optional(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO entities (namespace, key, value, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (namespace, key) DO UPDATE SET
                value = EXCLUDED.value,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(self.namespace.as_str())
        .bind(&key)
        .bind(&encoded)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(namespace = %self.namespace, %key, overwrite = previous.is_some(), "entity stored");

        previous
            .map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }

    async fn get(&self, key: &K) -> Result<Option<V>> {
        let row: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT value FROM entities WHERE namespace = $1 AND key = $2")
                .bind(self.namespace.as_str())
                .bind(key.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }

    async fn values(&self) -> Result<Vec<V>> {
        let rows: Vec<serde_json::Value> = sqlx::query_scalar(
            r#"
            SELECT value
            FROM entities
            WHERE namespace = $1
            ORDER BY key COLLATE "C" ASC
            "#,
        )
        .bind(self.namespace.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|value| serde_json::from_value(value).map_err(Into::into))
            .collect()
    }

    async fn len(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM entities WHERE namespace = $1")
            .bind(self.namespace.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(usize::try_from(count).unwrap_or_default())
    }
}
