//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency.
//! Run with:
//!
//! ```bash
//! cargo test -p entity-store --test postgres_integration -- --test-threads=1
//! ```

use std::sync::Arc;

use common::ArtistId;
use entity_store::{EntityStore, Namespace, PostgresEntityStore, run_migrations};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let temp_pool = PgPool::connect(&connection_string).await.unwrap();
            run_migrations(&temp_pool).await.unwrap();
            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh pool with the entities table cleared
async fn get_test_pool() -> PgPool {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    sqlx::query("TRUNCATE TABLE entities")
        .execute(&pool)
        .await
        .unwrap();

    pool
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Record {
    id: ArtistId,
    name: String,
    price: u64,
}

fn record(name: &str, price: u64) -> Record {
    Record {
        id: ArtistId::new(),
        name: name.to_string(),
        price,
    }
}

#[tokio::test]
async fn put_and_get_roundtrip() {
    let pool = get_test_pool().await;
    let store: PostgresEntityStore<ArtistId, Record> =
        PostgresEntityStore::new(pool, Namespace::Artists);

    let value = record("Alice", 1500);
    let previous = store.put(value.id, value.clone()).await.unwrap();
    assert_eq!(previous, None);

    let loaded = store.get(&value.id).await.unwrap();
    assert_eq!(loaded, Some(value));
}

#[tokio::test]
async fn put_overwrites_and_returns_previous() {
    let pool = get_test_pool().await;
    let store: PostgresEntityStore<ArtistId, Record> =
        PostgresEntityStore::new(pool, Namespace::Artists);

    let original = record("Alice", 1500);
    store.put(original.id, original.clone()).await.unwrap();

    let updated = Record {
        price: 2000,
        ..original.clone()
    };
    let previous = store.put(updated.id, updated.clone()).await.unwrap();

    assert_eq!(previous, Some(original));
    assert_eq!(store.get(&updated.id).await.unwrap(), Some(updated));
    assert_eq!(store.len().await.unwrap(), 1);
}

#[tokio::test]
async fn values_follow_key_order() {
    let pool = get_test_pool().await;
    let store: PostgresEntityStore<ArtistId, Record> =
        PostgresEntityStore::new(pool, Namespace::Artists);

    let mut records: Vec<_> = (0..5).map(|i| record(&format!("a{i}"), 100)).collect();
    for r in &records {
        store.put(r.id, r.clone()).await.unwrap();
    }
    records.sort_by_key(|r| r.id);

    let values = store.values().await.unwrap();
    assert_eq!(values, records);
}

#[tokio::test]
async fn namespaces_are_disjoint() {
    let pool = get_test_pool().await;
    let artists: PostgresEntityStore<ArtistId, Record> =
        PostgresEntityStore::new(pool.clone(), Namespace::Artists);
    let customers: PostgresEntityStore<ArtistId, Record> =
        PostgresEntityStore::new(pool, Namespace::Customers);

    let value = record("Alice", 1500);
    artists.put(value.id, value.clone()).await.unwrap();

    assert_eq!(customers.get(&value.id).await.unwrap(), None);
    assert!(customers.is_empty().await.unwrap());
    assert_eq!(artists.len().await.unwrap(), 1);
}

#[tokio::test]
async fn data_survives_new_store_instance() {
    let pool = get_test_pool().await;
    let value = record("Alice", 1500);

    {
        let store: PostgresEntityStore<ArtistId, Record> =
            PostgresEntityStore::new(pool.clone(), Namespace::Artists);
        store.put(value.id, value.clone()).await.unwrap();
    }

    let reopened: PostgresEntityStore<ArtistId, Record> =
        PostgresEntityStore::new(pool, Namespace::Artists);
    assert_eq!(reopened.get(&value.id).await.unwrap(), Some(value));
}

#[tokio::test]
async fn concurrent_first_writes_see_one_insert() {
    let pool = get_test_pool().await;
    let info = get_container_info().await;
    let other_pool = PgPool::connect(&info.connection_string).await.unwrap();

    let value = record("Alice", 1500);
    let mut handles = Vec::new();
    for i in 0..8 {
        // Alternate pools so writers do not share connections.
        let pool = if i % 2 == 0 {
            pool.clone()
        } else {
            other_pool.clone()
        };
        let value = Record {
            price: 1500 + i,
            ..value.clone()
        };
        handles.push(tokio::spawn(async move {
            let store: PostgresEntityStore<ArtistId, Record> =
                PostgresEntityStore::new(pool, Namespace::Artists);
            store.put(value.id, value).await.unwrap()
        }));
    }

    let mut inserts = 0;
    for handle in handles {
        if handle.await.unwrap().is_none() {
            inserts += 1;
        }
    }
    assert_eq!(inserts, 1);
}
