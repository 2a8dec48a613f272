use common::CommissionId;
use criterion::{Criterion, criterion_group, criterion_main};
use entity_store::{EntityStore, InMemoryEntityStore};

fn bench_put(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store: InMemoryEntityStore<CommissionId, serde_json::Value> = InMemoryEntityStore::new();

    c.bench_function("entity_store/put", |b| {
        b.iter(|| {
            rt.block_on(async {
                store
                    .put(CommissionId::new(), serde_json::json!({"price": 1500}))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_get(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store: InMemoryEntityStore<CommissionId, serde_json::Value> = InMemoryEntityStore::new();
    let id = CommissionId::new();
    rt.block_on(async {
        for _ in 0..1000 {
            store
                .put(CommissionId::new(), serde_json::json!({"price": 1500}))
                .await
                .unwrap();
        }
        store
            .put(id, serde_json::json!({"price": 1500}))
            .await
            .unwrap();
    });

    c.bench_function("entity_store/get_from_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                store.get(&id).await.unwrap();
            });
        });
    });
}

fn bench_values(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store: InMemoryEntityStore<CommissionId, serde_json::Value> = InMemoryEntityStore::new();
    rt.block_on(async {
        for _ in 0..1000 {
            store
                .put(CommissionId::new(), serde_json::json!({"price": 1500}))
                .await
                .unwrap();
        }
    });

    c.bench_function("entity_store/values_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                store.values().await.unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_put, bench_get, bench_values);
criterion_main!(benches);
