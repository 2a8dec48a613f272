//! HTTP API server with observability for the commission marketplace.
//!
//! Provides REST endpoints for artists, customers, and the commission
//! lifecycle, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::MarketplaceService;
use entity_store::{Namespace, PgPool, PostgresEntityStore};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub service: MarketplaceService,
}

impl AppState {
    /// State backed by fresh in-memory stores.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self {
            service: MarketplaceService::in_memory(),
        })
    }

    /// State backed by PostgreSQL, one namespace per entity kind.
    pub fn postgres(pool: PgPool) -> Arc<Self> {
        let service = MarketplaceService::new(
            Arc::new(PostgresEntityStore::new(pool.clone(), Namespace::Artists)),
            Arc::new(PostgresEntityStore::new(pool.clone(), Namespace::Customers)),
            Arc::new(PostgresEntityStore::new(pool, Namespace::Commissions)),
        );
        Arc::new(Self { service })
    }
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/artists",
            post(routes::artists::create).get(routes::artists::list),
        )
        .route("/artists/{id}", get(routes::artists::get))
        .route("/artists/{id}/commissions", get(routes::artists::commissions))
        .route(
            "/customers",
            post(routes::customers::create).get(routes::customers::list),
        )
        .route("/customers/{id}", get(routes::customers::get))
        .route(
            "/customers/{id}/commissions",
            get(routes::customers::commissions),
        )
        .route(
            "/commissions",
            post(routes::commissions::create).get(routes::commissions::list),
        )
        .route("/commissions/{id}", get(routes::commissions::get))
        .route("/commissions/{id}/accept", post(routes::commissions::accept))
        .route("/commissions/{id}/reject", post(routes::commissions::reject))
        .route(
            "/commissions/{id}/artwork",
            post(routes::commissions::submit_artwork),
        )
        .route(
            "/commissions/{id}/revision",
            post(routes::commissions::request_revision),
        )
        .route(
            "/commissions/{id}/approve",
            post(routes::commissions::approve),
        )
        .route("/commissions/{id}/cancel", post(routes::commissions::cancel))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
