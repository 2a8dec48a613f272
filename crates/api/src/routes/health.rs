//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::AppState;
use crate::error::ApiError;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub commissions: usize,
}

/// GET /health: returns system health status and the ledger size.
pub async fn check(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, ApiError> {
    let commissions = state.service.commission_count().await?;
    Ok(Json(HealthResponse {
        status: "ok",
        commissions,
    }))
}
