//! Commission request and lifecycle endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{ArtistId, CommissionId, CustomerId};
use domain::{Commission, CommissionOperation, CommissionStatus, CreateCommission, SubmitArtwork};
use serde::{Deserialize, Serialize};

use super::parse_id;
use crate::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateCommissionRequest {
    pub artist_id: String,
    pub customer_id: String,
}

#[derive(Deserialize)]
pub struct SubmitArtworkRequest {
    pub url: String,
}

// -- Response types --

#[derive(Debug, Serialize)]
pub struct CommissionResponse {
    pub id: CommissionId,
    pub artist_id: ArtistId,
    pub customer_id: CustomerId,
    pub price: u64,
    pub remaining_revisions: u8,
    pub artwork_url: String,
    pub status: CommissionStatus,
    pub is_terminal: bool,
    pub available_operations: Vec<CommissionOperation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Commission> for CommissionResponse {
    fn from(c: Commission) -> Self {
        Self {
            id: c.id(),
            artist_id: c.artist_id(),
            customer_id: c.customer_id(),
            price: c.price(),
            remaining_revisions: c.remaining_revisions(),
            artwork_url: c.artwork_url().to_string(),
            status: c.status(),
            is_terminal: c.is_terminal(),
            available_operations: c.available_operations(),
            created_at: c.created_at(),
            updated_at: c.updated_at(),
        }
    }
}

pub(crate) fn to_responses(commissions: Vec<Commission>) -> Vec<CommissionResponse> {
    commissions.into_iter().map(CommissionResponse::from).collect()
}

// -- Handlers --

/// POST /commissions: request a commission from an artist.
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateCommissionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CommissionResponse>), ApiError> {
    let Json(req) = payload?;
    let cmd = CreateCommission::new(parse_id(&req.artist_id)?, parse_id(&req.customer_id)?);

    let commission = state.service.create_commission(cmd).await?;
    Ok((StatusCode::CREATED, Json(commission.into())))
}

/// GET /commissions: list every commission in the ledger.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CommissionResponse>>, ApiError> {
    let commissions = state.service.list_commissions().await?;
    Ok(Json(to_responses(commissions)))
}

/// GET /commissions/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CommissionResponse>, ApiError> {
    let commission = state.service.get_commission(parse_id(&id)?).await?;
    Ok(Json(commission.into()))
}

/// POST /commissions/{id}/accept
#[tracing::instrument(skip(state))]
pub async fn accept(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CommissionResponse>, ApiError> {
    let commission = state.service.accept_commission(parse_id(&id)?).await?;
    Ok(Json(commission.into()))
}

/// POST /commissions/{id}/reject
#[tracing::instrument(skip(state))]
pub async fn reject(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CommissionResponse>, ApiError> {
    let commission = state.service.reject_commission(parse_id(&id)?).await?;
    Ok(Json(commission.into()))
}

/// POST /commissions/{id}/artwork: deliver (or replace) the artwork URL.
#[tracing::instrument(skip(state, payload))]
pub async fn submit_artwork(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<SubmitArtworkRequest>, JsonRejection>,
) -> Result<Json<CommissionResponse>, ApiError> {
    let commission_id = parse_id(&id)?;
    let Json(req) = payload?;

    let commission = state
        .service
        .submit_artwork(SubmitArtwork::new(commission_id, req.url))
        .await?;
    Ok(Json(commission.into()))
}

/// POST /commissions/{id}/revision
#[tracing::instrument(skip(state))]
pub async fn request_revision(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CommissionResponse>, ApiError> {
    let commission = state.service.request_revision(parse_id(&id)?).await?;
    Ok(Json(commission.into()))
}

/// POST /commissions/{id}/approve
#[tracing::instrument(skip(state))]
pub async fn approve(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CommissionResponse>, ApiError> {
    let commission = state.service.approve_commission(parse_id(&id)?).await?;
    Ok(Json(commission.into()))
}

/// POST /commissions/{id}/cancel
#[tracing::instrument(skip(state))]
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CommissionResponse>, ApiError> {
    let commission = state.service.cancel_commission(parse_id(&id)?).await?;
    Ok(Json(commission.into()))
}
