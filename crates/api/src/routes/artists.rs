//! Artist registration and lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::{Artist, CreateArtist};
use serde::Deserialize;

use super::commissions::{CommissionResponse, to_responses};
use super::parse_id;
use crate::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct CreateArtistRequest {
    pub name: String,
    pub price: u64,
    pub revision_budget: u8,
}

/// POST /artists: register a new artist.
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateArtistRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Artist>), ApiError> {
    let Json(req) = payload?;
    let artist = state
        .service
        .create_artist(CreateArtist::new(req.name, req.price, req.revision_budget))
        .await?;
    Ok((StatusCode::CREATED, Json(artist)))
}

/// GET /artists
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Artist>>, ApiError> {
    Ok(Json(state.service.list_artists().await?))
}

/// GET /artists/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Artist>, ApiError> {
    Ok(Json(state.service.get_artist(parse_id(&id)?).await?))
}

/// GET /artists/{id}/commissions: commissions requested from this artist.
#[tracing::instrument(skip(state))]
pub async fn commissions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CommissionResponse>>, ApiError> {
    let commissions = state
        .service
        .list_commissions_for_artist(parse_id(&id)?)
        .await?;
    Ok(Json(to_responses(commissions)))
}
