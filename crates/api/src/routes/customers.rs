//! Customer registration and lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::{CreateCustomer, Customer};
use serde::Deserialize;

use super::commissions::{CommissionResponse, to_responses};
use super::parse_id;
use crate::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
}

/// POST /customers: register a new customer.
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let Json(req) = payload?;
    let customer = state
        .service
        .create_customer(CreateCustomer::new(req.name))
        .await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET /customers
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(state.service.list_customers().await?))
}

/// GET /customers/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(state.service.get_customer(parse_id(&id)?).await?))
}

/// GET /customers/{id}/commissions: commissions this customer has requested.
#[tracing::instrument(skip(state))]
pub async fn commissions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CommissionResponse>>, ApiError> {
    let commissions = state
        .service
        .list_commissions_for_customer(parse_id(&id)?)
        .await?;
    Ok(Json(to_responses(commissions)))
}
