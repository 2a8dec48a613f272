//! API error types with HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request from the client, caught before reaching the service.
    #[error("{0}")]
    BadRequest(String),

    /// Error returned by the marketplace service.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    /// HTTP status and machine-readable kind for this error.
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            ApiError::Domain(err) => {
                let status = match err {
                    DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                    DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                    DomainError::InvalidTransaction { .. } => StatusCode::CONFLICT,
                    DomainError::NoRemainingRevision { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    DomainError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.kind())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %message, kind, "internal server error");
        }

        let body = serde_json::json!({ "error": message, "kind": kind });
        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use domain::CommissionOperation;

    use super::*;

    fn status_of(err: DomainError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_domain_errors_map_to_status_codes() {
        assert_eq!(
            status_of(DomainError::NotFound {
                entity: "artist",
                id: "x".to_string(),
                operation: "read artist",
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DomainError::InvalidInput("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::InvalidTransaction {
                operation: CommissionOperation::Accept,
                reason: "commission has been rejected",
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DomainError::NoRemainingRevision {
                operation: CommissionOperation::RequestRevision,
                reason: "no more revision can be made",
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_bad_request_reports_invalid_input_kind() {
        let err = ApiError::BadRequest("Invalid ID format".to_string());
        assert_eq!(
            err.status_and_kind(),
            (StatusCode::BAD_REQUEST, "invalid_input")
        );
    }
}
