//! API error responses.
//!
//! Every failure serializes to the same body shape, a JSON object with
//! an `errors` array. Validation failures carry one entry per violated
//! field; everything else carries a single entry.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::directory::DirectoryError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub errors: Vec<String>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{}", .0.join(" "))]
    Validation(Vec<String>),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors) = match self {
            ApiError::Validation(violations) => (StatusCode::BAD_REQUEST, violations),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, vec![message]),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, vec![message]),
            ApiError::Internal(message) => {
                tracing::error!(%message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, vec![message])
            }
        };

        (status, Json(ErrorBody { errors })).into_response()
    }
}

// Messages held by DirectoryError are already written for clients;
// the raw store errors were logged where they happened.
impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Validation(violations) => ApiError::Validation(violations),
            DirectoryError::DoctorNotFound(message)
            | DirectoryError::PatientNotFound(message)
            | DirectoryError::AppointmentNotFound(message) => ApiError::NotFound(message),
            DirectoryError::InvalidDate(err) => ApiError::BadRequest(err.to_string()),
            DirectoryError::Save(message) | DirectoryError::Internal(message) => {
                ApiError::Internal(message)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
