//! Failures a service reports to its handler

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Invalid(String),

    #[error("{entity} {id} does not exist")]
    MissingParent { entity: &'static str, id: i64 },
}

/// Status for a failed service call; anything unknown is a server error
pub fn status_of(err: &anyhow::Error) -> StatusCode {
    match err.downcast_ref::<ServiceError>() {
        Some(ServiceError::Invalid(_)) | Some(ServiceError::MissingParent { .. }) => {
            StatusCode::BAD_REQUEST
        }
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
