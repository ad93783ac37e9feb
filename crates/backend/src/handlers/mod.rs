pub mod a001_resume;
pub mod a002_posting;
pub mod a003_application;
pub mod a004_response_type;
pub mod a005_response;
pub mod fields;

use axum::http::StatusCode;

use crate::shared::error::status_of;

/// Log a failed service call and pick its status
fn reject(action: &str, err: anyhow::Error) -> StatusCode {
    let status = status_of(&err);
    if status.is_server_error() {
        tracing::error!("Failed to {}: {:#}", action, err);
    } else {
        tracing::warn!("Rejected {}: {}", action, err);
    }
    status
}
