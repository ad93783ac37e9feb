use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a004_response_type::aggregate::{ResponseType, ResponseTypeDto};
use contracts::domain::common::RecordId;

use super::reject;
use crate::domain::a004_response_type;

/// GET /api/response_types
pub async fn list_all() -> Result<Json<Vec<ResponseType>>, StatusCode> {
    a004_response_type::service::list_all()
        .await
        .map(Json)
        .map_err(|e| reject("list response_types", e))
}

/// GET /api/response_types/:id
pub async fn get_by_id(Path(id): Path<RecordId>) -> Result<Json<ResponseType>, StatusCode> {
    match a004_response_type::service::get_by_id(id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(reject("read response type", e)),
    }
}

/// POST /api/response_types
pub async fn create(Json(dto): Json<ResponseTypeDto>) -> Result<Json<ResponseType>, StatusCode> {
    a004_response_type::service::create(dto)
        .await
        .map(Json)
        .map_err(|e| reject("create response type", e))
}

/// PUT /api/response_types/:id
pub async fn update(
    Path(id): Path<RecordId>,
    Json(dto): Json<ResponseTypeDto>,
) -> Result<Json<ResponseType>, StatusCode> {
    match a004_response_type::service::update(id, dto).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(reject("update response type", e)),
    }
}

/// DELETE /api/response_types/:id
pub async fn delete(Path(id): Path<RecordId>) -> Result<Json<ResponseType>, StatusCode> {
    match a004_response_type::service::delete(id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(reject("delete response type", e)),
    }
}
