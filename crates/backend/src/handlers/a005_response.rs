use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a005_response::aggregate::{Response, ResponseDto};
use contracts::domain::common::RecordId;

use super::reject;
use crate::domain::a005_response;

/// GET /api/responses
pub async fn list_all() -> Result<Json<Vec<Response>>, StatusCode> {
    a005_response::service::list_all()
        .await
        .map(Json)
        .map_err(|e| reject("list responses", e))
}

/// GET /api/responses/:id
pub async fn get_by_id(Path(id): Path<RecordId>) -> Result<Json<Response>, StatusCode> {
    match a005_response::service::get_by_id(id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(reject("read response", e)),
    }
}

/// POST /api/responses
pub async fn create(Json(dto): Json<ResponseDto>) -> Result<Json<Response>, StatusCode> {
    a005_response::service::create(dto)
        .await
        .map(Json)
        .map_err(|e| reject("create response", e))
}

/// PUT /api/responses/:id
pub async fn update(
    Path(id): Path<RecordId>,
    Json(dto): Json<ResponseDto>,
) -> Result<Json<Response>, StatusCode> {
    match a005_response::service::update(id, dto).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(reject("update response", e)),
    }
}

/// DELETE /api/responses/:id
pub async fn delete(Path(id): Path<RecordId>) -> Result<Json<Response>, StatusCode> {
    match a005_response::service::delete(id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(reject("delete response", e)),
    }
}
