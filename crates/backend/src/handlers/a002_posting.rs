use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a002_posting::aggregate::{Posting, PostingDto};
use contracts::domain::common::RecordId;

use super::reject;
use crate::domain::a002_posting;

/// GET /api/postings
pub async fn list_all() -> Result<Json<Vec<Posting>>, StatusCode> {
    a002_posting::service::list_all()
        .await
        .map(Json)
        .map_err(|e| reject("list postings", e))
}

/// GET /api/postings/:id
pub async fn get_by_id(Path(id): Path<RecordId>) -> Result<Json<Posting>, StatusCode> {
    match a002_posting::service::get_by_id(id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(reject("read posting", e)),
    }
}

/// POST /api/postings
pub async fn create(Json(dto): Json<PostingDto>) -> Result<Json<Posting>, StatusCode> {
    a002_posting::service::create(dto)
        .await
        .map(Json)
        .map_err(|e| reject("create posting", e))
}

/// PUT /api/postings/:id
pub async fn update(
    Path(id): Path<RecordId>,
    Json(dto): Json<PostingDto>,
) -> Result<Json<Posting>, StatusCode> {
    match a002_posting::service::update(id, dto).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(reject("update posting", e)),
    }
}

/// DELETE /api/postings/:id
pub async fn delete(Path(id): Path<RecordId>) -> Result<Json<Posting>, StatusCode> {
    match a002_posting::service::delete(id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(reject("delete posting", e)),
    }
}
