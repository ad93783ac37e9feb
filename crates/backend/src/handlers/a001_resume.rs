use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_resume::aggregate::{Resume, ResumeDto};
use contracts::domain::common::RecordId;

use super::reject;
use crate::domain::a001_resume;

/// GET /api/resumes
pub async fn list_all() -> Result<Json<Vec<Resume>>, StatusCode> {
    a001_resume::service::list_all()
        .await
        .map(Json)
        .map_err(|e| reject("list resumes", e))
}

/// GET /api/resumes/:id
pub async fn get_by_id(Path(id): Path<RecordId>) -> Result<Json<Resume>, StatusCode> {
    match a001_resume::service::get_by_id(id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(reject("read resume", e)),
    }
}

/// POST /api/resumes
pub async fn create(Json(dto): Json<ResumeDto>) -> Result<Json<Resume>, StatusCode> {
    a001_resume::service::create(dto)
        .await
        .map(Json)
        .map_err(|e| reject("create resume", e))
}

/// PUT /api/resumes/:id
pub async fn update(
    Path(id): Path<RecordId>,
    Json(dto): Json<ResumeDto>,
) -> Result<Json<Resume>, StatusCode> {
    match a001_resume::service::update(id, dto).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(reject("update resume", e)),
    }
}

/// DELETE /api/resumes/:id
pub async fn delete(Path(id): Path<RecordId>) -> Result<Json<Resume>, StatusCode> {
    match a001_resume::service::delete(id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(reject("delete resume", e)),
    }
}
