use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a003_application::aggregate::{Application, ApplicationDto};
use contracts::domain::common::RecordId;

use super::reject;
use crate::domain::a003_application;

/// GET /api/applications
pub async fn list_all() -> Result<Json<Vec<Application>>, StatusCode> {
    a003_application::service::list_all()
        .await
        .map(Json)
        .map_err(|e| reject("list applications", e))
}

/// GET /api/applications/:id
pub async fn get_by_id(Path(id): Path<RecordId>) -> Result<Json<Application>, StatusCode> {
    match a003_application::service::get_by_id(id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(reject("read application", e)),
    }
}

/// POST /api/applications
pub async fn create(Json(dto): Json<ApplicationDto>) -> Result<Json<Application>, StatusCode> {
    a003_application::service::create(dto)
        .await
        .map(Json)
        .map_err(|e| reject("create application", e))
}

/// PUT /api/applications/:id
pub async fn update(
    Path(id): Path<RecordId>,
    Json(dto): Json<ApplicationDto>,
) -> Result<Json<Application>, StatusCode> {
    match a003_application::service::update(id, dto).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(reject("update application", e)),
    }
}

/// DELETE /api/applications/:id
pub async fn delete(Path(id): Path<RecordId>) -> Result<Json<Application>, StatusCode> {
    match a003_application::service::delete(id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(reject("delete application", e)),
    }
}
