use super::repository;
use crate::shared::error::ServiceError;
use contracts::domain::a001_resume::aggregate::{Resume, ResumeDto};
use contracts::domain::common::RecordId;

/// Create a new resume
pub async fn create(dto: ResumeDto) -> anyhow::Result<Resume> {
    dto.validate().map_err(ServiceError::Invalid)?;
    let resume = repository::insert(&dto).await?;
    tracing::info!("Created resume {}", resume.id);
    Ok(resume)
}

/// Replace a resume; `None` when it does not exist
pub async fn update(id: RecordId, dto: ResumeDto) -> anyhow::Result<Option<Resume>> {
    dto.validate().map_err(ServiceError::Invalid)?;
    repository::update(id, &dto).await
}

pub async fn delete(id: RecordId) -> anyhow::Result<Option<Resume>> {
    let deleted = repository::delete(id).await?;
    if deleted.is_some() {
        tracing::info!("Deleted resume {}", id);
    }
    Ok(deleted)
}

pub async fn get_by_id(id: RecordId) -> anyhow::Result<Option<Resume>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Resume>> {
    repository::list_all().await
}
