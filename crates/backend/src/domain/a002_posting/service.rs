use super::repository;
use crate::shared::error::ServiceError;
use contracts::domain::a002_posting::aggregate::{Posting, PostingDto};
use contracts::domain::common::RecordId;

/// Create a new posting
pub async fn create(dto: PostingDto) -> anyhow::Result<Posting> {
    dto.validate().map_err(ServiceError::Invalid)?;
    let posting = repository::insert(&dto).await?;
    tracing::info!("Created posting {} ({} at {})", posting.id, posting.title, posting.company);
    Ok(posting)
}

/// Replace a posting; `None` when it does not exist
pub async fn update(id: RecordId, dto: PostingDto) -> anyhow::Result<Option<Posting>> {
    dto.validate().map_err(ServiceError::Invalid)?;
    repository::update(id, &dto).await
}

pub async fn delete(id: RecordId) -> anyhow::Result<Option<Posting>> {
    let deleted = repository::delete(id).await?;
    if deleted.is_some() {
        tracing::info!("Deleted posting {}", id);
    }
    Ok(deleted)
}

pub async fn get_by_id(id: RecordId) -> anyhow::Result<Option<Posting>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Posting>> {
    repository::list_all().await
}
