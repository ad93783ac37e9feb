use super::repository;
use crate::domain::{a001_resume, a002_posting};
use crate::shared::error::ServiceError;
use contracts::domain::a001_resume::aggregate::Resume;
use contracts::domain::a002_posting::aggregate::Posting;
use contracts::domain::a003_application::aggregate::{Application, ApplicationDto};
use contracts::domain::common::{AggregateRoot, RecordId};

/// Both referenced records must exist
async fn ensure_parents(dto: &ApplicationDto) -> anyhow::Result<()> {
    if !a002_posting::repository::exists(dto.posting_id).await? {
        return Err(ServiceError::MissingParent {
            entity: Posting::collection_name(),
            id: dto.posting_id,
        }
        .into());
    }
    if !a001_resume::repository::exists(dto.resume_id).await? {
        return Err(ServiceError::MissingParent {
            entity: Resume::collection_name(),
            id: dto.resume_id,
        }
        .into());
    }
    Ok(())
}

/// Create a new application
pub async fn create(dto: ApplicationDto) -> anyhow::Result<Application> {
    ensure_parents(&dto).await?;
    let application = repository::insert(&dto).await?;
    tracing::info!(
        "Created application {} (posting {}, resume {})",
        application.id,
        application.posting_id,
        application.resume_id
    );
    Ok(application)
}

/// Replace an application; `None` when it does not exist
pub async fn update(id: RecordId, dto: ApplicationDto) -> anyhow::Result<Option<Application>> {
    ensure_parents(&dto).await?;
    repository::update(id, &dto).await
}

pub async fn delete(id: RecordId) -> anyhow::Result<Option<Application>> {
    let deleted = repository::delete(id).await?;
    if deleted.is_some() {
        tracing::info!("Deleted application {}", id);
    }
    Ok(deleted)
}

pub async fn get_by_id(id: RecordId) -> anyhow::Result<Option<Application>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Application>> {
    repository::list_all().await
}
