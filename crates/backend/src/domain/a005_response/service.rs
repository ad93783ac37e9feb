use super::repository;
use crate::domain::{a003_application, a004_response_type};
use crate::shared::error::ServiceError;
use contracts::domain::a003_application::aggregate::Application;
use contracts::domain::a004_response_type::aggregate::ResponseType;
use contracts::domain::a005_response::aggregate::{Response, ResponseDto};
use contracts::domain::common::{AggregateRoot, RecordId};

async fn ensure_parents(dto: &ResponseDto) -> anyhow::Result<()> {
    if !a003_application::repository::exists(dto.application_id).await? {
        return Err(ServiceError::MissingParent {
            entity: Application::collection_name(),
            id: dto.application_id,
        }
        .into());
    }
    if !a004_response_type::repository::exists(dto.response_type_id).await? {
        return Err(ServiceError::MissingParent {
            entity: ResponseType::collection_name(),
            id: dto.response_type_id,
        }
        .into());
    }
    Ok(())
}

/// Record a response to an application
pub async fn create(dto: ResponseDto) -> anyhow::Result<Response> {
    ensure_parents(&dto).await?;
    let response = repository::insert(&dto).await?;
    tracing::info!(
        "Created response {} for application {}",
        response.id,
        response.application_id
    );
    Ok(response)
}

pub async fn update(id: RecordId, dto: ResponseDto) -> anyhow::Result<Option<Response>> {
    ensure_parents(&dto).await?;
    repository::update(id, &dto).await
}

pub async fn delete(id: RecordId) -> anyhow::Result<Option<Response>> {
    let deleted = repository::delete(id).await?;
    if deleted.is_some() {
        tracing::info!("Deleted response {}", id);
    }
    Ok(deleted)
}

pub async fn get_by_id(id: RecordId) -> anyhow::Result<Option<Response>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Response>> {
    repository::list_all().await
}
