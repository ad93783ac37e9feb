use super::repository;
use crate::shared::error::ServiceError;
use contracts::domain::a004_response_type::aggregate::{ResponseType, ResponseTypeDto};
use contracts::domain::common::RecordId;

pub async fn create(dto: ResponseTypeDto) -> anyhow::Result<ResponseType> {
    dto.validate().map_err(ServiceError::Invalid)?;
    let response_type = repository::insert(&dto).await?;
    tracing::info!("Created response type {} ({})", response_type.id, response_type.name);
    Ok(response_type)
}

pub async fn update(id: RecordId, dto: ResponseTypeDto) -> anyhow::Result<Option<ResponseType>> {
    dto.validate().map_err(ServiceError::Invalid)?;
    repository::update(id, &dto).await
}

pub async fn delete(id: RecordId) -> anyhow::Result<Option<ResponseType>> {
    repository::delete(id).await
}

pub async fn get_by_id(id: RecordId) -> anyhow::Result<Option<ResponseType>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<ResponseType>> {
    repository::list_all().await
}
