use axum::{extract::Path, http::StatusCode, Json};
use contracts::shared::forms::catalog::build_registry;
use contracts::shared::forms::{EntityRegistry, FieldDescriptor, RegistryError};
use once_cell::sync::Lazy;

static REGISTRY: Lazy<Result<EntityRegistry, RegistryError>> = Lazy::new(build_registry);

/// The entity registry shared by every request; fails if the catalog is inconsistent
pub fn registry() -> anyhow::Result<&'static EntityRegistry> {
    REGISTRY
        .as_ref()
        .map_err(|e| anyhow::anyhow!("entity catalog is inconsistent: {}", e))
}

/// GET /api/fields/:entity
pub async fn get_fields(
    Path(entity): Path<String>,
) -> Result<Json<Vec<FieldDescriptor>>, StatusCode> {
    let registry = registry().map_err(|e| {
        tracing::error!("{:#}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let form = registry.get(&entity).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(form.fields.iter().map(|f| f.as_ref().clone()).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fields_of_known_entity() {
        let Json(fields) = get_fields(Path("applications".to_string())).await.unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["posting_id", "resume_id", "date_submitted"]);
        assert_eq!(fields[0].target_entity(), Some("postings"));
    }

    #[tokio::test]
    async fn test_fields_of_unknown_entity() {
        let err = get_fields(Path("widgets".to_string())).await.unwrap_err();
        assert_eq!(err, StatusCode::NOT_FOUND);
    }
}
