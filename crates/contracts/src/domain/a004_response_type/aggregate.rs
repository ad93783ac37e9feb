use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, RecordId};
use crate::shared::forms::{EntityFormDef, FieldTemplate};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Classification of a response: interview invite, rejection, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseType {
    pub id: RecordId,
    pub name: String,
}

impl AggregateRoot for ResponseType {
    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "response_types"
    }

    fn element_name() -> &'static str {
        "Response Type"
    }

    fn list_name() -> &'static str {
        "Response Types"
    }

    // Response types are a small fixed vocabulary, maintained on their own page
    fn form_definition() -> EntityFormDef {
        EntityFormDef::new(Self::collection_name())
            .label_field("name")
            .inline_create(false)
            .field(FieldTemplate::short_text("name").required())
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for creating/updating a response type
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResponseTypeDto {
    pub name: String,
}

impl ResponseTypeDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Response type name must not be empty".into());
        }
        Ok(())
    }
}
