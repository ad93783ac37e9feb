use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a003_application::Application;
use crate::domain::a004_response_type::ResponseType;
use crate::domain::common::{AggregateRoot, RecordId};
use crate::shared::forms::{EntityFormDef, FieldTemplate};

// ============================================================================
// Aggregate Root
// ============================================================================

/// What came back for an application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: RecordId,
    pub application_id: RecordId,
    pub response_type_id: RecordId,
    pub date_received: NaiveDate,
    pub data: Option<String>,
}

impl AggregateRoot for Response {
    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "responses"
    }

    fn element_name() -> &'static str {
        "Response"
    }

    fn list_name() -> &'static str {
        "Responses"
    }

    fn form_definition() -> EntityFormDef {
        EntityFormDef::new(Self::collection_name())
            .label_field("id")
            .inline_create(true)
            .field(
                FieldTemplate::foreign_key("application_id", Application::collection_name())
                    .required(),
            )
            .field(
                FieldTemplate::foreign_key("response_type_id", ResponseType::collection_name())
                    .required(),
            )
            .field(FieldTemplate::date("date_received").required())
            .field(FieldTemplate::short_text("data"))
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for creating/updating a response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseDto {
    pub application_id: RecordId,
    pub response_type_id: RecordId,
    pub date_received: NaiveDate,
    #[serde(default)]
    pub data: Option<String>,
}
