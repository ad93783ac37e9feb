use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, RecordId};
use crate::shared::forms::{EntityFormDef, FieldTemplate};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Resume text that applications are sent with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: RecordId,
    pub data: String,
}

impl AggregateRoot for Resume {
    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "resumes"
    }

    fn element_name() -> &'static str {
        "Resume"
    }

    fn list_name() -> &'static str {
        "Resumes"
    }

    fn form_definition() -> EntityFormDef {
        EntityFormDef::new(Self::collection_name())
            .label_field("data")
            .inline_create(true)
            .field(FieldTemplate::long_text("data").required())
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for creating/updating a resume
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResumeDto {
    pub data: String,
}

impl ResumeDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.data.trim().is_empty() {
            return Err("Resume text must not be empty".into());
        }
        Ok(())
    }
}
