use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a001_resume::Resume;
use crate::domain::a002_posting::Posting;
use crate::domain::common::{AggregateRoot, RecordId};
use crate::shared::forms::{EntityFormDef, FieldTemplate};

// ============================================================================
// Aggregate Root
// ============================================================================

/// A resume sent to a posting on a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: RecordId,
    pub posting_id: RecordId,
    pub resume_id: RecordId,
    pub date_submitted: NaiveDate,
}

impl AggregateRoot for Application {
    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "applications"
    }

    fn element_name() -> &'static str {
        "Application"
    }

    fn list_name() -> &'static str {
        "Applications"
    }

    fn form_definition() -> EntityFormDef {
        EntityFormDef::new(Self::collection_name())
            .label_field("id")
            .inline_create(true)
            .field(FieldTemplate::foreign_key("posting_id", Posting::collection_name()).required())
            .field(FieldTemplate::foreign_key("resume_id", Resume::collection_name()).required())
            .field(FieldTemplate::date("date_submitted").required())
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for creating/updating an application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDto {
    pub posting_id: RecordId,
    pub resume_id: RecordId,
    pub date_submitted: NaiveDate,
}
