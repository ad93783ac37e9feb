use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, RecordId};
use crate::shared::forms::{EntityFormDef, FieldTemplate};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Job posting found on some platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub id: RecordId,
    pub platform: String,
    pub company: String,
    pub title: String,
    pub salary: Option<f64>,
    pub description: Option<String>,
    pub responsibilities: String,
    pub qualifications: String,
    pub remote: Option<bool>,
}

impl AggregateRoot for Posting {
    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "postings"
    }

    fn element_name() -> &'static str {
        "Posting"
    }

    fn list_name() -> &'static str {
        "Postings"
    }

    fn form_definition() -> EntityFormDef {
        EntityFormDef::new(Self::collection_name())
            .label_field("title")
            .inline_create(true)
            .field(FieldTemplate::short_text("platform").required())
            .field(FieldTemplate::short_text("company").required())
            .field(FieldTemplate::short_text("title").required())
            .field(FieldTemplate::number("salary"))
            .field(FieldTemplate::long_text("description"))
            .field(FieldTemplate::long_text("responsibilities").required())
            .field(FieldTemplate::long_text("qualifications").required())
            .field(FieldTemplate::boolean("remote"))
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for creating/updating a posting
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PostingDto {
    pub platform: String,
    pub company: String,
    pub title: String,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    pub responsibilities: String,
    pub qualifications: String,
    #[serde(default)]
    pub remote: Option<bool>,
}

impl PostingDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.platform.trim().is_empty() {
            return Err("Platform must not be empty".into());
        }
        if self.company.trim().is_empty() {
            return Err("Company must not be empty".into());
        }
        if self.title.trim().is_empty() {
            return Err("Title must not be empty".into());
        }
        if self.responsibilities.trim().is_empty() {
            return Err("Responsibilities must not be empty".into());
        }
        if self.qualifications.trim().is_empty() {
            return Err("Qualifications must not be empty".into());
        }
        if let Some(salary) = self.salary {
            if !salary.is_finite() || salary < 0.0 {
                return Err("Salary must be a non-negative number".into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> PostingDto {
        PostingDto {
            platform: "LinkedIn".into(),
            company: "Acme".into(),
            title: "Engineer".into(),
            salary: Some(50000.0),
            description: None,
            responsibilities: "Build things".into(),
            qualifications: "Rust".into(),
            remote: Some(true),
        }
    }

    #[test]
    fn test_validate_accepts_complete_posting() {
        assert!(dto().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let mut d = dto();
        d.title = "  ".into();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_qualifications() {
        let mut d = dto();
        d.qualifications = String::new();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_salary() {
        let mut d = dto();
        d.salary = Some(-1.0);
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_optional_fields_may_be_omitted() {
        let d: PostingDto = serde_json::from_str(
            r#"{"platform":"p","company":"c","title":"t","responsibilities":"r","qualifications":"q"}"#,
        )
        .unwrap();
        assert_eq!(d.salary, None);
        assert_eq!(d.remote, None);
    }
}
