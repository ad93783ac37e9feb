//! Field templates (as declared) and field descriptors (as resolved)

use std::collections::HashMap;

use serde::Serialize;

use super::definition::EntityFormDef;
use super::field_kind::{FieldKind, FieldValue};
use super::registry::RegistryError;

/// Parent-agnostic field declaration.
///
/// A foreign key only names its target entity here; how the target is
/// identified and labelled is known once every form is declared.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTemplate {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<FieldValue>,
    pub target_entity: Option<String>,
}

impl FieldTemplate {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            default: None,
            target_entity: None,
        }
    }

    pub fn short_text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::ShortText)
    }

    pub fn long_text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::LongText)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn foreign_key(name: impl Into<String>, target_entity: impl Into<String>) -> Self {
        Self {
            target_entity: Some(target_entity.into()),
            ..Self::new(name, FieldKind::ForeignKey)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: FieldValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Turn the template into a descriptor owned by `owner`.
    ///
    /// `declared` must hold every entity form of the application; foreign
    /// keys copy their target's id field, label field and inline-create flag.
    pub fn resolve(
        &self,
        owner: &str,
        declared: &HashMap<&str, &EntityFormDef>,
    ) -> Result<FieldDescriptor, RegistryError> {
        if let Some(default) = &self.default {
            if !default.fits(self.kind) {
                return Err(RegistryError::DefaultKindMismatch {
                    entity: owner.to_string(),
                    field: self.name.clone(),
                    kind: self.kind.as_str(),
                });
            }
        }

        let target = if self.kind.is_foreign_key() {
            let target_name =
                self.target_entity
                    .as_deref()
                    .ok_or_else(|| RegistryError::MissingTarget {
                        entity: owner.to_string(),
                        field: self.name.clone(),
                    })?;
            let target_def =
                declared
                    .get(target_name)
                    .ok_or_else(|| RegistryError::UnknownTarget {
                        entity: owner.to_string(),
                        field: self.name.clone(),
                        target: target_name.to_string(),
                    })?;
            Some(ForeignKeyTarget {
                entity: target_def.entity_name.clone(),
                id_field: target_def.id_field.clone(),
                label_field: target_def.label_field.clone(),
                allows_inline_create: target_def.allow_inline_create,
            })
        } else {
            None
        };

        Ok(FieldDescriptor {
            name: self.name.clone(),
            kind: self.kind,
            required: self.required,
            default: self.default.clone(),
            owner_entity: owner.to_string(),
            target,
        })
    }
}

/// What a foreign-key field points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyTarget {
    pub entity: String,
    pub id_field: String,
    pub label_field: String,
    pub allows_inline_create: bool,
}

/// Immutable, fully resolved description of one form input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
    pub owner_entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ForeignKeyTarget>,
}

impl FieldDescriptor {
    /// Human readable title, e.g. `date_submitted` -> `Date Submitted`
    pub fn title(&self) -> String {
        self.name
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn target_entity(&self) -> Option<&str> {
        self.target.as_ref().map(|t| t.entity.as_str())
    }

    pub fn allows_inline_create(&self) -> bool {
        self.target
            .as_ref()
            .map(|t| t.allows_inline_create)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(defs: &[EntityFormDef]) -> HashMap<&str, &EntityFormDef> {
        defs.iter().map(|d| (d.entity_name.as_str(), d)).collect()
    }

    #[test]
    fn test_plain_template_resolves_by_copy() {
        let defs = vec![EntityFormDef::new("postings")];
        let template = FieldTemplate::number("salary").with_default(FieldValue::Number(50000.0));

        let field = template.resolve("postings", &declared(&defs)).unwrap();

        assert_eq!(field.kind, template.kind);
        assert_eq!(field.required, template.required);
        assert_eq!(field.default, template.default);
        assert_eq!(field.owner_entity, "postings");
        assert!(field.target.is_none());
    }

    #[test]
    fn test_foreign_key_copies_target_definition() {
        let defs = vec![
            EntityFormDef::new("resumes").label_field("data").inline_create(true),
            EntityFormDef::new("applications"),
        ];
        let template = FieldTemplate::foreign_key("resume_id", "resumes").required();

        let field = template.resolve("applications", &declared(&defs)).unwrap();

        assert_eq!(
            field.target,
            Some(ForeignKeyTarget {
                entity: "resumes".into(),
                id_field: "id".into(),
                label_field: "data".into(),
                allows_inline_create: true,
            })
        );
    }

    #[test]
    fn test_foreign_key_without_target_is_rejected() {
        let defs = vec![EntityFormDef::new("applications")];
        let template = FieldTemplate::new("resume_id", FieldKind::ForeignKey);

        let err = template.resolve("applications", &declared(&defs)).unwrap_err();
        assert!(matches!(err, RegistryError::MissingTarget { .. }));
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        let defs = vec![EntityFormDef::new("applications")];
        let template = FieldTemplate::foreign_key("resume_id", "resumes");

        let err = template.resolve("applications", &declared(&defs)).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownTarget { ref target, .. } if target == "resumes"));
    }

    #[test]
    fn test_default_must_fit_kind() {
        let defs = vec![EntityFormDef::new("postings")];
        let template = FieldTemplate::boolean("remote").with_default(FieldValue::Text("yes".into()));

        let err = template.resolve("postings", &declared(&defs)).unwrap_err();
        assert!(matches!(err, RegistryError::DefaultKindMismatch { .. }));
    }

    #[test]
    fn test_title() {
        let defs = vec![EntityFormDef::new("applications")];
        let field = FieldTemplate::date("date_submitted")
            .resolve("applications", &declared(&defs))
            .unwrap();
        assert_eq!(field.title(), "Date Submitted");
    }
}
