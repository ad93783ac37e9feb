//! Entity registry: every entity form, resolved once at startup
//!
//! The registry is immutable after [`EntityRegistry::build`] and is shared
//! by reference with every form tree instance.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use thiserror::Error;

use super::definition::EntityFormDef;
use super::field::FieldDescriptor;

/// Configuration errors found while building the registry.
/// All of them are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("entity `{0}` is declared more than once")]
    DuplicateEntity(String),

    #[error("field `{field}` is declared more than once in `{entity}`")]
    DuplicateField { entity: String, field: String },

    #[error("foreign key `{entity}.{field}` does not name a target entity")]
    MissingTarget { entity: String, field: String },

    #[error("foreign key `{entity}.{field}` references unknown entity `{target}`")]
    UnknownTarget {
        entity: String,
        field: String,
        target: String,
    },

    #[error("default of `{entity}.{field}` is not a {kind} value")]
    DefaultKindMismatch {
        entity: String,
        field: String,
        kind: &'static str,
    },

    #[error("inline creation forms a cycle: {}", path.join(" -> "))]
    InlineCycle { path: Vec<String> },
}

/// A resolved entity form
#[derive(Debug, Clone)]
pub struct EntityForm {
    pub entity_name: String,
    pub id_field: String,
    pub label_field: String,
    pub allow_inline_create: bool,
    pub fields: Vec<Arc<FieldDescriptor>>,
}

impl EntityForm {
    pub fn field(&self, name: &str) -> Option<&Arc<FieldDescriptor>> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Entity name -> resolved form, in declaration order
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    forms: Vec<EntityForm>,
    index: HashMap<String, usize>,
}

impl EntityRegistry {
    /// Resolve every template of every definition exactly once
    pub fn build(definitions: Vec<EntityFormDef>) -> Result<Self, RegistryError> {
        let mut declared: HashMap<&str, &EntityFormDef> = HashMap::new();
        for def in &definitions {
            if declared.insert(def.entity_name.as_str(), def).is_some() {
                return Err(RegistryError::DuplicateEntity(def.entity_name.clone()));
            }
        }

        let mut forms = Vec::with_capacity(definitions.len());
        for def in &definitions {
            let mut seen = HashSet::new();
            let mut fields = Vec::with_capacity(def.fields.len());
            for template in &def.fields {
                if !seen.insert(template.name.as_str()) {
                    return Err(RegistryError::DuplicateField {
                        entity: def.entity_name.clone(),
                        field: template.name.clone(),
                    });
                }
                fields.push(Arc::new(template.resolve(&def.entity_name, &declared)?));
            }
            forms.push(EntityForm {
                entity_name: def.entity_name.clone(),
                id_field: def.id_field.clone(),
                label_field: def.label_field.clone(),
                allow_inline_create: def.allow_inline_create,
                fields,
            });
        }

        let index = forms
            .iter()
            .enumerate()
            .map(|(i, f)| (f.entity_name.clone(), i))
            .collect();
        let registry = Self { forms, index };
        registry.check_inline_cycles()?;
        Ok(registry)
    }

    pub fn get(&self, entity: &str) -> Option<&EntityForm> {
        self.index.get(entity).map(|&i| &self.forms[i])
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.forms.iter().map(|f| f.entity_name.as_str())
    }

    /// Inline creation recurses along foreign keys whose target allows it;
    /// a cycle there would let splicing go on forever.
    fn check_inline_cycles(&self) -> Result<(), RegistryError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            OnPath,
            Finished,
        }

        fn visit(
            registry: &EntityRegistry,
            at: usize,
            marks: &mut [Mark],
            path: &mut Vec<String>,
        ) -> Result<(), RegistryError> {
            marks[at] = Mark::OnPath;
            path.push(registry.forms[at].entity_name.clone());

            for field in &registry.forms[at].fields {
                if !field.allows_inline_create() {
                    continue;
                }
                let Some(target) = field.target_entity() else {
                    continue;
                };
                let next = registry.index[target];
                match marks[next] {
                    Mark::OnPath => {
                        let start = path.iter().position(|p| p == target).unwrap_or(0);
                        let mut cycle = path[start..].to_vec();
                        cycle.push(target.to_string());
                        return Err(RegistryError::InlineCycle { path: cycle });
                    }
                    Mark::Unvisited => visit(registry, next, marks, path)?,
                    Mark::Finished => {}
                }
            }

            path.pop();
            marks[at] = Mark::Finished;
            Ok(())
        }

        let mut marks = vec![Mark::Unvisited; self.forms.len()];
        for start in 0..self.forms.len() {
            if marks[start] == Mark::Unvisited {
                visit(self, start, &mut marks, &mut Vec::new())?;
            }
        }
        Ok(())
    }
}
