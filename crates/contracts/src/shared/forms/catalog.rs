//! The job tracker's entity forms

use crate::domain::a001_resume::Resume;
use crate::domain::a002_posting::Posting;
use crate::domain::a003_application::Application;
use crate::domain::a004_response_type::ResponseType;
use crate::domain::a005_response::Response;
use crate::domain::common::AggregateRoot;

use super::{EntityFormDef, EntityRegistry, RegistryError};

/// Form declarations of every entity, in sidebar order
pub fn job_tracker_forms() -> Vec<EntityFormDef> {
    vec![
        Resume::form_definition(),
        Posting::form_definition(),
        Application::form_definition(),
        ResponseType::form_definition(),
        Response::form_definition(),
    ]
}

/// Build the registry shared by every form; called once at startup
pub fn build_registry() -> Result<EntityRegistry, RegistryError> {
    EntityRegistry::build(job_tracker_forms())
}

/// Singular and plural UI names of an entity
fn ui_names(entity: &str) -> Option<(&'static str, &'static str)> {
    match entity {
        e if e == Resume::collection_name() => Some((Resume::element_name(), Resume::list_name())),
        e if e == Posting::collection_name() => {
            Some((Posting::element_name(), Posting::list_name()))
        }
        e if e == Application::collection_name() => {
            Some((Application::element_name(), Application::list_name()))
        }
        e if e == ResponseType::collection_name() => {
            Some((ResponseType::element_name(), ResponseType::list_name()))
        }
        e if e == Response::collection_name() => {
            Some((Response::element_name(), Response::list_name()))
        }
        _ => None,
    }
}

/// UI name of one record of an entity, falling back to the raw entity name
pub fn element_name(entity: &str) -> &str {
    ui_names(entity).map_or(entity, |(element, _)| element)
}

/// UI name of an entity's list, falling back to the raw entity name
pub fn list_name(entity: &str) -> &str {
    ui_names(entity).map_or(entity, |(_, list)| list)
}
