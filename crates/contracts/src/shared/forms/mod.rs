//! Form metadata for the entity editors
//!
//! Forms are declared once as [`EntityFormDef`]s made of [`FieldTemplate`]s,
//! then resolved into [`FieldDescriptor`]s by [`EntityRegistry::build`].
//!
//! ```rust,ignore
//! let registry = contracts::shared::forms::catalog::build_registry()?;
//! for field in &registry.get("applications").unwrap().fields {
//!     println!("{}: {}", field.name, field.kind.as_str());
//! }
//! ```

pub mod catalog;
mod definition;
mod field;
mod field_kind;
mod registry;

pub use definition::EntityFormDef;
pub use field::{FieldDescriptor, FieldTemplate, ForeignKeyTarget};
pub use field_kind::{FieldKind, FieldValue};
pub use registry::{EntityForm, EntityRegistry, RegistryError};

/// A record as exchanged with the CRUD API: field name -> JSON value
pub type Record = serde_json::Map<String, serde_json::Value>;
