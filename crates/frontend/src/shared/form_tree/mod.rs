//! Dynamic CRUD forms built from the entity registry

pub mod api;
pub mod error;
pub mod row;
pub mod state;
pub mod tree;
pub mod ui;

#[cfg(test)]
mod testing;

pub use api::{ApiError, CrudApi, HttpCrudApi};
pub use error::FormError;
pub use row::{FormRow, ParentOption, RowState};
pub use state::{FormState, RowKey};
pub use tree::{FormTree, GroupId, Operation, Phase, RowView, SubmitOutcome, WrittenRecord};
