//! One input row of a form tree

use std::sync::Arc;

use contracts::domain::common::RecordId;
use contracts::shared::forms::{FieldDescriptor, FieldKind, FieldValue, Record};
use serde::Serialize;
use serde_json::Value;

use super::api::CrudApi;
use super::error::FormError;
use super::state::{FormState, RowKey};
use super::tree::{GroupId, Operation};

/// An existing parent record offered by a foreign-key selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentOption {
    pub id: RecordId,
    pub label: String,
}

/// What the row showed on its last render
#[derive(Debug, Clone, PartialEq)]
pub enum RowState {
    Unrendered,
    Value(FieldValue),
    Invalid { raw: String, message: String },
    /// Parent selector; `selected` is `None` when the chosen parent is gone
    Choice {
        options: Vec<ParentOption>,
        selected: Option<RecordId>,
    },
    /// Foreign key whose target has no records
    NoOptions,
    /// Foreign key whose parent is being created inline
    Deferred,
}

pub struct FormRow {
    key: RowKey,
    field: Arc<FieldDescriptor>,
    group: GroupId,
    spliced_group: Option<GroupId>,
    creating_new_parent: bool,
    parent_option_cache: Option<Vec<ParentOption>>,
    state: RowState,
}

impl FormRow {
    pub(crate) fn new(key: RowKey, field: Arc<FieldDescriptor>, group: GroupId) -> Self {
        Self {
            key,
            field,
            group,
            spliced_group: None,
            creating_new_parent: false,
            parent_option_cache: None,
            state: RowState::Unrendered,
        }
    }

    pub fn key(&self) -> &RowKey {
        &self.key
    }

    pub fn field(&self) -> &FieldDescriptor {
        &self.field
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn state(&self) -> &RowState {
        &self.state
    }

    pub fn is_creating_new_parent(&self) -> bool {
        self.creating_new_parent
    }

    /// Group of the inline parent this row spliced in, if any
    pub fn spliced_group(&self) -> Option<GroupId> {
        self.spliced_group
    }

    pub(crate) fn set_spliced_group(&mut self, group: Option<GroupId>) {
        self.spliced_group = group;
    }

    /// Whether the row may offer "create new parent" under `operation`
    pub fn can_create_parent(&self, operation: Operation) -> bool {
        self.field.allows_inline_create() && operation == Operation::Create
    }

    /// Render against the current input.
    ///
    /// Returns the value this row contributes, or `None` when it contributes
    /// nothing this cycle (invalid input, no options, a vanished selection,
    /// deferred parent).
    pub async fn render<A: CrudApi + ?Sized>(
        &mut self,
        state: &FormState,
        api: &A,
        operation: Operation,
    ) -> Result<Option<FieldValue>, FormError> {
        if !self.field.kind.is_foreign_key() {
            return Ok(self.render_input(state));
        }

        self.creating_new_parent =
            self.can_create_parent(operation) && state.is_creating_new(&self.key);
        if self.creating_new_parent {
            self.state = RowState::Deferred;
            return Ok(None);
        }
        self.render_selector(state, api).await
    }

    fn render_input(&mut self, state: &FormState) -> Option<FieldValue> {
        let parsed = match state.value(&self.key) {
            Some(raw) => self
                .field
                .kind
                .parse_input(raw)
                .map_err(|message| (raw.to_string(), message)),
            None => Ok(self.default_value()),
        };
        match parsed {
            Ok(value) => {
                self.state = RowState::Value(value.clone());
                Some(value)
            }
            Err((raw, message)) => {
                self.state = RowState::Invalid { raw, message };
                None
            }
        }
    }

    fn default_value(&self) -> FieldValue {
        match (&self.field.default, self.field.kind) {
            (Some(value), _) => value.clone(),
            (None, FieldKind::Boolean) => FieldValue::Bool(false),
            (None, _) => FieldValue::Null,
        }
    }

    async fn render_selector<A: CrudApi + ?Sized>(
        &mut self,
        state: &FormState,
        api: &A,
    ) -> Result<Option<FieldValue>, FormError> {
        let options = self.parent_options(api).await?;
        let Some(first) = options.first() else {
            self.state = RowState::NoOptions;
            return Ok(None);
        };

        let selected = match state.selection(&self.key) {
            None => Some(first.id),
            Some(id) if options.iter().any(|o| o.id == id) => Some(id),
            Some(stale) => {
                log::warn!("{}: selected id {} is no longer offered", self.key, stale);
                None
            }
        };
        self.state = RowState::Choice { options, selected };
        Ok(selected.map(FieldValue::Id))
    }

    /// Parent options are fetched once per row and kept for its lifetime
    async fn parent_options<A: CrudApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> Result<Vec<ParentOption>, FormError> {
        if let Some(cached) = &self.parent_option_cache {
            return Ok(cached.clone());
        }
        let target = self
            .field
            .target
            .as_ref()
            .ok_or_else(|| FormError::UnknownEntity(self.field.name.clone()))?;

        let records = api.read_all(&target.entity).await?;
        let options: Vec<ParentOption> = records
            .iter()
            .filter_map(|record| to_option(record, &target.id_field, &target.label_field))
            .collect();
        log::debug!(
            "{}: {} option(s) from {}",
            self.key,
            options.len(),
            target.entity
        );

        self.parent_option_cache = Some(options.clone());
        Ok(options)
    }
}

fn to_option(record: &Record, id_field: &str, label_field: &str) -> Option<ParentOption> {
    let id = record.get(id_field)?.as_i64()?;
    let label = match record.get(label_field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => format!("#{}", id),
        Some(other) => other.to_string(),
    };
    Some(ParentOption { id, label })
}
