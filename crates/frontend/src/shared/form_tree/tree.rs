//! Form tree: one root entity form plus the forms of parents created inline.
//!
//! Rows persist across render cycles. Choosing "create new" on a foreign key
//! splices the target entity's rows directly after that row; they are removed
//! again, as one block, only when the choice is undone. Each splice opens a
//! new entity group, so two inline parents of the same entity never share
//! input.
//!
//! Submission writes groups in reverse encounter order. A group is always
//! encountered before the groups it spliced in, so every inline parent is
//! written before the record that references it.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use contracts::domain::common::RecordId;
use contracts::shared::forms::{EntityRegistry, FieldKind, FieldValue, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::api::{ApiError, CrudApi};
use super::error::FormError;
use super::row::{FormRow, RowState};
use super::state::{FormState, RowKey};

/// Index of an entity group inside one tree
pub type GroupId = usize;

pub const ROOT_GROUP: GroupId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Self::Create, Self::Update, Self::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    pub fn needs_target(&self) -> bool {
        !matches!(self, Self::Create)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Collecting,
    Submitting,
    Done,
    Failed,
}

/// A foreign key waiting for the id of a parent created in this submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingForeignKey {
    pub field: String,
    pub target_entity: String,
    pub target_group: GroupId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenRecord {
    pub entity: String,
    pub id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    /// Records written, parents first
    pub written: Vec<WrittenRecord>,
}

impl SubmitOutcome {
    /// Id of the root record
    pub fn root_id(&self) -> Option<RecordId> {
        self.written.last().map(|w| w.id)
    }
}

/// Read-only snapshot of a row for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub key: RowKey,
    pub title: String,
    pub owner_entity: String,
    pub kind: FieldKind,
    pub required: bool,
    pub target_entity: Option<String>,
    pub can_create_parent: bool,
    pub creating_new_parent: bool,
    pub depth: usize,
    pub state: RowState,
}

struct EntityGroup {
    entity: String,
    spawned_by: Option<GroupId>,
}

pub struct FormTree {
    registry: Arc<EntityRegistry>,
    root_entity: String,
    operation: Operation,
    target_record_id: Option<RecordId>,
    rows: Vec<FormRow>,
    groups: Vec<EntityGroup>,
    // Rebuilt on every render
    encounter_order: Vec<GroupId>,
    input_values: HashMap<GroupId, BTreeMap<String, FieldValue>>,
    pending_foreign_keys: HashMap<GroupId, Vec<PendingForeignKey>>,
    committed: Vec<WrittenRecord>,
    rendered: bool,
    phase: Phase,
}

impl FormTree {
    pub fn new(
        registry: Arc<EntityRegistry>,
        root_entity: &str,
        operation: Operation,
        target_record_id: Option<RecordId>,
    ) -> Result<Self, FormError> {
        if operation.needs_target() && target_record_id.is_none() {
            return Err(FormError::MissingTargetId(operation.as_str()));
        }
        let form = registry
            .get(root_entity)
            .ok_or_else(|| FormError::UnknownEntity(root_entity.to_string()))?;
        let rows = form
            .fields
            .iter()
            .map(|field| {
                FormRow::new(
                    RowKey::root(root_entity, &field.name),
                    Arc::clone(field),
                    ROOT_GROUP,
                )
            })
            .collect();

        Ok(Self {
            root_entity: root_entity.to_string(),
            operation,
            target_record_id,
            rows,
            groups: vec![EntityGroup {
                entity: root_entity.to_string(),
                spawned_by: None,
            }],
            encounter_order: Vec::new(),
            input_values: HashMap::new(),
            pending_foreign_keys: HashMap::new(),
            committed: Vec::new(),
            rendered: false,
            phase: Phase::Collecting,
            registry,
        })
    }

    pub fn root_entity(&self) -> &str {
        &self.root_entity
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn target_record_id(&self) -> Option<RecordId> {
        self.target_record_id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rows(&self) -> &[FormRow] {
        &self.rows
    }

    /// Entity names of the groups met during the last render, in order
    pub fn entity_order(&self) -> Vec<&str> {
        self.encounter_order
            .iter()
            .map(|&g| self.groups[g].entity.as_str())
            .collect()
    }

    pub fn input_values(&self, group: GroupId) -> Option<&BTreeMap<String, FieldValue>> {
        self.input_values.get(&group)
    }

    pub fn pending_foreign_keys(&self, group: GroupId) -> &[PendingForeignKey] {
        self.pending_foreign_keys
            .get(&group)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Records already written by the last submission attempt
    pub fn committed(&self) -> &[WrittenRecord] {
        &self.committed
    }

    /// Seed `state` with the stored values of the target record
    pub async fn prefill<A: CrudApi + ?Sized>(
        &self,
        api: &A,
        state: &mut FormState,
    ) -> Result<(), FormError> {
        let id = self
            .target_record_id
            .ok_or(FormError::MissingTargetId(self.operation.as_str()))?;
        let record = api.read(&self.root_entity, id).await?;

        for row in self.rows.iter().filter(|r| r.group() == ROOT_GROUP) {
            let field = row.field();
            let Some(stored) = record.get(&field.name) else {
                continue;
            };
            match FieldValue::from_json(field.kind, stored) {
                Some(FieldValue::Id(parent)) => state.select(row.key().clone(), parent),
                Some(FieldValue::Null) => {}
                Some(value) => state.set_value(row.key().clone(), value.to_input_string()),
                None => log::warn!(
                    "{}/{}: stored {} is not a {} value",
                    self.root_entity,
                    id,
                    field.name,
                    field.kind.as_str()
                ),
            }
        }
        Ok(())
    }

    /// Render every row against `state`, rebuilding the per-cycle values
    pub async fn render<A: CrudApi + ?Sized>(
        &mut self,
        state: &FormState,
        api: &A,
    ) -> Result<(), FormError> {
        match self.phase {
            Phase::Done => return Err(FormError::AlreadySubmitted),
            Phase::Submitting => return Err(FormError::SubmitInProgress),
            Phase::Failed => self.phase = Phase::Collecting,
            Phase::Collecting => {}
        }

        self.encounter_order.clear();
        self.input_values.clear();
        self.pending_foreign_keys.clear();
        // Set again only once every row has rendered
        self.rendered = false;
        if self.operation == Operation::Delete {
            self.rendered = true;
            return Ok(());
        }

        let operation = self.operation;
        let mut index = 0;
        while index < self.rows.len() {
            let group = self.rows[index].group();
            self.enter_group(group);

            let value = self.rows[index].render(state, api, operation).await?;
            let row = &self.rows[index];
            let field_name = row.field().name.clone();

            if row.is_creating_new_parent() {
                let target_entity = row
                    .field()
                    .target_entity()
                    .ok_or_else(|| FormError::UnknownEntity(field_name.clone()))?
                    .to_string();
                let target_group = match row.spliced_group() {
                    Some(existing) => existing,
                    None => self.add_child_rows(&target_entity, index)?,
                };
                self.pending_foreign_keys
                    .entry(group)
                    .or_default()
                    .push(PendingForeignKey {
                        field: field_name,
                        target_entity,
                        target_group,
                    });
            } else {
                if row.spliced_group().is_some() {
                    self.drop_spliced_block(index);
                }
                if let Some(value) = value {
                    self.input_values
                        .entry(group)
                        .or_default()
                        .insert(field_name, value);
                }
            }
            index += 1;
        }
        self.rendered = true;
        Ok(())
    }

    /// Splice the rows of `target_entity` directly after row `after_index`,
    /// as a new entity group spawned by that row.
    pub fn add_child_rows(
        &mut self,
        target_entity: &str,
        after_index: usize,
    ) -> Result<GroupId, FormError> {
        let registry = Arc::clone(&self.registry);
        let form = registry
            .get(target_entity)
            .ok_or_else(|| FormError::UnknownEntity(target_entity.to_string()))?;
        let spawner = self
            .rows
            .get(after_index)
            .ok_or(FormError::RowOutOfRange(after_index))?;
        let parent_key = spawner.key().clone();
        let parent_group = spawner.group();

        let group = self.groups.len();
        self.groups.push(EntityGroup {
            entity: target_entity.to_string(),
            spawned_by: Some(parent_group),
        });

        let child_rows: Vec<FormRow> = form
            .fields
            .iter()
            .map(|field| {
                FormRow::new(
                    parent_key.child(target_entity, &field.name),
                    Arc::clone(field),
                    group,
                )
            })
            .collect();
        let at = after_index + 1;
        self.rows.splice(at..at, child_rows);
        self.rows[after_index].set_spliced_group(Some(group));

        log::debug!("{}: spliced {} rows as group {}", parent_key, form.fields.len(), group);
        Ok(group)
    }

    /// Remove the rows a toggle spliced in, together with anything they
    /// spliced in themselves
    fn drop_spliced_block(&mut self, index: usize) {
        let Some(child) = self.rows[index].spliced_group() else {
            return;
        };
        self.rows[index].set_spliced_group(None);

        let mut doomed = HashSet::from([child]);
        // Groups are numbered in creation order, so descendants come later
        for (group, entity_group) in self.groups.iter().enumerate().skip(child + 1) {
            if entity_group
                .spawned_by
                .is_some_and(|parent| doomed.contains(&parent))
            {
                doomed.insert(group);
            }
        }
        let before = self.rows.len();
        self.rows.retain(|row| !doomed.contains(&row.group()));
        log::debug!(
            "{}: removed {} spliced rows",
            self.rows[index].key(),
            before - self.rows.len()
        );
    }

    fn enter_group(&mut self, group: GroupId) {
        if !self.input_values.contains_key(&group) {
            self.input_values.insert(group, BTreeMap::new());
            self.pending_foreign_keys.insert(group, Vec::new());
            self.encounter_order.push(group);
        }
    }

    /// Snapshot for display; a delete form shows no rows
    pub fn row_views(&self) -> Vec<RowView> {
        if self.operation == Operation::Delete {
            return Vec::new();
        }
        self.rows
            .iter()
            .map(|row| {
                let field = row.field();
                RowView {
                    key: row.key().clone(),
                    title: field.title(),
                    owner_entity: field.owner_entity.clone(),
                    kind: field.kind,
                    required: field.required,
                    target_entity: field.target_entity().map(str::to_string),
                    can_create_parent: row.can_create_parent(self.operation),
                    creating_new_parent: row.is_creating_new_parent(),
                    depth: row.key().depth(),
                    state: row.state().clone(),
                }
            })
            .collect()
    }

    /// Checks that need no backend round trip
    fn check_ready(&self) -> Result<(), FormError> {
        if !self.rendered {
            return Err(FormError::NotRendered);
        }
        for row in &self.rows {
            let field = row.field();
            match row.state() {
                RowState::Unrendered => return Err(FormError::NotRendered),
                RowState::NoOptions => {
                    return Err(FormError::EmptyOptions {
                        entity: field.owner_entity.clone(),
                        field: field.name.clone(),
                        target: field.target_entity().unwrap_or_default().to_string(),
                    })
                }
                RowState::Invalid { message, .. } => {
                    return Err(FormError::Validation {
                        entity: field.owner_entity.clone(),
                        field: field.name.clone(),
                        message: message.clone(),
                    })
                }
                RowState::Choice { selected: None, .. } => {
                    return Err(FormError::Validation {
                        entity: field.owner_entity.clone(),
                        field: field.name.clone(),
                        message: format!(
                            "the chosen {} no longer exists",
                            field.target_entity().unwrap_or_default()
                        ),
                    })
                }
                RowState::Value(value) if field.required && value.is_null() => {
                    return Err(FormError::Validation {
                        entity: field.owner_entity.clone(),
                        field: field.name.clone(),
                        message: "is required".to_string(),
                    })
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Write the collected input.
    ///
    /// Nothing is rolled back when a write fails: parents written before the
    /// failure stay stored and are listed by [`FormTree::committed`].
    pub async fn submit<A: CrudApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> Result<SubmitOutcome, FormError> {
        match self.phase {
            Phase::Done => return Err(FormError::AlreadySubmitted),
            Phase::Submitting => return Err(FormError::SubmitInProgress),
            Phase::Collecting | Phase::Failed => {}
        }

        if self.operation == Operation::Delete {
            let id = self
                .target_record_id
                .ok_or(FormError::MissingTargetId(self.operation.as_str()))?;
            self.phase = Phase::Submitting;
            return match api.delete(&self.root_entity, id).await {
                Ok(_) => {
                    api.invalidate(&self.root_entity);
                    log::info!("deleted {}/{}", self.root_entity, id);
                    self.phase = Phase::Done;
                    Ok(SubmitOutcome {
                        written: vec![WrittenRecord {
                            entity: self.root_entity.clone(),
                            id,
                        }],
                    })
                }
                Err(e) => {
                    log::error!("delete {}/{} failed: {}", self.root_entity, id, e);
                    self.phase = Phase::Failed;
                    Err(e.into())
                }
            };
        }

        self.check_ready()?;
        self.phase = Phase::Submitting;
        self.committed.clear();

        let result = self.write_groups(api).await;
        for written in &self.committed {
            api.invalidate(&written.entity);
        }
        match result {
            Ok(()) => {
                self.phase = Phase::Done;
                Ok(SubmitOutcome {
                    written: self.committed.clone(),
                })
            }
            Err(e) => {
                log::error!(
                    "submitting {} failed after {} write(s): {}",
                    self.root_entity,
                    self.committed.len(),
                    e
                );
                self.phase = Phase::Failed;
                Err(e)
            }
        }
    }

    async fn write_groups<A: CrudApi + ?Sized>(&mut self, api: &A) -> Result<(), FormError> {
        let registry = Arc::clone(&self.registry);
        let mut assigned: HashMap<GroupId, RecordId> = HashMap::new();
        let order: Vec<GroupId> = self.encounter_order.iter().rev().copied().collect();

        for group in order {
            let entity = self.groups[group].entity.clone();
            let form = registry
                .get(&entity)
                .ok_or_else(|| FormError::UnknownEntity(entity.clone()))?;
            let payload = self.payload(group, &entity, &assigned)?;

            let update_target = match (group, self.operation) {
                (ROOT_GROUP, Operation::Update) => self.target_record_id,
                _ => None,
            };
            let stored = match update_target {
                Some(id) => api.update(&entity, id, &payload).await?,
                None => api.create(&entity, &payload).await?,
            };

            let id = stored
                .get(&form.id_field)
                .and_then(Value::as_i64)
                .or(update_target)
                .ok_or_else(|| {
                    ApiError::Decode(format!("{} response has no `{}`", entity, form.id_field))
                })?;
            log::info!(
                "{} {}/{}",
                if update_target.is_some() { "updated" } else { "created" },
                entity,
                id
            );
            assigned.insert(group, id);
            self.committed.push(WrittenRecord { entity, id });
        }
        Ok(())
    }

    fn payload(
        &self,
        group: GroupId,
        entity: &str,
        assigned: &HashMap<GroupId, RecordId>,
    ) -> Result<Record, FormError> {
        let mut payload = Record::new();
        if let Some(values) = self.input_values.get(&group) {
            for (field, value) in values {
                payload.insert(field.clone(), value.to_json());
            }
        }
        for pending in self.pending_foreign_keys(group) {
            let id = assigned
                .get(&pending.target_group)
                .ok_or_else(|| FormError::DataIntegrity {
                    entity: entity.to_string(),
                    field: pending.field.clone(),
                    target: pending.target_entity.clone(),
                })?;
            payload.insert(pending.field.clone(), Value::from(*id));
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form_tree::testing::{Call, FakeApi};
    use contracts::shared::forms::catalog::build_registry;

    #[tokio::test]
    async fn test_pending_key_without_parent_write_is_integrity_error() {
        let registry = Arc::new(build_registry().unwrap());
        let api = FakeApi::new()
            .with_record("postings", serde_json::json!({"id": 3, "title": "Engineer"}))
            .with_record("resumes", serde_json::json!({"id": 5, "data": "CV"}));
        let mut state = FormState::new();
        state.set_value("applications.date_submitted", "2024-01-10");

        let mut tree = FormTree::new(registry, "applications", Operation::Create, None).unwrap();
        tree.render(&state, &api).await.unwrap();
        // A parent group that never took part in this render
        tree.pending_foreign_keys
            .entry(ROOT_GROUP)
            .or_default()
            .push(PendingForeignKey {
                field: "resume_id".into(),
                target_entity: "resumes".into(),
                target_group: 7,
            });

        let err = tree.submit(&api).await.unwrap_err();
        assert_eq!(
            err,
            FormError::DataIntegrity {
                entity: "applications".into(),
                field: "resume_id".into(),
                target: "resumes".into(),
            }
        );
        assert!(!api.calls().iter().any(|c| matches!(c, Call::Create(..))));
        assert_eq!(tree.phase(), Phase::Failed);
    }

    #[tokio::test]
    async fn test_running_submission_rejects_render_and_submit() {
        let registry = Arc::new(build_registry().unwrap());
        let api = FakeApi::new();
        let mut state = FormState::new();
        state.set_value("resumes.data", "CV");

        let mut tree = FormTree::new(registry, "resumes", Operation::Create, None).unwrap();
        tree.render(&state, &api).await.unwrap();
        // As left behind by a submission whose future was dropped mid-flight
        tree.phase = Phase::Submitting;

        assert_eq!(
            tree.render(&state, &api).await.unwrap_err(),
            FormError::SubmitInProgress
        );
        assert_eq!(tree.submit(&api).await.unwrap_err(), FormError::SubmitInProgress);
        assert!(api.writes().is_empty());
        assert_eq!(tree.phase(), Phase::Submitting);
    }
}
