//! In-memory [`CrudApi`] recording every call

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use contracts::domain::common::RecordId;
use contracts::shared::forms::Record;
use serde_json::Value;

use super::api::{ApiError, CrudApi};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(String, Record),
    ReadAll(String),
    Read(String, RecordId),
    Update(String, RecordId, Record),
    Delete(String, RecordId),
}

impl Call {
    pub fn is_write(&self) -> bool {
        !matches!(self, Call::ReadAll(_) | Call::Read(..))
    }
}

#[derive(Default)]
pub struct FakeApi {
    tables: RefCell<BTreeMap<String, Vec<Record>>>,
    next_ids: RefCell<HashMap<String, RecordId>>,
    failing_creates: RefCell<HashSet<String>>,
    failing_reads: RefCell<HashSet<String>>,
    calls: RefCell<Vec<Call>>,
    invalidated: RefCell<Vec<String>>,
}

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("not a record: {}", other),
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(self, entity: &str, value: Value) -> Self {
        self.tables
            .borrow_mut()
            .entry(entity.to_string())
            .or_default()
            .push(record(value));
        self
    }

    /// Id handed out by the next create of `entity`
    pub fn with_next_id(self, entity: &str, id: RecordId) -> Self {
        self.next_ids.borrow_mut().insert(entity.to_string(), id);
        self
    }

    pub fn fail_creates_of(&self, entity: &str) {
        self.failing_creates.borrow_mut().insert(entity.to_string());
    }

    /// Make `read_all` of `entity` fail as if the network were down
    pub fn fail_reads_of(&self, entity: &str) {
        self.failing_reads.borrow_mut().insert(entity.to_string());
    }

    pub fn heal(&self) {
        self.failing_creates.borrow_mut().clear();
        self.failing_reads.borrow_mut().clear();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_write).collect()
    }

    pub fn read_all_count(&self, entity: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::ReadAll(e) if e == entity))
            .count()
    }

    pub fn records(&self, entity: &str) -> Vec<Record> {
        self.tables.borrow().get(entity).cloned().unwrap_or_default()
    }

    pub fn invalidated(&self) -> Vec<String> {
        self.invalidated.borrow().clone()
    }

    fn allocate_id(&self, entity: &str) -> RecordId {
        let mut next_ids = self.next_ids.borrow_mut();
        let next = next_ids.entry(entity.to_string()).or_insert_with(|| {
            self.tables
                .borrow()
                .get(entity)
                .into_iter()
                .flatten()
                .filter_map(|r| r.get("id").and_then(Value::as_i64))
                .max()
                .unwrap_or(0)
                + 1
        });
        let id = *next;
        *next += 1;
        id
    }

    fn not_found(entity: &str, id: RecordId) -> ApiError {
        ApiError::Status {
            status: 404,
            body: format!("{} {} not found", entity, id),
        }
    }
}

#[async_trait(?Send)]
impl CrudApi for FakeApi {
    async fn create(&self, entity: &str, payload: &Record) -> Result<Record, ApiError> {
        self.calls
            .borrow_mut()
            .push(Call::Create(entity.to_string(), payload.clone()));
        if self.failing_creates.borrow().contains(entity) {
            return Err(ApiError::Status {
                status: 500,
                body: "storage unavailable".into(),
            });
        }
        let mut stored = payload.clone();
        stored.insert("id".into(), Value::from(self.allocate_id(entity)));
        self.tables
            .borrow_mut()
            .entry(entity.to_string())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn read_all(&self, entity: &str) -> Result<Vec<Record>, ApiError> {
        self.calls
            .borrow_mut()
            .push(Call::ReadAll(entity.to_string()));
        if self.failing_reads.borrow().contains(entity) {
            return Err(ApiError::Network("offline".into()));
        }
        Ok(self.records(entity))
    }

    async fn read(&self, entity: &str, id: RecordId) -> Result<Record, ApiError> {
        self.calls
            .borrow_mut()
            .push(Call::Read(entity.to_string(), id));
        self.records(entity)
            .into_iter()
            .find(|r| r.get("id").and_then(Value::as_i64) == Some(id))
            .ok_or_else(|| Self::not_found(entity, id))
    }

    async fn update(
        &self,
        entity: &str,
        id: RecordId,
        payload: &Record,
    ) -> Result<Record, ApiError> {
        self.calls
            .borrow_mut()
            .push(Call::Update(entity.to_string(), id, payload.clone()));
        let mut tables = self.tables.borrow_mut();
        let stored = tables
            .get_mut(entity)
            .and_then(|rows| {
                rows.iter_mut()
                    .find(|r| r.get("id").and_then(Value::as_i64) == Some(id))
            })
            .ok_or_else(|| Self::not_found(entity, id))?;
        for (field, value) in payload {
            stored.insert(field.clone(), value.clone());
        }
        Ok(stored.clone())
    }

    async fn delete(&self, entity: &str, id: RecordId) -> Result<Record, ApiError> {
        self.calls
            .borrow_mut()
            .push(Call::Delete(entity.to_string(), id));
        let mut tables = self.tables.borrow_mut();
        let rows = tables
            .get_mut(entity)
            .ok_or_else(|| Self::not_found(entity, id))?;
        let position = rows
            .iter()
            .position(|r| r.get("id").and_then(Value::as_i64) == Some(id))
            .ok_or_else(|| Self::not_found(entity, id))?;
        Ok(rows.remove(position))
    }

    fn invalidate(&self, entity: &str) {
        self.invalidated.borrow_mut().push(entity.to_string());
    }
}
