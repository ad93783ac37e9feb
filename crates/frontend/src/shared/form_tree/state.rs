//! Raw user input, owned by whoever hosts the form

use std::collections::{HashMap, HashSet};
use std::fmt;

use contracts::domain::common::RecordId;
use serde::{Deserialize, Serialize};

/// Stable identity of one row.
///
/// Root rows are `entity.field`; rows spliced in for an inline parent
/// append `/entity.field` to the key of the row that spawned them, so the
/// same field of two different inline parents never collides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowKey(String);

impl RowKey {
    pub fn root(entity: &str, field: &str) -> Self {
        Self(format!("{}.{}", entity, field))
    }

    pub fn child(&self, entity: &str, field: &str) -> Self {
        Self(format!("{}/{}.{}", self.0, entity, field))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Nesting level; root rows are 0
    pub fn depth(&self) -> usize {
        self.0.matches('/').count()
    }
}

impl From<&str> for RowKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    values: HashMap<RowKey, String>,
    selections: HashMap<RowKey, RecordId>,
    new_parents: HashSet<RowKey>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, key: &RowKey) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set_value(&mut self, key: impl Into<RowKey>, raw: impl Into<String>) {
        self.values.insert(key.into(), raw.into());
    }

    pub fn selection(&self, key: &RowKey) -> Option<RecordId> {
        self.selections.get(key).copied()
    }

    pub fn select(&mut self, key: impl Into<RowKey>, id: RecordId) {
        self.selections.insert(key.into(), id);
    }

    /// Has the user asked to create this row's parent inline
    pub fn is_creating_new(&self, key: &RowKey) -> bool {
        self.new_parents.contains(key)
    }

    pub fn set_creating_new(&mut self, key: impl Into<RowKey>, on: bool) {
        let key = key.into();
        if on {
            self.new_parents.insert(key);
        } else {
            self.new_parents.remove(&key);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.selections.is_empty() && self.new_parents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_keys_nest() {
        let root = RowKey::root("applications", "resume_id");
        let child = root.child("resumes", "data");

        assert_eq!(child.as_str(), "applications.resume_id/resumes.data");
        assert_eq!(root.depth(), 0);
        assert_eq!(child.depth(), 1);
    }

    #[test]
    fn test_toggle_new_parent() {
        let mut state = FormState::new();
        state.set_creating_new("applications.resume_id", true);
        assert!(state.is_creating_new(&"applications.resume_id".into()));

        state.set_creating_new("applications.resume_id", false);
        assert!(state.is_empty());
    }
}
