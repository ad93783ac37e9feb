use std::sync::Arc;

use contracts::domain::common::RecordId;
use contracts::shared::forms::catalog::element_name;
use contracts::shared::forms::EntityRegistry;
use leptos::prelude::*;

use crate::shared::form_tree::{
    FormError, FormState, FormTree, HttpCrudApi, Operation, RowKey, RowView, WrittenRecord,
};

/// Error shown above the form
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBanner {
    pub message: String,
    /// Editing the form and submitting again can clear it
    pub recoverable: bool,
}

impl ErrorBanner {
    fn input(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            recoverable: true,
        }
    }
}

impl From<&FormError> for ErrorBanner {
    fn from(err: &FormError) -> Self {
        Self {
            message: err.to_string(),
            recoverable: err.is_recoverable(),
        }
    }
}

fn describe(records: &[WrittenRecord]) -> String {
    records
        .iter()
        .map(|w| format!("{} #{}", element_name(&w.entity), w.id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Work queued for the form; a later request never waits behind a stale one
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Job {
    Render,
    Rebuild,
    Submit,
}

/// ViewModel hosting one form tree and the raw input it renders
#[derive(Clone)]
pub struct FormTreeViewModel {
    pub entity: RwSignal<String>,
    pub operation: RwSignal<Operation>,
    pub target_id: RwSignal<String>,
    pub state: RwSignal<FormState>,
    pub rows: RwSignal<Vec<RowView>>,
    pub error: RwSignal<Option<ErrorBanner>>,
    pub notice: RwSignal<Option<String>>,
    pub busy: RwSignal<bool>,
    /// Bumped after every successful submission
    pub saved: RwSignal<u32>,
    registry: Arc<EntityRegistry>,
    api: HttpCrudApi,
    tree: StoredValue<Option<FormTree>>,
    pending: StoredValue<Option<Job>>,
}

impl FormTreeViewModel {
    pub fn new(registry: Arc<EntityRegistry>, api: HttpCrudApi, entity: String) -> Self {
        Self {
            entity: RwSignal::new(entity),
            operation: RwSignal::new(Operation::Create),
            target_id: RwSignal::new(String::new()),
            state: RwSignal::new(FormState::new()),
            rows: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
            busy: RwSignal::new(false),
            saved: RwSignal::new(0),
            registry,
            api,
            tree: StoredValue::new(None),
            pending: StoredValue::new(None),
        }
    }

    pub fn api(&self) -> &HttpCrudApi {
        &self.api
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn select_entity(&self, entity: String) {
        self.entity.set(entity);
        self.target_id.set(String::new());
        self.operation.set(Operation::Create);
        self.state.set(FormState::new());
        self.notice.set(None);
        self.schedule(Job::Rebuild);
    }

    pub fn set_operation(&self, operation: Operation) {
        self.operation.set(operation);
        self.state.set(FormState::new());
        self.schedule(Job::Rebuild);
    }

    pub fn set_target_id(&self, raw: String) {
        self.target_id.set(raw);
        self.state.set(FormState::new());
        self.schedule(Job::Rebuild);
    }

    pub fn set_value(&self, key: RowKey, raw: String) {
        self.state.update(|s| s.set_value(key, raw));
        self.schedule(Job::Render);
    }

    pub fn select(&self, key: RowKey, id: RecordId) {
        self.state.update(|s| s.select(key, id));
        self.schedule(Job::Render);
    }

    pub fn toggle_new_parent(&self, key: RowKey, on: bool) {
        self.state.update(|s| s.set_creating_new(key, on));
        self.schedule(Job::Render);
    }

    pub fn submit(&self) {
        self.schedule(Job::Submit);
    }

    /// Start (or rebuild) the form for the current entity
    pub fn load(&self) {
        self.schedule(Job::Rebuild);
    }

    fn schedule(&self, job: Job) {
        self.pending
            .update_value(|pending| *pending = (*pending).max(Some(job)));
        if self.busy.get_untracked() {
            return;
        }
        self.busy.set(true);
        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            while let Some(job) = vm.take_pending() {
                match job {
                    Job::Render => vm.render().await,
                    Job::Rebuild => vm.rebuild().await,
                    Job::Submit => vm.render_and_submit().await,
                }
            }
            vm.busy.set(false);
        });
    }

    fn take_pending(&self) -> Option<Job> {
        let mut job = None;
        self.pending.update_value(|pending| job = pending.take());
        job
    }

    fn take_tree(&self) -> Option<FormTree> {
        let mut tree = None;
        self.tree.update_value(|slot| tree = slot.take());
        tree
    }

    fn parse_target(&self) -> Result<Option<RecordId>, String> {
        let raw = self.target_id.get_untracked();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<RecordId>()
            .map(Some)
            .map_err(|_| format!("'{}' is not a record id", trimmed))
    }

    async fn rebuild(&self) {
        self.error.set(None);
        self.tree.set_value(None);
        self.rows.set(Vec::new());

        let operation = self.operation.get_untracked();
        let target = match self.parse_target() {
            Ok(target) => target,
            Err(e) => {
                self.error.set(Some(ErrorBanner::input(e)));
                return;
            }
        };
        let entity = self.entity.get_untracked();
        let tree = match FormTree::new(Arc::clone(&self.registry), &entity, operation, target) {
            Ok(tree) => tree,
            // Waiting for the user to pick a record
            Err(FormError::MissingTargetId(_)) => return,
            Err(e) => {
                self.error.set(Some((&e).into()));
                return;
            }
        };

        if operation == Operation::Update {
            let mut state = FormState::new();
            if let Err(e) = tree.prefill(&self.api, &mut state).await {
                self.error.set(Some((&e).into()));
                return;
            }
            self.state.set(state);
        }
        self.tree.set_value(Some(tree));
        self.render().await;
    }

    async fn render(&self) {
        let Some(mut tree) = self.take_tree() else {
            return;
        };
        let state = self.state.get_untracked();
        let result = tree.render(&state, &self.api).await;
        self.rows.set(tree.row_views());
        self.tree.set_value(Some(tree));
        match result {
            Ok(()) => self.error.set(None),
            Err(e) => self.error.set(Some((&e).into())),
        }
    }

    async fn render_and_submit(&self) {
        let Some(mut tree) = self.take_tree() else {
            self.error
                .set(Some(ErrorBanner::input("Pick a record before submitting")));
            return;
        };
        let state = self.state.get_untracked();
        let result = match tree.render(&state, &self.api).await {
            Ok(()) => tree.submit(&self.api).await,
            Err(e) => Err(e),
        };
        self.rows.set(tree.row_views());

        match result {
            Ok(outcome) => {
                let verb = match tree.operation() {
                    Operation::Delete => "Deleted",
                    Operation::Update => "Saved",
                    Operation::Create => "Created",
                };
                let entity = element_name(tree.root_entity());
                let mut notice = match outcome.root_id() {
                    Some(id) => format!("{} {} #{}", verb, entity, id),
                    None => format!("{} {}", verb, entity),
                };
                // Everything before the root record is an inline parent
                let parents = &outcome.written[..outcome.written.len().saturating_sub(1)];
                if !parents.is_empty() {
                    notice.push_str(&format!(" with new {}", describe(parents)));
                }
                self.notice.set(Some(notice));
                self.error.set(None);
                self.saved.update(|n| *n += 1);

                if tree.operation() == Operation::Create {
                    self.state.set(FormState::new());
                } else {
                    self.target_id.set(String::new());
                }
                self.pending
                    .update_value(|pending| *pending = (*pending).max(Some(Job::Rebuild)));
            }
            Err(e) => {
                let mut banner = ErrorBanner::from(&e);
                if !tree.committed().is_empty() {
                    banner.message = format!(
                        "{} (already stored: {})",
                        banner.message,
                        describe(tree.committed())
                    );
                }
                self.error.set(Some(banner));
                self.tree.set_value(Some(tree));
            }
        }
    }
}
