//! Turns user intents into remote calls and folds the results into state.
//!
//! # Design
//! Each action runs independently: it takes the state lock only to mark the
//! start and to apply the finished call, never across the remote await, so
//! several actions can be in flight at once. Failures are logged and reduced
//! to the per-action message in the error slot; nothing is retried, rolled
//! back, or applied before the service answers.

use tokio::sync::RwLock;
use tracing::{debug, error, instrument};

use crate::config::{ClientConfig, UpdateOrdering};
use crate::remote::{HttpTodoService, RemoteTodoService};
use crate::state::{Outcome, SyncState};
use crate::types::{TodoId, TodoTitle, UpdateTodo};

/// A user action forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Load,
    Add { title: String },
    Toggle { id: TodoId, completed: bool },
    Edit { id: TodoId, title: String },
    Delete { id: TodoId },
}

pub struct SyncController<S> {
    service: S,
    state: RwLock<SyncState>,
}

impl SyncController<HttpTodoService> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_ordering(HttpTodoService::from_config(config), config.update_ordering)
    }
}

impl<S: RemoteTodoService> SyncController<S> {
    pub fn new(service: S) -> Self {
        Self::with_ordering(service, UpdateOrdering::default())
    }

    pub fn with_ordering(service: S, ordering: UpdateOrdering) -> Self {
        Self {
            service,
            state: RwLock::new(SyncState::new(ordering)),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// A copy of the current state for rendering.
    pub async fn snapshot(&self) -> SyncState {
        self.state.read().await.clone()
    }

    pub async fn dispatch(&self, intent: Intent) {
        match intent {
            Intent::Load => self.load().await,
            Intent::Add { title } => self.add(&title).await,
            Intent::Toggle { id, completed } => self.toggle(&id, completed).await,
            Intent::Edit { id, title } => self.edit(&id, &title).await,
            Intent::Delete { id } => self.delete(&id).await,
        }
    }

    #[instrument(skip(self))]
    pub async fn load(&self) {
        self.state.write().await.begin_load();
        let result = self.service.list().await;
        if let Err(err) = &result {
            error!(error = %err, "loading todos failed");
        }
        let outcome = self.state.write().await.finish_load(result);
        debug!(?outcome, "load finished");
    }

    /// Blank titles are ignored without contacting the service.
    #[instrument(skip(self))]
    pub async fn add(&self, title: &str) {
        let Some(title) = TodoTitle::parse(title) else {
            debug!("ignoring blank title");
            return;
        };

        self.state.write().await.begin_add();
        let result = self.service.create(title.as_str()).await;
        if let Err(err) = &result {
            error!(error = %err, "adding todo failed");
        }
        let outcome = self.state.write().await.finish_add(result);
        debug!(?outcome, "add finished");
    }

    #[instrument(skip(self))]
    pub async fn toggle(&self, id: &TodoId, completed: bool) {
        self.update(id, UpdateTodo::completed(completed)).await;
    }

    /// Blank titles are ignored; others are sent trimmed.
    #[instrument(skip(self))]
    pub async fn edit(&self, id: &TodoId, title: &str) {
        let Some(title) = TodoTitle::parse(title) else {
            debug!("ignoring blank title");
            return;
        };
        self.update(id, UpdateTodo::title(title.into_inner())).await;
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &TodoId) {
        let result = self.service.delete(id).await;
        if let Err(err) = &result {
            error!(error = %err, "deleting todo failed");
        }
        let outcome = self.state.write().await.finish_delete(id, result);
        debug!(?outcome, "delete finished");
    }

    async fn update(&self, id: &TodoId, changes: UpdateTodo) {
        let ticket = self.state.write().await.begin_update();
        let result = self.service.update(id, &changes).await;
        if let Err(err) = &result {
            error!(error = %err, "updating todo failed");
        }
        let outcome = self.state.write().await.finish_update(id, ticket, result);
        if outcome == Outcome::Stale {
            debug!(?ticket, "discarded out-of-order update response");
        }
        debug!(?outcome, "update finished");
    }
}
