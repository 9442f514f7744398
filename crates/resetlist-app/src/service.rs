//! Checklist service: the write path and display queries.

use anyhow::Context;
use resetlist_core::event::{Event, EventKind};
use resetlist_core::id::TodoId;
use resetlist_core::{Todo, TodoList};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;

use crate::config::Config;
use crate::store::EventStore;
use crate::view::TodoView;

/// Errors surfaced by checklist operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The requested reset cadence is not in the catalog.
    #[error("unknown reset: {0}")]
    UnknownReset(String),

    /// Todo text must not be empty.
    #[error("todo text must not be empty")]
    EmptyText,

    /// No todo with the given id.
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Checklist service owning the event store and the folded state.
///
/// Every mutation follows the same path: build the event, append it to the
/// store, then apply it to the in-memory fold, so the fold never diverges
/// from the log. The service is an explicitly owned value handed to the CLI
/// and HTTP layers rather than process-wide state.
pub struct TodoService<S> {
    store: S,
    todos: TodoList,
    config: Config,
}

impl<S: EventStore> TodoService<S> {
    /// Load the service by replaying the store's event log.
    ///
    /// # Errors
    /// Returns an error if the log cannot be read.
    pub fn load(store: S, config: Config) -> Result<Self, ServiceError> {
        let events = store
            .load_events()
            .map_err(Into::into)
            .context("failed to load event log")?;
        let count = events.len();
        let todos = TodoList::replay(events);
        info!(events = count, todos = todos.len(), "replayed event log");
        Ok(Self {
            store,
            todos,
            config,
        })
    }

    /// Catalog and auth configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Current checklist state.
    #[must_use]
    pub const fn todos(&self) -> &TodoList {
        &self.todos
    }

    /// Look up a todo by id.
    ///
    /// # Errors
    /// Returns [`ServiceError::NotFound`] if the id is unknown.
    pub fn get(&self, id: TodoId) -> Result<&Todo, ServiceError> {
        self.todos.get(id).ok_or(ServiceError::NotFound(id))
    }

    /// Project the checklist for display at `now`.
    ///
    /// Undone todos come first, closest reset first; done todos follow in
    /// the same order, with the text as the final tie-break. Sorting by the
    /// next-reset instant is equivalent to sorting by remaining time, since
    /// `now` is shared by every row.
    #[must_use]
    pub fn list(&self, now: OffsetDateTime) -> Vec<TodoView> {
        let mut views: Vec<TodoView> = self
            .todos
            .iter()
            .map(|todo| TodoView::at(todo, now))
            .collect();
        views.sort_by(|a, b| {
            a.done
                .cmp(&b.done)
                .then_with(|| a.next_reset.cmp(&b.next_reset))
                .then_with(|| a.text.cmp(&b.text))
        });
        views
    }

    /// Add a todo using a reset cadence from the catalog.
    ///
    /// # Errors
    /// Returns [`ServiceError::UnknownReset`] if the catalog has no such
    /// entry, [`ServiceError::EmptyText`] for blank text, or a store error.
    pub fn add(&mut self, text: &str, reset_name: &str, actor: &str) -> Result<Todo, ServiceError> {
        let text = normalized_text(text)?;
        let reset = self
            .config
            .reset(reset_name)
            .ok_or_else(|| ServiceError::UnknownReset(reset_name.to_owned()))?
            .clone();

        let id = TodoId::new();
        self.commit(Event::new(id, actor, EventKind::TodoAdded { text, reset }))?;
        self.get(id).cloned()
    }

    /// Mark a todo complete, or clear its completion mark.
    ///
    /// The completion instant is the event's own timestamp.
    ///
    /// # Errors
    /// Returns [`ServiceError::NotFound`] for an unknown id, or a store
    /// error.
    pub fn set_completed(
        &mut self,
        id: TodoId,
        completed: bool,
        actor: &str,
    ) -> Result<(), ServiceError> {
        self.get(id)?;
        let kind = if completed {
            EventKind::TodoChecked
        } else {
            EventKind::TodoUnchecked
        };
        self.commit(Event::new(id, actor, kind))
    }

    /// Replace a todo's display text. Identity and completion history are
    /// untouched.
    ///
    /// # Errors
    /// Returns [`ServiceError::NotFound`] for an unknown id,
    /// [`ServiceError::EmptyText`] for blank text, or a store error.
    pub fn rename(&mut self, id: TodoId, text: &str, actor: &str) -> Result<(), ServiceError> {
        let text = normalized_text(text)?;
        self.get(id)?;
        self.commit(Event::new(id, actor, EventKind::TodoRenamed { text }))
    }

    /// Remove a todo from the checklist.
    ///
    /// # Errors
    /// Returns [`ServiceError::NotFound`] for an unknown id, or a store
    /// error.
    pub fn remove(&mut self, id: TodoId, actor: &str) -> Result<(), ServiceError> {
        self.get(id)?;
        self.commit(Event::new(id, actor, EventKind::TodoRemoved))
    }

    fn commit(&mut self, event: Event) -> Result<(), ServiceError> {
        self.store
            .append_event(&event)
            .map_err(Into::into)
            .context("failed to append event")?;
        self.todos.apply(&event);
        info!(event = %event.id, todo = %event.todo, "committed event");
        Ok(())
    }
}

fn normalized_text(text: &str) -> Result<String, ServiceError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::EmptyText);
    }
    Ok(trimmed.to_owned())
}
