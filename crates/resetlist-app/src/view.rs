//! Display projections of the checklist.

use resetlist_core::id::TodoId;
use resetlist_core::{Todo, duration, reset};
use serde::Serialize;
use time::OffsetDateTime;

/// A todo projected for display at a given instant.
#[derive(Debug, Clone, Serialize)]
pub struct TodoView {
    /// Identifier of the todo.
    pub id: TodoId,
    /// Display text.
    pub text: String,
    /// Name of the reset cadence.
    pub reset: String,
    #[serde(with = "time::serde::rfc3339::option")]
    /// Instant of the most recent completion, if any.
    pub last_done: Option<OffsetDateTime>,
    /// Whether the completion falls inside the current reset window.
    pub done: bool,
    #[serde(with = "time::serde::rfc3339")]
    /// Instant of the next reset.
    pub next_reset: OffsetDateTime,
    /// Time until the next reset, rendered for display.
    pub remaining: String,
}

impl TodoView {
    /// Project a todo for display at `now`.
    #[must_use]
    pub fn at(todo: &Todo, now: OffsetDateTime) -> Self {
        let next = reset::next_reset(&todo.reset, now);
        Self {
            id: todo.id,
            text: todo.text.clone(),
            reset: todo.reset.name.clone(),
            last_done: todo.last_done,
            done: todo.is_done(now),
            next_reset: next,
            remaining: duration::format_delta(now, next),
        }
    }
}
