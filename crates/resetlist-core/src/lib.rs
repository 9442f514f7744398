//! Domain types, event replay, and reset-window arithmetic for resetlist.

/// Compact rendering of time deltas.
pub mod duration;
/// Event payload definitions.
pub mod event;
/// Identifier types.
pub mod id;
/// Recurrence definitions.
pub mod recur;
/// Reset-window arithmetic.
pub mod reset;

use crate::event::{Event, EventKind};
use crate::id::TodoId;
use crate::recur::Recurrence;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// A tracked recurring task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    /// Identifier of the todo.
    pub id: TodoId,
    /// Display text. Cosmetic; identity lives in `id`.
    pub text: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    /// Instant of the most recent completion, if any.
    pub last_done: Option<OffsetDateTime>,
    /// Reset cadence.
    pub reset: Recurrence,
}

impl Todo {
    /// Whether the most recent completion falls inside the current reset
    /// window.
    ///
    /// A completion counts iff it happened at or after the previous reset.
    /// Comparing `last_done` against `now` directly would keep completions
    /// from the previous window alive past the boundary.
    #[must_use]
    pub fn is_done(&self, now: OffsetDateTime) -> bool {
        self.last_done
            .is_some_and(|done| done >= reset::prev_reset(&self.reset, now))
    }

    /// Milliseconds until the next reset.
    ///
    /// Always positive: at the boundary instant the reset has just occurred
    /// and the next one is a full interval ahead. Used for sort ordering and
    /// display only.
    #[must_use]
    pub fn millis_remaining(&self, now: OffsetDateTime) -> i64 {
        let remaining = reset::next_reset(&self.reset, now) - now;
        i64::try_from(remaining.whole_milliseconds()).unwrap_or(i64::MAX)
    }
}

/// Materialized checklist state, a fold over the event log.
#[derive(Debug, Clone, Default)]
pub struct TodoList {
    todos: BTreeMap<TodoId, Todo>,
}

impl TodoList {
    /// Apply a single event.
    ///
    /// Events addressing an id the fold does not know are skipped: once a
    /// removal has replayed, stray later events for that id must not
    /// resurrect it.
    pub fn apply(&mut self, ev: &Event) {
        match &ev.kind {
            EventKind::TodoAdded { text, reset } => {
                self.todos.insert(
                    ev.todo,
                    Todo {
                        id: ev.todo,
                        text: text.clone(),
                        last_done: None,
                        reset: reset.clone(),
                    },
                );
            }
            EventKind::TodoChecked => {
                if let Some(todo) = self.todos.get_mut(&ev.todo) {
                    todo.last_done = Some(ev.ts);
                }
            }
            EventKind::TodoUnchecked => {
                if let Some(todo) = self.todos.get_mut(&ev.todo) {
                    todo.last_done = None;
                }
            }
            EventKind::TodoRenamed { text } => {
                if let Some(todo) = self.todos.get_mut(&ev.todo) {
                    todo.text.clone_from(text);
                }
            }
            EventKind::TodoRemoved => {
                self.todos.remove(&ev.todo);
            }
        }
    }

    /// Replay events in time order.
    ///
    /// Events are sorted by timestamp with the event id as a deterministic
    /// tie-break before folding.
    #[must_use]
    pub fn replay(mut events: Vec<Event>) -> Self {
        events.sort_by_key(|e| (e.ts, e.id));
        let mut list = Self::default();
        for ev in &events {
            list.apply(ev);
        }
        list
    }

    /// Look up a todo by id.
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.get(&id)
    }

    /// Iterate over all todos in id order.
    pub fn iter(&self) -> std::collections::btree_map::Values<'_, TodoId, Todo> {
        self.todos.values()
    }

    /// Number of tracked todos.
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Whether the checklist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a Todo;
    type IntoIter = std::collections::btree_map::Values<'a, TodoId, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
