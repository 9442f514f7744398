use crate::id::{EventId, TodoId};
use crate::recur::Recurrence;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Schema identifier written on new events.
pub const SCHEMA: &str = "resetlist-event@1";

/// Event envelope, stored as one JSON document per log line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Schema identifier for forward compatibility.
    pub schema: String,
    /// Unique event identifier.
    pub id: EventId,
    #[serde(with = "time::serde::rfc3339")]
    /// Event timestamp in UTC.
    pub ts: OffsetDateTime,
    /// Who performed the action.
    pub actor: String,
    /// Target todo identifier.
    pub todo: TodoId,
    /// Domain-specific payload.
    pub kind: EventKind,
}

/// Event kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventKind {
    /// A todo enters the checklist.
    TodoAdded {
        /// Display text.
        text: String,
        /// Reset cadence, embedded in full so replay never depends on the
        /// live catalog.
        reset: Recurrence,
    },
    /// The todo is marked complete; the event timestamp is the completion
    /// instant.
    TodoChecked,
    /// The completion mark is cleared.
    TodoUnchecked,
    /// The display text is replaced. Identity lives in the id, so history
    /// survives any number of renames.
    TodoRenamed {
        /// New display text.
        text: String,
    },
    /// The todo leaves the checklist.
    TodoRemoved,
}

impl Event {
    /// Create a new event with the current timestamp.
    #[must_use]
    pub fn new(todo: TodoId, actor: &str, kind: EventKind) -> Self {
        Self {
            schema: SCHEMA.to_owned(),
            id: EventId::new(),
            ts: OffsetDateTime::now_utc(),
            actor: actor.to_owned(),
            todo,
            kind,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::recur::Interval;

    #[test]
    fn event_json_roundtrip() {
        let event = Event::new(
            TodoId::new(),
            "tester",
            EventKind::TodoAdded {
                text: "Buy milk".into(),
                reset: Recurrence {
                    name: "7AM".into(),
                    interval: Interval::Daily,
                    hour_offset: 7,
                },
            },
        );

        let json = serde_json::to_string(&event).expect("must serialize event");
        assert!(json.contains("\"type\":\"todoAdded\""));
        assert!(json.contains("\"schema\":\"resetlist-event@1\""));

        let parsed: Event = serde_json::from_str(&json).expect("must parse event");
        assert_eq!(parsed.id, event.id);
        assert_eq!(parsed.todo, event.todo);
        assert_eq!(parsed.ts, event.ts);
        match parsed.kind {
            EventKind::TodoAdded { text, reset } => {
                assert_eq!(text, "Buy milk");
                assert_eq!(reset.hour_offset, 7);
            }
            other => panic!("unexpected event kind: {other:?}"),
        }
    }

    #[test]
    fn marker_kinds_carry_only_their_tag() {
        let event = Event::new(TodoId::new(), "tester", EventKind::TodoChecked);
        let json = serde_json::to_string(&event).expect("must serialize event");
        assert!(json.contains("\"type\":\"todoChecked\""));
    }
}
