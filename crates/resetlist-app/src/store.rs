//! Minimal storage abstraction for the event log.

use anyhow::Error;
use resetlist_core::event::Event;
use resetlist_store_file::FileStore;

/// Storage interface required by the checklist service.
///
/// The log is append-only: implementations never rewrite or reorder events.
pub trait EventStore {
    /// Error type bubbled up from the backing store.
    type Error: Into<Error>;

    /// Append a single event to the log.
    ///
    /// # Errors
    /// Returns a store-specific error when persisting the event fails.
    fn append_event(&self, event: &Event) -> Result<(), Self::Error>;

    /// Load every event in the log, oldest first.
    ///
    /// # Errors
    /// Returns a store-specific error when the log cannot be read.
    fn load_events(&self) -> Result<Vec<Event>, Self::Error>;
}

impl EventStore for FileStore {
    type Error = resetlist_store_file::StoreError;

    fn append_event(&self, event: &Event) -> Result<(), Self::Error> {
        Self::append_event(self, event)
    }

    fn load_events(&self) -> Result<Vec<Event>, Self::Error> {
        Self::load_events(self)
    }
}
