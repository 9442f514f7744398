//! Append-only JSON-lines storage for resetlist events.

mod error;

pub use error::StoreError;

use resetlist_core::event::Event;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

/// Storage backed by an append-only JSON-lines file, one event per line.
///
/// Appends are serialized through an internal mutex so a single store
/// instance can be shared across threads.
pub struct FileStore {
    path: PathBuf,
    append_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store for the given log path.
    ///
    /// The file is not touched until the first append; a missing file loads
    /// as the empty log.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append_lock: Mutex::new(()),
        }
    }

    /// Path of the underlying log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a single event as one JSON line.
    ///
    /// # Errors
    /// Returns an error if the event cannot be serialized or the file cannot
    /// be opened or written.
    pub fn append_event(&self, ev: &Event) -> Result<(), StoreError> {
        let line = serde_json::to_string(ev).map_err(StoreError::Serialize)?;

        let guard = self
            .append_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()?;
        drop(guard);

        debug!(event = %ev.id, todo = %ev.todo, "appended event");
        Ok(())
    }

    /// Load every event in the log, in file order.
    ///
    /// Blank lines are skipped. The log is the source of truth, so a line
    /// that does not parse is an error rather than a silent drop.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or a non-blank line fails
    /// to parse as an event.
    pub fn load_events(&self) -> Result<Vec<Event>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no event log yet");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut events = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let ev = serde_json::from_str(&line).map_err(|source| StoreError::Corrupt {
                line: idx + 1,
                source,
            })?;
            events.push(ev);
        }

        info!(count = events.len(), path = %self.path.display(), "loaded event log");
        Ok(events)
    }
}
