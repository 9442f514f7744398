//! Error types for file-backed store operations.

use thiserror::Error;

/// Errors that can occur during `FileStore` operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The log file could not be read or written.
    #[error("event log I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An event could not be serialized for appending.
    #[error("failed to serialize event: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A log line could not be parsed back into an event.
    #[error("corrupt event log at line {line}: {source}")]
    Corrupt {
        /// 1-based line number of the offending entry.
        line: usize,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}
