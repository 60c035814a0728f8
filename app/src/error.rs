//! Error types for the task list.

use thiserror::Error;

/// Errors surfaced by dispatch and by a strict session start
#[derive(Error, Debug)]
pub enum TodoError {
    /// The action kind is not one of the five the reducer handles
    ///
    /// This is a programming error on the dispatching side. State is left
    /// untouched and nothing is persisted.
    #[error("Unknown action: {0}")]
    UnrecognizedAction(String),

    /// Persisted slot could not be read at session start
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors from a [`TaskStorage`](crate::environment::TaskStorage) gateway
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem failure
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value is not a JSON task list
    #[error("Stored task list is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}
