//! Injected dependencies for the task list reducer.

use crate::error::StorageError;
use crate::types::Task;
use std::sync::Arc;
use tasklist_core::environment::Clock;

/// Persistence gateway for the task list
///
/// A single key-value slot holding the full task sequence. Every save
/// overwrites the previous value.
pub trait TaskStorage: Send + Sync {
    /// Name of the slot
    fn key(&self) -> &str;

    /// Read the stored sequence
    ///
    /// Returns `Ok(None)` when nothing has been stored under the key yet.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the slot exists but cannot be read or
    /// parsed.
    fn load(&self) -> Result<Option<Vec<Task>>, StorageError>;

    /// Overwrite the stored sequence
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails.
    fn save(&self, todos: &[Task]) -> Result<(), StorageError>;
}

/// Environment dependencies for the task list reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock used to derive fresh task ids
    pub clock: Arc<dyn Clock>,
    /// Where `todos` is mirrored after every mutation, if anywhere
    pub storage: Option<Arc<dyn TaskStorage>>,
}

impl TodoEnvironment {
    /// Environment with write-through persistence
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, storage: Arc<dyn TaskStorage>) -> Self {
        Self {
            clock,
            storage: Some(storage),
        }
    }

    /// Environment that keeps everything in memory
    #[must_use]
    pub fn ephemeral(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            storage: None,
        }
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment")
            .field("storage", &self.storage.as_ref().map(|s| s.key().to_string()))
            .finish_non_exhaustive()
    }
}
