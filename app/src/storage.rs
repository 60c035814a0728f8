//! [`TaskStorage`] implementations and the startup load policy.

use crate::environment::TaskStorage;
use crate::error::StorageError;
use crate::types::Task;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Slot name used when none is configured
pub const DEFAULT_KEY: &str = "todos";

/// Read the persisted task list for session start
///
/// An absent slot and an unreadable slot both yield an empty list. The
/// latter is logged; the slot is left as is until the next save overwrites it.
pub fn load_or_default(storage: &dyn TaskStorage) -> Vec<Task> {
    match storage.load() {
        Ok(Some(todos)) => {
            tracing::info!(key = storage.key(), count = todos.len(), "Loaded persisted tasks");
            todos
        },
        Ok(None) => {
            tracing::debug!(key = storage.key(), "No persisted tasks, starting empty");
            Vec::new()
        },
        Err(error) => {
            tracing::warn!(key = storage.key(), %error, "Ignoring unreadable task list");
            Vec::new()
        },
    }
}

/// One JSON file per slot: `<dir>/<key>.json`
///
/// Writes go to a sibling temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    key: String,
    path: PathBuf,
}

impl JsonFileStorage {
    /// Storage for slot `key` under `dir`
    #[must_use]
    pub fn new(dir: impl AsRef<Path>, key: impl Into<String>) -> Self {
        let key = key.into();
        let path = dir.as_ref().join(format!("{key}.json"));
        Self { key, path }
    }

    /// Full path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskStorage for JsonFileStorage {
    fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> Result<Option<Vec<Task>>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, todos: &[Task]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(todos)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::trace!(path = %self.path.display(), count = todos.len(), "Wrote task list");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemorySlot {
    value: Option<String>,
    saves: usize,
}

/// In-memory slot holding the serialized list, like a browser key-value store
///
/// Clones share the same slot.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    key: String,
    slot: Arc<Mutex<MemorySlot>>,
}

impl MemoryStorage {
    /// Empty slot named `key`
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            slot: Arc::new(Mutex::new(MemorySlot::default())),
        }
    }

    /// Slot pre-filled with a raw value (not validated)
    #[must_use]
    pub fn with_raw(key: impl Into<String>, raw: impl Into<String>) -> Self {
        let storage = Self::new(key);
        storage.lock().value = Some(raw.into());
        storage
    }

    /// Current raw value
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.lock().value.clone()
    }

    /// Number of successful saves so far
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    fn lock(&self) -> MutexGuard<'_, MemorySlot> {
        match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new(DEFAULT_KEY)
    }
}

impl TaskStorage for MemoryStorage {
    fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> Result<Option<Vec<Task>>, StorageError> {
        match self.lock().value.as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, todos: &[Task]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(todos)?;
        let mut slot = self.lock();
        slot.value = Some(raw);
        slot.saves += 1;
        Ok(())
    }
}
