//! String key/value stores backing the session
//!
//! Two backends play the role of browser storage: a file in the config
//! directory (durable) and a file in the runtime directory (cleared when the
//! user session ends). An in-memory store exists for tests and for callers
//! that never want tokens on disk.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{NexoraError, NexoraResult};

use super::file_io::{read_json, remove_if_exists, write_json_atomic};

/// A minimal string key/value store
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> NexoraResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> NexoraResult<()>;

    /// Remove a value; removing a missing key is not an error
    fn remove(&self, key: &str) -> NexoraResult<()>;
}

/// A key/value store persisted as a JSON object in a single file
///
/// Every call goes to disk; the file is small and several processes may
/// share it.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store backed by the given file (created lazily)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load(&self) -> NexoraResult<BTreeMap<String, String>> {
        read_json(&self.path)
    }

    fn guard(&self) -> NexoraResult<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| NexoraError::Storage("Session store lock poisoned".into()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> NexoraResult<Option<String>> {
        let _guard = self.guard()?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> NexoraResult<()> {
        let _guard = self.guard()?;
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        write_json_atomic(&self.path, &entries)
    }

    fn remove(&self, key: &str) -> NexoraResult<()> {
        let _guard = self.guard()?;
        let mut entries = self.load()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }

        if entries.is_empty() {
            remove_if_exists(&self.path)
        } else {
            write_json_atomic(&self.path, &entries)
        }
    }
}

/// A process-local key/value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> NexoraResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| NexoraError::Storage("Memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> NexoraResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> NexoraResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> NexoraResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}
