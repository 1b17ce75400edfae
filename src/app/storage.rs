//! Durable key/value preferences (the client-side storage the UI persists into).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

/// Key/value store for persisted preferences.
///
/// Values are JSON; writes are best-effort and never fail the caller.
pub trait PreferenceStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<Value>;
    /// Store `value` under `key`.
    fn set(&self, key: &str, value: Value);
    /// Remove `key`.
    fn remove(&self, key: &str);
}

/// Lock a map, recovering the data if another holder panicked.
fn lock(map: &Mutex<BTreeMap<String, Value>>) -> MutexGuard<'_, BTreeMap<String, Value>> {
    match map.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Preferences kept in a single JSON object on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    /// File backing the store.
    path: PathBuf,
    /// In-memory copy of the file.
    entries: Mutex<BTreeMap<String, Value>>,
}

impl JsonFileStore {
    /// What: Open the store at `path`, loading existing entries.
    ///
    /// Inputs:
    /// - `path`: JSON file (created on first write)
    ///
    /// Output:
    /// - Store with the file's entries, or empty when the file is missing or unreadable.
    ///
    /// Details:
    /// - A corrupt file is logged and treated as empty; it is overwritten on the next write.
    #[must_use]
    pub fn open(path: &Path) -> Self {
        let entries = match fs::read_to_string(path) {
            Ok(s) => match serde_json::from_str::<BTreeMap<String, Value>>(&s) {
                Ok(map) => {
                    tracing::debug!(
                        path = %path.display(),
                        keys = map.len(),
                        "[Persist] Loaded preferences"
                    );
                    map
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "[Persist] Preferences file is not a JSON object; starting empty"
                    );
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self {
            path: path.to_path_buf(),
            entries: Mutex::new(entries),
        }
    }

    /// File backing the store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole map to disk, logging failures.
    fn flush(&self, entries: &BTreeMap<String, Value>) {
        let Ok(s) = serde_json::to_string_pretty(entries) else {
            return;
        };
        if let Some(dir) = self.path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        match fs::write(&self.path, &s) {
            Ok(()) => {
                tracing::trace!(
                    path = %self.path.display(),
                    bytes = s.len(),
                    "[Persist] Preferences written"
                );
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "[Persist] Failed to write preferences"
                );
            }
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        let mut entries = lock(&self.entries);
        entries.insert(key.to_string(), value);
        self.flush(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = lock(&self.entries);
        if entries.remove(key).is_some() {
            self.flush(&entries);
        }
    }
}

/// In-memory store for tests and one-off sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Entries.
    entries: Mutex<BTreeMap<String, Value>>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        lock(&self.entries).insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        lock(&self.entries).remove(key);
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<Value> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}
