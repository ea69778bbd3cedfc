//! Key-value store abstraction.
//!
//! The studio persists its whole library as one JSON string under one fixed
//! key, so the store contract is deliberately small: string keys, string
//! values, whole-value overwrites. [`FileStore`] is the production
//! implementation (one `<key>.json` document per key); [`MemoryStore`] backs
//! tests and ephemeral sessions.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{PersistenceError, Result};

/// Synchronous string-keyed storage.
///
/// Reads of an absent key return `Ok(None)`; a first run is not an error.
/// Writes replace the whole value; there are no partial updates.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`. Removing an absent key is a no-op.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// File-backed store: a directory holding one `<key>.json` document per key.
///
/// Writes are atomic (temp file + fsync + rename) so a crash mid-save can
/// never leave a half-written library behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on first
    /// write, not here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory this store writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are fixed application constants, but sanitize anyway so a
        // hostile key cannot escape the store directory.
        let file: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{file}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::Io {
                operation: "read",
                path,
                source: e,
            }),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);

        fs::create_dir_all(&self.root).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: self.root.clone(),
            source: e,
        })?;

        // Write to a temp file first, then rename for atomicity.
        let temp_path = path.with_extension("json.tmp");
        let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(value.as_bytes())
            .map_err(|e| PersistenceError::Io {
                operation: "write",
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| PersistenceError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &path).map_err(|e| PersistenceError::AtomicWriteFailed {
            temp_path,
            target_path: path.clone(),
            source: e,
        })?;

        tracing::debug!(key, path = %path.display(), "store write");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::Io {
                operation: "remove",
                path,
                source: e,
            }),
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
///
/// Counts writes so tests can assert that clean states trigger no redundant
/// saves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `put` calls performed so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes += 1;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        assert_eq!(store.get("library").unwrap(), None);
        store.put("library", "{\"novels\":[]}").unwrap();
        assert_eq!(
            store.get("library").unwrap().as_deref(),
            Some("{\"novels\":[]}")
        );

        store.remove("library").unwrap();
        assert_eq!(store.get("library").unwrap(), None);
        // Removing again is still fine.
        store.remove("library").unwrap();
    }

    #[test]
    fn test_file_store_overwrites_whole_value() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.put("k", "first").unwrap();
        store.put("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_file_store_sanitizes_keys() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.put("../escape/attempt", "data").unwrap();
        // The write stayed inside the store directory.
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(store.get("../escape/attempt").unwrap().as_deref(), Some("data"));
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryStore::new();
        assert_eq!(store.write_count(), 0);

        store.put("a", "1").unwrap();
        store.put("a", "2").unwrap();
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
    }
}
