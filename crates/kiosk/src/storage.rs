//! Per-device key/value storage for small JSON payloads.
//!
//! [`FileStorage`] keeps one file per key on disk; [`MemoryStorage`] keeps
//! entries in process and can simulate disabled or full storage.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Why a storage operation did not complete.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage is unavailable")]
    Unavailable,

    #[error("Storage quota exceeded")]
    QuotaExceeded,

    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Synchronous string storage addressed by key.
pub trait KeyValueStorage: Send + Sync {
    /// The stored value, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the key. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// FileStorage
// ---------------------------------------------------------------------------

/// Stores each key as `<dir>/<key>.json`.
///
/// The directory is not created; when it is missing every operation fails
/// with [`StorageError::Unavailable`].
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !self.dir.is_dir() {
            return Err(StorageError::Unavailable);
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        // Readers never see a partially written payload.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// In-process storage with switchable availability and an optional quota.
#[derive(Debug)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    available: AtomicBool,
    /// Largest value, in bytes, that `set` accepts.
    quota: Option<usize>,
    writes: AtomicUsize,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
            quota: None,
            writes: AtomicUsize::new(0),
        }
    }

    pub fn with_quota(mut self, max_value_bytes: usize) -> Self {
        self.quota = Some(max_value_bytes);
        self
    }

    /// Simulate storage being disabled (`false`) or re-enabled.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of successful `set` and `remove` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable);
        }
        Ok(self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries()?;
        if self.quota.is_some_and(|max| value.len() > max) {
            return Err(StorageError::QuotaExceeded);
        }
        entries.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(key);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn file_storage_round_trips_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(storage.get("kiosk-favorites").unwrap().is_none());

        storage.set("kiosk-favorites", "[1,2]").unwrap();
        assert_eq!(storage.get("kiosk-favorites").unwrap().as_deref(), Some("[1,2]"));
        assert!(dir.path().join("kiosk-favorites.json").is_file());

        storage.remove("kiosk-favorites").unwrap();
        storage.remove("kiosk-favorites").unwrap();
        assert!(storage.get("kiosk-favorites").unwrap().is_none());
    }

    #[test]
    fn file_storage_without_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("missing"));

        assert_matches!(storage.get("k"), Err(StorageError::Unavailable));
        assert_matches!(storage.set("k", "v"), Err(StorageError::Unavailable));
        assert_matches!(storage.remove("k"), Err(StorageError::Unavailable));
    }

    #[test]
    fn memory_storage_can_be_disabled() {
        let storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();

        storage.set_available(false);
        assert_matches!(storage.get("k"), Err(StorageError::Unavailable));

        storage.set_available(true);
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn memory_storage_enforces_quota() {
        let storage = MemoryStorage::new().with_quota(4);

        storage.set("k", "[1]").unwrap();
        assert_matches!(storage.set("k", "[1,2,3]"), Err(StorageError::QuotaExceeded));
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("[1]"));
        assert_eq!(storage.write_count(), 1);
    }
}
