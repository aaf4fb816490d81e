use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use super::{KeyValueStore, StorageError};

/// File-backed store: the whole key space lives in one JSON object file,
/// read and rewritten on each operation. No cross-process locking —
/// single-user, single-instance usage is assumed.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open (or create) the store file under `dir`.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join("storage.json"),
        })
    }

    fn read_map(&self) -> Result<HashMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), StorageError> {
        let body = serde_json::to_string_pretty(map)?;
        // Stage then rename so a crash mid-write never truncates the store.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, body)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and non-persistent sessions. The fail switch
/// simulates an unavailable or quota-exhausted backend so the
/// fault-absorption paths can be exercised.
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
    fail: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Direct peek at a raw stored value, bypassing the fail switch.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.map
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Seed a raw value, bypassing the fail switch.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.map
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("simulated failure".into()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self
            .map
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.map
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.map
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            store.set("esas_v1", "{}").unwrap();
        }
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("esas_v1").unwrap(), Some("{}".to_string()));
    }

    #[test]
    fn file_store_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get("b").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn memory_store_fail_switch() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();

        store.set_fail(true);
        assert!(store.get("k").is_err());
        assert!(store.set("k", "w").is_err());

        store.set_fail(false);
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn remove_of_absent_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove("missing").is_ok());
    }
}
