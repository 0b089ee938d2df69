use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use super::{KeyValueStore, StoreError};

/// A durable substrate that keeps every entry in a single JSON object file.
///
/// The whole file is loaded on open and rewritten on every mutation. A mutation
/// only becomes visible once the file has been written successfully.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file starts empty; an unreadable or
    /// corrupt one is discarded with a warning so that startup is never blocked.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(
                        event_name = "store.file.corrupt",
                        event_domain = "store",
                        path = %path.display(),
                        error = %e,
                        "discarding unreadable preference file"
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StoreError::Io(e)),
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        debug!(
            "Loaded {} entries from preference file '{}'",
            entries.len(),
            path.display()
        );
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let serialized = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serialized)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn mutate<R>(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>) -> R,
    ) -> Result<R, StoreError> {
        let mut guard = self.entries();
        let mut next = guard.clone();
        let result = apply(&mut next);
        self.persist(&next)?;
        *guard = next;
        Ok(result)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if !self.contains(key) {
            return Ok(());
        }
        self.mutate(|entries| {
            entries.remove(key);
        })
    }

    fn take(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut guard = self.entries();
        if !guard.contains_key(key) {
            return Ok(None);
        }
        let mut next = guard.clone();
        let taken = next.remove(key);
        self.persist(&next)?;
        *guard = next;
        Ok(taken)
    }

    fn contains(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let store = FileStore::open(&path).unwrap();
        store.set("playerName", "alice").unwrap();
        store.set("fullscreen", "true").unwrap();
        store.remove("fullscreen").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("playerName").as_deref(), Some("alice"));
        assert_eq!(reopened.get("fullscreen"), None);
    }

    #[test]
    fn test_take_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let store = FileStore::open(&path).unwrap();
        store.set("nonce", "n-1").unwrap();
        assert_eq!(store.take("nonce").unwrap().as_deref(), Some("n-1"));
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert!(!reopened.contains("nonce"));
    }

    #[test]
    fn test_take_of_absent_key_does_not_touch_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let store = FileStore::open(nested.join("prefs.json")).unwrap();
        fs::remove_dir_all(&nested).unwrap();

        assert_eq!(store.take("state").unwrap(), None);
        assert!(!nested.exists());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("playerName"), None);
    }

    #[test]
    fn test_missing_parent_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let store = FileStore::open(&path).unwrap();
        store.set("lastRoomUrl", "/_/global/example.org/map.json").unwrap();
        assert!(path.exists());
    }
}
