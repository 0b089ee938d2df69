use std::collections::HashMap;
use std::sync::Mutex;

use super::{KeyValueStore, StoreError};

/// A process-local substrate backed by a `HashMap`. Never fails.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a consistent map: every mutation is a single insert/remove.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries().remove(key);
        Ok(())
    }

    fn take(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries().remove(key))
    }

    fn contains(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_previous_value() {
        let store = MemoryStore::new();
        store.set("gameQuality", "60").unwrap();
        store.set("gameQuality", "30").unwrap();
        assert_eq!(store.get("gameQuality").as_deref(), Some("30"));
    }

    #[test]
    fn test_take_reads_then_clears() {
        let store = MemoryStore::new();
        store.set("state", "abc").unwrap();
        assert_eq!(store.take("state").unwrap().as_deref(), Some("abc"));
        assert_eq!(store.take("state").unwrap(), None);
        assert!(!store.contains("state"));
    }

    #[test]
    fn test_remove_missing_key_is_not_an_error() {
        let store = MemoryStore::new();
        assert!(store.remove("authToken").is_ok());
    }
}
