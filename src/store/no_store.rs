use super::{KeyValueStore, StoreError};

/// A disabled substrate: reads are always absent and writes are dropped.
///
/// Preferences degrade to their defaults and every handshake verification fails.
pub struct NoStore;

impl NoStore {
    pub fn new() -> Self {
        NoStore
    }
}

impl Default for NoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for NoStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
