use std::sync::Arc;

use tracing::{error, info};

use super::{file_store::FileStore, memory_store::MemoryStore, no_store::NoStore, StoreError};
use crate::config::{StoreBackend, StoreConfig};

/// The KeyValueStore trait abstracts the string-keyed persistence substrate
/// shared by the preference store and the handshake tokens.
///
/// Every method is a single synchronous key operation.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Read a value and delete it in the same step.
    ///
    /// Backends holding a lock should override this so the read and the delete
    /// cannot be interleaved with another writer.
    fn take(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self.get(key);
        self.remove(key)?;
        Ok(value)
    }

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn is_enabled(&self) -> bool {
        // Real stores are always enabled, only NoStore says otherwise
        true
    }
}

/// Creates a concrete substrate based on the StoreConfig.
/// If `store.enabled = false`, returns NoStore. Otherwise, opens the specified backend.
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    if !config.enabled {
        info!("Preference store is disabled. Using NoStore.");
        return Ok(Arc::new(NoStore::new()));
    }

    match &config.backend {
        Some(StoreBackend::Memory) => {
            info!("Using in-memory preference store.");
            Ok(Arc::new(MemoryStore::new()))
        }
        Some(StoreBackend::File(file_config)) => {
            let store = FileStore::open(&file_config.path)?;
            info!("Opened file preference store at '{}'.", file_config.path);
            Ok(Arc::new(store))
        }
        None => {
            error!("Store is enabled, but no backend config is provided!");
            Err(StoreError::Misconfigured(
                "store is enabled but no backend is configured".to_string(),
            ))
        }
    }
}
