pub mod base;
pub mod error;
pub mod file_store;
pub mod keys;
pub mod memory_store;
pub mod no_store;

// Re-export the primary store items so code outside can do
// "use crate::store::{KeyValueStore, create_store};"
pub use base::{create_store, KeyValueStore};
pub use error::StoreError;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use no_store::NoStore;
