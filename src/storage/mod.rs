//! Durable key-value storage backing the tag registry
//!
//! Two implementations of [`KeyValueStore`]:
//! - [`FileStore`]: one JSON file per key under a data directory, atomic writes
//! - [`MemoryStore`]: in-process map, for embedding and tests

pub mod file_store;
pub mod memory_store;

use anyhow::Result;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Storage key holding the serialized tag collection
pub const TAGS_STORAGE_KEY: &str = "fusion-custom-tags";

/// Minimal string key-value store.
///
/// Values are opaque strings; callers own serialization. Writes replace any
/// previous value for the key.
pub trait KeyValueStore {
    /// Read the value for `key`, `Ok(None)` when nothing was stored
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value for `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
