//! Key-value persistence used by the saved-events store.
//!
//! The store never reaches for ambient global storage; it is handed an
//! `Arc<dyn KeyValueStore>` and only ever calls `get` and `set` on it.

mod file;
mod memory;
mod redis_store;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

use crate::config::{Config, StorageBackend};
use crate::error::SiteResult;
use async_trait::async_trait;
use std::sync::Arc;

/// A string key-value slot store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` when the slot is empty
    async fn get(&self, key: &str) -> SiteResult<Option<String>>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> SiteResult<()>;

    /// Short backend name used in logs
    fn name(&self) -> &'static str;
}

/// Build the backend selected in the configuration
pub fn from_config(config: &Config) -> SiteResult<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.storage {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => Arc::new(FileStore::new(&config.storage_path)),
        StorageBackend::Redis => Arc::new(RedisStore::open(&config.redis_url)?),
    };
    tracing::debug!("Using {} storage backend", store.name());
    Ok(store)
}
