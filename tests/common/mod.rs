#![allow(dead_code)]

use async_trait::async_trait;
use nightlist::components::storage::{KeyValueStore, MemoryStore};
use nightlist::error::{storage_error, SiteResult};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Storage whose first read blocks until `open()` is called, recording
/// every write it receives
#[derive(Clone, Default)]
pub struct GatedStore {
    inner: MemoryStore,
    gate: Arc<Notify>,
    writes: Arc<Mutex<Vec<String>>>,
}

impl GatedStore {
    pub fn with_value(key: &str, value: &str) -> Self {
        Self {
            inner: MemoryStore::with_value(key, value),
            ..Default::default()
        }
    }

    /// Let the pending read complete
    pub fn open(&self) {
        self.gate.notify_one();
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    /// Current value under `key`, read without waiting on the gate
    pub async fn stored(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.unwrap()
    }
}

#[async_trait]
impl KeyValueStore for GatedStore {
    async fn get(&self, key: &str) -> SiteResult<Option<String>> {
        self.gate.notified().await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> SiteResult<()> {
        self.writes.lock().unwrap().push(value.to_string());
        self.inner.set(key, value).await
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}

/// Storage that fails reads and/or writes
#[derive(Clone, Default)]
pub struct FailingStore {
    pub fail_reads: bool,
    pub fail_writes: bool,
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> SiteResult<Option<String>> {
        if self.fail_reads {
            Err(storage_error("read refused"))
        } else {
            Ok(None)
        }
    }

    async fn set(&self, _key: &str, _value: &str) -> SiteResult<()> {
        if self.fail_writes {
            Err(storage_error("quota exceeded"))
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

pub fn shared(store: impl KeyValueStore + 'static) -> Arc<dyn KeyValueStore> {
    Arc::new(store)
}
