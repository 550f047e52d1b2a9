use super::KeyValueStore;
use crate::error::SiteResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-process storage, lost when the process exits
///
/// Clones share the same underlying map, so a test can keep one clone
/// to inspect what a store instance wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one slot already filled
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut data = HashMap::new();
        data.insert(key.to_string(), value.to_string());
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> SiteResult<Option<String>> {
        let data = self.data.lock().await;
        Ok(data.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> SiteResult<()> {
        let mut data = self.data.lock().await;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
