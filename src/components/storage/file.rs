use super::KeyValueStore;
use crate::error::{storage_error, SiteResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

/// Storage kept in a single JSON object file, `{"key": "value", ...}`
///
/// Writes go to a sibling temp file first and are renamed into place.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> SiteResult<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            storage_error(&format!(
                "Storage file {} is corrupt: {}",
                self.path.display(),
                e
            ))
        })
    }

    async fn write_all(&self, data: &BTreeMap<String, String>) -> SiteResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> SiteResult<Option<String>> {
        let _guard = self.lock.lock().await;
        let data = self.read_all().await?;
        Ok(data.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> SiteResult<()> {
        let _guard = self.lock.lock().await;
        // A corrupt file is replaced rather than blocking every write
        let mut data = match self.read_all().await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Discarding unreadable storage file: {}", e);
                BTreeMap::new()
            }
        };
        data.insert(key.to_string(), value.to_string());
        self.write_all(&data).await
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
