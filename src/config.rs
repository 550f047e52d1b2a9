use crate::error::{config_error, env_error, SiteResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Storage key holding the saved-event identifiers
pub const DEFAULT_STORAGE_KEY: &str = "savedEvents";

/// Default location of the file-backed storage
pub const DEFAULT_STORAGE_PATH: &str = "data/storage.json";

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Optional config file read before the environment is applied
pub const CONFIG_FILE: &str = "config/nightlist.toml";

/// Which key-value backend persists the saved events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
    Redis,
}

impl FromStr for StorageBackend {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> SiteResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            "redis" => Ok(StorageBackend::Redis),
            other => Err(config_error(&format!("Unknown storage backend: {}", other))),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend used for the persistent slot
    pub storage: StorageBackend,
    /// JSON file used by the file backend
    pub storage_path: PathBuf,
    /// Redis connection URL used by the redis backend
    pub redis_url: String,
    /// Key of the saved-events slot
    pub storage_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the config file and environment
    pub fn load() -> SiteResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Self::from_file(Path::new(CONFIG_FILE))?.unwrap_or_default();
        config.apply_env()?;
        Ok(config)
    }

    /// Read a TOML config file, `None` if it does not exist
    pub fn from_file(path: &Path) -> SiteResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(Self::from_toml(&content)?))
    }

    pub fn from_toml(content: &str) -> SiteResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Override fields from environment variables when they are set
    fn apply_env(&mut self) -> SiteResult<()> {
        if let Ok(storage) = env::var("NIGHTLIST_STORAGE") {
            self.storage = storage
                .parse()
                .map_err(|_| env_error("NIGHTLIST_STORAGE"))?;
        }
        if let Ok(path) = env::var("NIGHTLIST_STORAGE_PATH") {
            self.storage_path = PathBuf::from(path);
        }
        if let Ok(url) = env::var("REDIS_URL") {
            self.redis_url = url;
        }
        if let Ok(key) = env::var("NIGHTLIST_STORAGE_KEY") {
            if key.trim().is_empty() {
                return Err(env_error("NIGHTLIST_STORAGE_KEY"));
            }
            self.storage_key = key;
        }
        Ok(())
    }
}
