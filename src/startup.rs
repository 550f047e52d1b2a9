use crate::components::storage;
use crate::components::SavedEventsHandle;
use crate::config::Config;
use crate::error::Error;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,nightlist=info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Build the configured storage backend and spawn the saved-events store
pub async fn start_saved_events(config: &Config) -> miette::Result<SavedEventsHandle> {
    let storage = storage::from_config(config)?;
    let handle = SavedEventsHandle::with_key(Arc::clone(&storage), &config.storage_key);
    handle.wait_until_loaded().await?;
    info!(
        "Saved events ready ({} storage, key '{}')",
        storage.name(),
        config.storage_key
    );
    Ok(handle)
}
