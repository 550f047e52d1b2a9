use nightlist::components::storage::{self, FileStore, KeyValueStore};
use nightlist::components::SavedEventsHandle;
use nightlist::config::{Config, StorageBackend};
use std::sync::Arc;

/// Smoke test to verify that the default config builds a storage backend
#[tokio::test]
async fn test_memory_config_builds_storage() {
    let config = Config {
        storage: StorageBackend::Memory,
        ..Config::default()
    };

    let store = storage::from_config(&config).unwrap();
    assert_eq!(store.name(), "memory");
    assert_eq!(store.get(&config.storage_key).await.unwrap(), None);
}

/// Redis clients are created lazily, so an unreachable server is fine here
#[tokio::test]
async fn test_redis_config_builds_storage() {
    let config = Config {
        storage: StorageBackend::Redis,
        redis_url: "redis://127.0.0.1:1".to_string(),
        ..Config::default()
    };

    let store = storage::from_config(&config).unwrap();
    assert_eq!(store.name(), "redis");
}

/// Saved events survive a restart when backed by a file
#[tokio::test]
async fn test_saved_events_persist_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("storage.json");

    let first = SavedEventsHandle::new(Arc::new(FileStore::new(&path)));
    first.wait_until_loaded().await.unwrap();
    first.toggle_saved_event("ade-closing").await.unwrap();
    first.toggle_saved_event("forest-rave").await.unwrap();
    first.shutdown().await.unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let slots: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(slots["savedEvents"], r#"["ade-closing","forest-rave"]"#);

    let second = SavedEventsHandle::new(Arc::new(FileStore::new(&path)));
    second.wait_until_loaded().await.unwrap();
    assert_eq!(
        second.saved_event_ids().await.unwrap(),
        ["ade-closing", "forest-rave"]
    );
}

/// A corrupt storage file loads as empty and is repaired by the next toggle
#[tokio::test]
async fn test_corrupt_storage_file_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{{{").unwrap();

    let handle = SavedEventsHandle::new(Arc::new(FileStore::new(&path)));
    handle.wait_until_loaded().await.unwrap();
    assert_eq!(handle.saved_event_count().await.unwrap(), 0);

    handle.toggle_saved_event("a").await.unwrap();
    let store = FileStore::new(&path);
    assert_eq!(store.get("savedEvents").await.unwrap().as_deref(), Some(r#"["a"]"#));
}
