mod common;

use common::{shared, FailingStore, GatedStore};
use nightlist::components::storage::{KeyValueStore, MemoryStore};
use nightlist::components::SavedEventsHandle;
use std::collections::HashMap;

const KEY: &str = "savedEvents";

async fn loaded_store(storage: &MemoryStore) -> SavedEventsHandle {
    let handle = SavedEventsHandle::new(shared(storage.clone()));
    handle.wait_until_loaded().await.unwrap();
    handle
}

#[tokio::test]
async fn test_toggle_twice_restores_membership() {
    let storage = MemoryStore::new();
    let handle = loaded_store(&storage).await;

    assert!(!handle.is_event_saved("ade-closing").await.unwrap());
    assert!(handle.toggle_saved_event("ade-closing").await.unwrap());
    assert!(handle.is_event_saved("ade-closing").await.unwrap());
    assert!(!handle.toggle_saved_event("ade-closing").await.unwrap());
    assert!(!handle.is_event_saved("ade-closing").await.unwrap());

    // And from the saved side
    handle.toggle_saved_event("rooftop").await.unwrap();
    handle.toggle_saved_event("boat-party").await.unwrap();
    handle.toggle_saved_event("boat-party").await.unwrap();
    assert!(handle.is_event_saved("rooftop").await.unwrap());
    assert_eq!(handle.saved_event_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_count_matches_odd_toggles() {
    let storage = MemoryStore::new();
    let handle = loaded_store(&storage).await;

    let sequence = ["a", "b", "a", "c", "d", "c", "a", "e", "b", "b", "d", "f"];
    let mut toggles: HashMap<&str, usize> = HashMap::new();
    for id in sequence {
        handle.toggle_saved_event(id).await.unwrap();
        *toggles.entry(id).or_default() += 1;

        let expected = toggles.values().filter(|count| *count % 2 == 1).count();
        assert_eq!(handle.saved_event_count().await.unwrap(), expected);
    }

    // a: 3, b: 3, c: 2, d: 2, e: 1, f: 1
    assert_eq!(handle.saved_event_ids().await.unwrap(), ["a", "e", "b", "f"]);
}

#[tokio::test]
async fn test_writes_through_as_json_list() {
    let storage = MemoryStore::new();
    let handle = loaded_store(&storage).await;

    handle.toggle_saved_event("warehouse").await.unwrap();
    handle.toggle_saved_event("rooftop").await.unwrap();

    assert_eq!(
        storage.get(KEY).await.unwrap().as_deref(),
        Some(r#"["warehouse","rooftop"]"#)
    );

    handle.toggle_saved_event("warehouse").await.unwrap();
    assert_eq!(
        storage.get(KEY).await.unwrap().as_deref(),
        Some(r#"["rooftop"]"#)
    );
}

#[tokio::test]
async fn test_rehydrated_store_has_same_membership() {
    let storage = MemoryStore::new();

    let first = loaded_store(&storage).await;
    for id in ["warehouse", "rooftop", "forest", "rooftop", "dockside"] {
        first.toggle_saved_event(id).await.unwrap();
    }
    let before = first.saved_event_ids().await.unwrap();
    first.shutdown().await.unwrap();

    let second = loaded_store(&storage).await;
    assert_eq!(second.saved_event_ids().await.unwrap(), before);
    assert_eq!(before, ["warehouse", "forest", "dockside"]);
    assert!(second.is_event_saved("forest").await.unwrap());
    assert!(!second.is_event_saved("rooftop").await.unwrap());
}

#[tokio::test]
async fn test_custom_key() {
    let storage = MemoryStore::new();
    let handle = SavedEventsHandle::with_key(shared(storage.clone()), "bookmarks");
    handle.wait_until_loaded().await.unwrap();
    handle.toggle_saved_event("x").await.unwrap();

    assert_eq!(storage.get("bookmarks").await.unwrap().as_deref(), Some(r#"["x"]"#));
    assert_eq!(storage.get(KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_malformed_value_hydrates_empty_and_heals() {
    let storage = MemoryStore::with_value(KEY, "not-json");
    let handle = loaded_store(&storage).await;

    assert!(handle.is_loaded());
    assert_eq!(handle.saved_event_count().await.unwrap(), 0);

    // The next toggle writes a valid value back
    handle.toggle_saved_event("ade-closing").await.unwrap();
    assert_eq!(
        storage.get(KEY).await.unwrap().as_deref(),
        Some(r#"["ade-closing"]"#)
    );
}

#[tokio::test]
async fn test_wrong_json_shape_hydrates_empty() {
    for raw in [r#"{"ids": ["a"]}"#, "[1, 2, 3]", "null", r#""a""#] {
        let storage = MemoryStore::with_value(KEY, raw);
        let handle = loaded_store(&storage).await;
        assert_eq!(handle.saved_event_count().await.unwrap(), 0, "value {}", raw);
    }
}

#[tokio::test]
async fn test_persisted_duplicates_collapse() {
    let storage = MemoryStore::with_value(KEY, r#"["a","b","a"]"#);
    let handle = loaded_store(&storage).await;

    assert_eq!(handle.saved_event_ids().await.unwrap(), ["a", "b"]);
    // One toggle is enough to remove it
    assert!(!handle.toggle_saved_event("a").await.unwrap());
    assert!(!handle.is_event_saved("a").await.unwrap());
}

#[tokio::test]
async fn test_no_writes_before_hydration_and_early_toggles_survive() {
    let storage = GatedStore::with_value(KEY, r#"["a","b"]"#);
    let handle = SavedEventsHandle::new(shared(storage.clone()));

    // Hydration is blocked, toggles still answer immediately
    assert!(!handle.is_loaded());
    assert!(handle.toggle_saved_event("c").await.unwrap());
    assert!(handle.toggle_saved_event("a").await.unwrap());
    assert!(!handle.is_loaded());
    assert!(storage.writes().is_empty());

    storage.open();
    handle.wait_until_loaded().await.unwrap();

    // "a" was saved before and toggled once, so it is removed
    assert_eq!(handle.saved_event_ids().await.unwrap(), ["b", "c"]);
    assert_eq!(storage.writes(), [r#"["b","c"]"#]);
    assert_eq!(storage.stored(KEY).await.as_deref(), Some(r#"["b","c"]"#));
}

#[tokio::test]
async fn test_early_toggle_answers_against_unloaded_set() {
    let storage = GatedStore::with_value(KEY, r#"["a"]"#);
    let handle = SavedEventsHandle::new(shared(storage.clone()));

    // Before loading the set is empty, so the toggle reports "saved"
    assert!(handle.toggle_saved_event("a").await.unwrap());

    storage.open();
    handle.wait_until_loaded().await.unwrap();

    // Replayed on top of the stored ["a"], it removes the bookmark instead
    assert!(!handle.is_event_saved("a").await.unwrap());
    assert_eq!(storage.stored(KEY).await.as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_hydration_without_early_toggles_does_not_write() {
    let storage = GatedStore::with_value(KEY, r#"["a"]"#);
    let handle = SavedEventsHandle::new(shared(storage.clone()));

    storage.open();
    handle.wait_until_loaded().await.unwrap();

    assert_eq!(handle.saved_event_ids().await.unwrap(), ["a"]);
    assert!(storage.writes().is_empty());
}

#[tokio::test]
async fn test_read_failure_hydrates_empty() {
    let storage = FailingStore {
        fail_reads: true,
        fail_writes: false,
    };
    let handle = SavedEventsHandle::new(shared(storage));
    handle.wait_until_loaded().await.unwrap();

    assert!(handle.is_loaded());
    assert_eq!(handle.saved_event_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_write_failure_is_invisible() {
    let storage = FailingStore {
        fail_reads: false,
        fail_writes: true,
    };
    let handle = SavedEventsHandle::new(shared(storage));
    handle.wait_until_loaded().await.unwrap();

    assert!(handle.toggle_saved_event("sold-out").await.unwrap());
    assert!(handle.is_event_saved("sold-out").await.unwrap());
    assert_eq!(handle.saved_event_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_clones_share_one_store() {
    let storage = MemoryStore::new();
    let handle = loaded_store(&storage).await;
    let other = handle.clone();

    handle.toggle_saved_event("a").await.unwrap();
    assert!(other.is_event_saved("a").await.unwrap());
    assert!(other.is_loaded());
}

#[tokio::test]
async fn test_requests_fail_after_shutdown() {
    let storage = MemoryStore::new();
    let handle = loaded_store(&storage).await;

    handle.shutdown().await.unwrap();
    assert!(handle.toggle_saved_event("a").await.is_err());
}
