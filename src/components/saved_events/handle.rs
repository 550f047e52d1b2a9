use super::actor::{SavedEventsActor, SavedEventsActorHandle};
use crate::components::storage::KeyValueStore;
use crate::config::DEFAULT_STORAGE_KEY;
use crate::error::SiteResult;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the saved-events store
///
/// Cheap to clone; every clone talks to the same actor. Must be created
/// inside a tokio runtime.
#[derive(Clone)]
pub struct SavedEventsHandle {
    actor_handle: SavedEventsActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl SavedEventsHandle {
    /// Spawn the actor using the default `savedEvents` slot
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Spawn the actor persisting under `key`; hydration starts immediately
    pub fn with_key(storage: Arc<dyn KeyValueStore>, key: &str) -> Self {
        let (actor, handle) = SavedEventsActor::new(storage, key);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Whether `event_id` is currently bookmarked
    pub async fn is_event_saved(&self, event_id: &str) -> SiteResult<bool> {
        self.actor_handle.is_saved(event_id).await
    }

    /// Bookmark or un-bookmark `event_id`, returning whether it is now saved
    ///
    /// Persistence failures are logged by the actor and do not fail the toggle.
    ///
    /// Before [`is_loaded`](Self::is_loaded) turns true the answer is taken
    /// against the set as it stands without the stored ids. The toggle is
    /// replayed on top of them once loading finishes, which can flip the
    /// result, so only trust the returned value after loading.
    pub async fn toggle_saved_event(&self, event_id: &str) -> SiteResult<bool> {
        self.actor_handle.toggle(event_id).await
    }

    pub async fn saved_event_count(&self) -> SiteResult<usize> {
        self.actor_handle.count().await
    }

    /// Saved ids in the order they were bookmarked
    pub async fn saved_event_ids(&self) -> SiteResult<Vec<String>> {
        self.actor_handle.snapshot().await
    }

    /// True once the initial read from storage has completed or failed
    pub fn is_loaded(&self) -> bool {
        self.actor_handle.is_loaded()
    }

    pub async fn wait_until_loaded(&self) -> SiteResult<()> {
        self.actor_handle.wait_until_loaded().await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> SiteResult<()> {
        self.actor_handle.shutdown().await
    }
}
