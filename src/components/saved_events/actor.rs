use super::set::SavedEventSet;
use crate::components::storage::KeyValueStore;
use crate::error::{component_error, SiteResult};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

/// The saved-events actor that owns the set and talks to storage
pub struct SavedEventsActor {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    set: SavedEventSet,
    // Toggles received before hydration, replayed on top of the persisted set
    pending: Vec<String>,
    loaded_tx: watch::Sender<bool>,
    command_rx: mpsc::Receiver<SavedEventsCommand>,
}

/// Commands that can be sent to the saved-events actor
pub enum SavedEventsCommand {
    IsSaved(String, oneshot::Sender<bool>),
    Toggle(String, oneshot::Sender<bool>),
    Count(oneshot::Sender<usize>),
    Snapshot(oneshot::Sender<Vec<String>>),
    Shutdown,
}

/// Handle for communicating with the saved-events actor
#[derive(Clone)]
pub struct SavedEventsActorHandle {
    command_tx: mpsc::Sender<SavedEventsCommand>,
    loaded_rx: watch::Receiver<bool>,
}

impl SavedEventsActorHandle {
    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> SavedEventsCommand,
    ) -> SiteResult<T> {
        let (response_tx, response_rx) = oneshot::channel();
        self.command_tx
            .send(command(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .await
            .map_err(|_| component_error("Response channel closed"))
    }

    pub async fn is_saved(&self, event_id: &str) -> SiteResult<bool> {
        let event_id = event_id.to_string();
        self.request(|tx| SavedEventsCommand::IsSaved(event_id, tx)).await
    }

    pub async fn toggle(&self, event_id: &str) -> SiteResult<bool> {
        let event_id = event_id.to_string();
        self.request(|tx| SavedEventsCommand::Toggle(event_id, tx)).await
    }

    pub async fn count(&self) -> SiteResult<usize> {
        self.request(SavedEventsCommand::Count).await
    }

    pub async fn snapshot(&self) -> SiteResult<Vec<String>> {
        self.request(SavedEventsCommand::Snapshot).await
    }

    pub fn is_loaded(&self) -> bool {
        *self.loaded_rx.borrow()
    }

    pub async fn wait_until_loaded(&self) -> SiteResult<()> {
        let mut loaded_rx = self.loaded_rx.clone();
        loaded_rx
            .wait_for(|loaded| *loaded)
            .await
            .map_err(|_| component_error("Saved events actor stopped before loading"))?;
        Ok(())
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> SiteResult<()> {
        let _ = self.command_tx.send(SavedEventsCommand::Shutdown).await;
        Ok(())
    }
}

impl SavedEventsActor {
    /// Create a new actor and return its handle
    pub fn new(storage: Arc<dyn KeyValueStore>, key: &str) -> (Self, SavedEventsActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);
        let (loaded_tx, loaded_rx) = watch::channel(false);

        let actor = Self {
            storage,
            key: key.to_string(),
            set: SavedEventSet::new(),
            pending: Vec::new(),
            loaded_tx,
            command_rx,
        };

        let handle = SavedEventsActorHandle {
            command_tx,
            loaded_rx,
        };

        (actor, handle)
    }

    /// Hydrate from storage and process commands until shutdown
    pub async fn run(mut self) {
        info!("Saved events actor started");

        let storage = Arc::clone(&self.storage);
        let key = self.key.clone();
        let hydration = async move { storage.get(&key).await };
        tokio::pin!(hydration);
        let mut hydrated = false;

        loop {
            tokio::select! {
                biased;
                result = &mut hydration, if !hydrated => {
                    hydrated = true;
                    self.hydrate(result).await;
                }
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(SavedEventsCommand::Shutdown) | None => {
                            info!("Saved events actor shutting down");
                            break;
                        }
                        Some(cmd) => self.handle(cmd).await,
                    }
                }
            }
        }

        info!("Saved events actor shut down");
    }

    fn is_loaded(&self) -> bool {
        *self.loaded_tx.borrow()
    }

    async fn handle(&mut self, cmd: SavedEventsCommand) {
        match cmd {
            SavedEventsCommand::IsSaved(event_id, response_tx) => {
                let _ = response_tx.send(self.set.contains(&event_id));
            }
            SavedEventsCommand::Toggle(event_id, response_tx) => {
                // Unloaded answers are provisional until hydrate replays them
                let saved = self.set.toggle(&event_id);
                debug!(event_id = %event_id, saved, "Toggled saved event");
                if self.is_loaded() {
                    self.persist().await;
                } else {
                    self.pending.push(event_id);
                }
                let _ = response_tx.send(saved);
            }
            SavedEventsCommand::Count(response_tx) => {
                let _ = response_tx.send(self.set.len());
            }
            SavedEventsCommand::Snapshot(response_tx) => {
                let _ = response_tx.send(self.set.ids().to_vec());
            }
            SavedEventsCommand::Shutdown => {}
        }
    }

    /// Load the persisted set once; unreadable values fall back to empty
    async fn hydrate(&mut self, result: SiteResult<Option<String>>) {
        let persisted = match result {
            Ok(Some(raw)) => match SavedEventSet::from_json(&raw) {
                Ok(set) => set,
                Err(e) => {
                    warn!("Ignoring unreadable saved events under '{}': {}", self.key, e);
                    SavedEventSet::new()
                }
            },
            Ok(None) => SavedEventSet::new(),
            Err(e) => {
                warn!(
                    "Failed to read saved events from {} storage: {}",
                    self.storage.name(),
                    e
                );
                SavedEventSet::new()
            }
        };

        let pending = std::mem::take(&mut self.pending);
        self.set = persisted;
        for event_id in &pending {
            self.set.toggle(event_id);
        }

        self.loaded_tx.send_replace(true);
        info!(
            "Loaded {} saved events ({} early toggles replayed)",
            self.set.len(),
            pending.len()
        );

        if !pending.is_empty() {
            self.persist().await;
        }
    }

    /// Write the set through to storage; failures are logged, never surfaced
    async fn persist(&self) {
        if !self.is_loaded() {
            return;
        }

        let json = match self.set.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize saved events: {}", e);
                return;
            }
        };

        match self.storage.set(&self.key, &json).await {
            Ok(()) => debug!("Persisted {} saved events", self.set.len()),
            Err(e) => warn!(
                "Failed to persist saved events to {} storage: {}",
                self.storage.name(),
                e
            ),
        }
    }
}
