//! Mirrors the session's favorite gems to per-device storage.
//!
//! [`FavoritesPersistence::start`] restores the stored set into the session
//! and then runs a background writer that saves the set once it has been
//! stable for [`FAVORITES_WRITE_DEBOUNCE`]. An empty set removes the stored
//! entry. Storage failures are logged and never reach the caller.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use citygems_core::types::DbId;
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::session::{SessionState, SessionStore};
use crate::storage::{KeyValueStorage, StorageError};
use crate::timing::FAVORITES_WRITE_DEBOUNCE;

/// Storage key holding the JSON array of favorite gem ids.
pub const STORAGE_KEY: &str = "kiosk-favorites";

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Encode `ids` as a JSON array in ascending order.
pub fn serialize(ids: &BTreeSet<DbId>) -> String {
    let items: Vec<Value> = ids.iter().map(|&id| Value::from(id)).collect();
    Value::Array(items).to_string()
}

/// Decode a stored payload, keeping only integer entries.
///
/// Never fails: a payload that is not a JSON array yields an empty set.
pub fn deserialize(raw: &str) -> BTreeSet<DbId> {
    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            tracing::warn!("Stored favorites are not an array");
            return BTreeSet::new();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to deserialize stored favorites");
            return BTreeSet::new();
        }
    };

    let valid: Vec<DbId> = items.iter().filter_map(Value::as_i64).collect();
    if valid.len() != items.len() {
        tracing::warn!(
            total = items.len(),
            valid = valid.len(),
            "Some stored favorite ids were not integers",
        );
    }
    valid.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Storage helpers
// ---------------------------------------------------------------------------

/// Read the stored set. `None` when nothing is stored or storage fails.
pub fn load(storage: &dyn KeyValueStorage) -> Option<BTreeSet<DbId>> {
    match storage.get(STORAGE_KEY) {
        Ok(Some(raw)) if !raw.is_empty() => {
            let ids = deserialize(&raw);
            tracing::info!(count = ids.len(), "Loaded favorites from storage");
            Some(ids)
        }
        Ok(_) => {
            tracing::debug!("No favorites found in storage");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load favorites from storage");
            None
        }
    }
}

/// Write `ids` to storage, logging instead of failing.
pub fn save(storage: &dyn KeyValueStorage, ids: &BTreeSet<DbId>) {
    match storage.set(STORAGE_KEY, &serialize(ids)) {
        Ok(()) => tracing::debug!(count = ids.len(), "Saved favorites to storage"),
        Err(StorageError::QuotaExceeded) => {
            tracing::error!("Storage quota exceeded, cannot save favorites");
        }
        Err(e) => tracing::error!(error = %e, "Failed to save favorites to storage"),
    }
}

/// Remove the stored entry, logging instead of failing.
pub fn clear(storage: &dyn KeyValueStorage) {
    match storage.remove(STORAGE_KEY) {
        Ok(()) => tracing::debug!("Cleared favorites from storage"),
        Err(e) => tracing::error!(error = %e, "Failed to clear favorites from storage"),
    }
}

fn persist(storage: &dyn KeyValueStorage, ids: &BTreeSet<DbId>) {
    if ids.is_empty() {
        clear(storage);
    } else {
        save(storage, ids);
    }
}

// ---------------------------------------------------------------------------
// FavoritesPersistence
// ---------------------------------------------------------------------------

/// Handle to the background favorites writer.
#[derive(Debug)]
pub struct FavoritesPersistence {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl FavoritesPersistence {
    /// Restore stored favorites into `store`, then start the debounced writer.
    pub fn start(store: &SessionStore, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::start_with_delay(store, storage, FAVORITES_WRITE_DEBOUNCE)
    }

    pub fn start_with_delay(
        store: &SessionStore,
        storage: Arc<dyn KeyValueStorage>,
        delay: Duration,
    ) -> Self {
        if let Some(stored) = load(storage.as_ref()).filter(|ids| !ids.is_empty()) {
            tracing::info!(count = stored.len(), "Restoring favorites from storage");
            for id in stored {
                store.add_favorite(id);
            }
        }

        // Subscribing after the restore keeps it from triggering a write.
        let rx = store.subscribe();
        let persisted = store.state().favorite_gem_ids;
        let cancel = CancellationToken::new();
        let task = tokio::spawn(write_loop(rx, storage, persisted, delay, cancel.clone()));

        Self { cancel, task }
    }

    /// Stop the writer, flushing a change that is still waiting out the delay.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Favorites writer task failed");
        }
    }
}

async fn write_loop(
    mut rx: watch::Receiver<SessionState>,
    storage: Arc<dyn KeyValueStorage>,
    mut persisted: BTreeSet<DbId>,
    delay: Duration,
    cancel: CancellationToken,
) {
    let mut pending: Option<BTreeSet<DbId>> = None;
    let mut deadline = Instant::now();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = rx.borrow_and_update().favorite_gem_ids.clone();
                if current != *pending.as_ref().unwrap_or(&persisted) {
                    pending = Some(current);
                    deadline = Instant::now() + delay;
                }
            }
            _ = tokio::time::sleep_until(deadline), if pending.is_some() => {
                if let Some(ids) = pending.take() {
                    persist(storage.as_ref(), &ids);
                    persisted = ids;
                }
            }
        }
    }

    if let Some(ids) = pending {
        persist(storage.as_ref(), &ids);
    }
    tracing::debug!("Favorites writer stopped");
}
