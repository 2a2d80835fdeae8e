use crate::storage::ObjectStore;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_KEY: &str = "highscores.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: i64,
}

/// Append-only score list mirrored to object storage.
///
/// Submissions only touch memory. The full list is handed to a background
/// persister that writes the newest version it has seen, one write at a time,
/// so an older list never lands after a newer one.
#[derive(Debug, Clone)]
pub struct HighScores {
    entries: Arc<Mutex<Vec<HighScoreEntry>>>,
    latest: Arc<watch::Sender<Option<Vec<HighScoreEntry>>>>,
    store: ObjectStore,
    key: String,
}

impl HighScores {
    /// Loads the stored list before anything can be persisted over it.
    ///
    /// A missing object starts an empty list. Any other read or decode
    /// failure is returned, so an unreadable list is never replaced by a
    /// shorter one.
    pub async fn open(store: ObjectStore, key: String) -> anyhow::Result<Self> {
        let stored = read_list(&store, &key).await?.unwrap_or_default();
        let (latest, _) = watch::channel(None);
        Ok(Self {
            entries: Arc::new(Mutex::new(stored)),
            latest: Arc::new(latest),
            store,
            key,
        })
    }

    pub async fn count(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Returns the list length after the append.
    pub async fn submit(&self, entry: HighScoreEntry) -> usize {
        let mut entries = self.entries.lock().await;
        entries.push(entry);
        self.latest.send_replace(Some(entries.clone()));
        entries.len()
    }

    #[cfg(test)]
    pub async fn entries(&self) -> Vec<HighScoreEntry> {
        self.entries.lock().await.clone()
    }

    /// Reads the persisted list, not the in-memory one. Nothing stored yet
    /// is an error here, like any other failed read.
    pub async fn fetch(&self) -> anyhow::Result<Vec<HighScoreEntry>> {
        read_list(&self.store, &self.key)
            .await?
            .with_context(|| format!("object {} does not exist", self.key))
    }

    pub fn spawn_persister(&self, shutdown: CancellationToken) -> JoinHandle<()> {
        let mut latest = self.latest.subscribe();
        let store = self.store.clone();
        let key = self.key.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    changed = latest.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
                let pending = latest.borrow_and_update().clone();
                if let Some(entries) = pending {
                    save(&store, &key, &entries).await;
                }
            }

            if latest.has_changed().unwrap_or(false) {
                let pending = latest.borrow_and_update().clone();
                if let Some(entries) = pending {
                    save(&store, &key, &entries).await;
                }
            }
        })
    }
}

async fn read_list(store: &ObjectStore, key: &str) -> anyhow::Result<Option<Vec<HighScoreEntry>>> {
    let Some(body) = store.get(key).await? else {
        return Ok(None);
    };
    let entries = serde_json::from_slice(&body)
        .with_context(|| format!("stored object {key} is not a score list"))?;
    Ok(Some(entries))
}

async fn save(store: &ObjectStore, key: &str, entries: &[HighScoreEntry]) {
    let body = match serde_json::to_vec(entries) {
        Ok(body) => body,
        Err(error) => {
            tracing::warn!(?error, "failed to encode high scores");
            return;
        }
    };
    match store.put(key, body).await {
        Ok(()) => tracing::debug!(count = entries.len(), key, "saved high scores"),
        Err(error) => tracing::warn!(?error, key, "error saving high scores"),
    }
}
