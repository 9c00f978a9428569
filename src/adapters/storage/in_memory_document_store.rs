//! In-Memory Document Store Adapter
//!
//! Keeps documents in memory and streams changes to watchers through one
//! broadcast channel per document. Used by tests and the headless host.
//!
//! Failure switches ([`InMemoryDocumentStore::go_offline`],
//! [`InMemoryDocumentStore::fail_watchers`]) let tests drive the error
//! paths of the repository and controller.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, warn};

use crate::domain::foundation::Timestamp;
use crate::domain::profile::DocumentFields;
use crate::ports::{
    Document, DocumentKey, DocumentStore, StoreError, Subscription, SubscriptionSink,
};

type Change = Result<Option<Document>, StoreError>;

/// Tuning knobs for the in-memory store.
#[derive(Debug, Clone)]
pub struct InMemoryStoreOptions {
    /// Per-watcher queue of undelivered snapshots.
    pub watch_buffer: usize,

    /// Artificial delay before a write is applied.
    pub write_latency: Duration,
}

impl Default for InMemoryStoreOptions {
    fn default() -> Self {
        Self {
            watch_buffer: 32,
            write_latency: Duration::ZERO,
        }
    }
}

/// In-memory document store with live watches.
#[derive(Debug, Clone)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<DocumentKey, Document>>>,
    channels: Arc<RwLock<HashMap<DocumentKey, broadcast::Sender<Change>>>>,
    offline: Arc<RwLock<Option<StoreError>>>,
    options: InMemoryStoreOptions,
}

impl InMemoryDocumentStore {
    /// Create a new in-memory store with default options.
    pub fn new() -> Self {
        Self::with_options(InMemoryStoreOptions::default())
    }

    pub fn with_options(options: InMemoryStoreOptions) -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            channels: Arc::new(RwLock::new(HashMap::new())),
            offline: Arc::new(RwLock::new(None)),
            options,
        }
    }

    /// Makes every following call fail with `error` until [`Self::go_online`].
    pub async fn go_offline(&self, error: StoreError) {
        *self.offline.write().await = Some(error);
    }

    pub async fn go_online(&self) {
        *self.offline.write().await = None;
    }

    /// Pushes `error` to every live watcher of `key`, ending their subscriptions.
    pub async fn fail_watchers(&self, key: &DocumentKey, error: StoreError) {
        if let Some(sender) = self.channels.read().await.get(key) {
            let _ = sender.send(Err(error));
        }
    }

    /// Number of live watch registrations on `key`.
    pub async fn watcher_count(&self, key: &DocumentKey) -> usize {
        self.channels
            .read()
            .await
            .get(key)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Number of documents with at least one live watch.
    pub async fn watched_document_count(&self) -> usize {
        self.channels.read().await.len()
    }

    /// Number of stored documents (useful for tests)
    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }

    async fn check_online(&self) -> Result<(), StoreError> {
        match self.offline.read().await.as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn current(&self, key: &DocumentKey) -> Option<Document> {
        self.documents.read().await.get(key).cloned()
    }

    /// Drops the key's notification channel once nobody listens on it.
    ///
    /// Runs under the write lock, the same lock `watch` subscribes under.
    async fn release_channel(&self, key: &DocumentKey) {
        let mut channels = self.channels.write().await;
        if channels
            .get(key)
            .is_some_and(|sender| sender.receiver_count() == 0)
        {
            channels.remove(key);
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, key: &DocumentKey) -> Result<Option<Document>, StoreError> {
        self.check_online().await?;
        Ok(self.current(key).await)
    }

    async fn set(&self, key: &DocumentKey, fields: DocumentFields) -> Result<(), StoreError> {
        self.check_online().await?;
        if !self.options.write_latency.is_zero() {
            tokio::time::sleep(self.options.write_latency).await;
        }

        let document = {
            let mut documents = self.documents.write().await;
            if documents.get(key).is_some_and(|doc| doc.fields == fields) {
                debug!(%key, "write matches stored fields, skipping");
                return Ok(());
            }
            let document = Document {
                fields,
                update_time: Timestamp::now(),
            };
            documents.insert(key.clone(), document.clone());
            document
        };

        if let Some(sender) = self.channels.read().await.get(key) {
            // No receivers is fine: nobody is watching.
            let _ = sender.send(Ok(Some(document)));
        }
        debug!(%key, "document written");
        Ok(())
    }

    async fn watch(&self, key: &DocumentKey) -> Result<Subscription<Option<Document>>, StoreError> {
        self.check_online().await?;

        // Subscribe before reading so no write can slip between the two.
        let changes = {
            let mut channels = self.channels.write().await;
            channels
                .entry(key.clone())
                .or_insert_with(|| broadcast::channel(self.options.watch_buffer.max(1)).0)
                .subscribe()
        };
        let initial = self.current(key).await;

        let (sink, subscription) = Subscription::channel(self.options.watch_buffer);
        tokio::spawn(forward_changes(
            self.clone(),
            key.clone(),
            initial,
            changes,
            sink,
        ));
        debug!(%key, "watch registered");
        Ok(subscription)
    }
}

/// Bridges the store's broadcast notifications into one subscriber's queue.
///
/// Owns the broadcast receiver, so the registration lives exactly as long
/// as this task. The last watcher to leave removes the key's channel.
async fn forward_changes(
    store: InMemoryDocumentStore,
    key: DocumentKey,
    initial: Option<Document>,
    mut changes: broadcast::Receiver<Change>,
    mut sink: SubscriptionSink<Option<Document>>,
) {
    relay_changes(&store, &key, initial, &mut changes, &mut sink).await;
    drop(changes);
    store.release_channel(&key).await;
    debug!(%key, "watch released");
}

async fn relay_changes(
    store: &InMemoryDocumentStore,
    key: &DocumentKey,
    initial: Option<Document>,
    changes: &mut broadcast::Receiver<Change>,
    sink: &mut SubscriptionSink<Option<Document>>,
) {
    if !sink.send(Ok(initial)).await {
        return;
    }

    loop {
        tokio::select! {
            _ = sink.cancelled() => break,
            change = changes.recv() => match change {
                Ok(Ok(snapshot)) => {
                    if !sink.send(Ok(snapshot)).await {
                        break;
                    }
                }
                Ok(Err(error)) => {
                    warn!(%key, %error, "watch failed");
                    sink.send(Err(error)).await;
                    break;
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Intermediate states are lost; the latest one still counts.
                    debug!(%key, skipped, "watcher lagged, resending current state");
                    if !sink.send(Ok(store.current(key).await)).await {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => {
                    sink.send(Err(StoreError::SubscriptionClosed)).await;
                    break;
                }
            },
        }
    }
}
