//! Cache-once holder for a single catalog
//!
//! A `CatalogCache` fetches its catalog the first time it is asked for and
//! keeps the result for the rest of the process. Only `refresh` fetches again.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::SnapshotStore;
use crate::catalog::{decode_records, CatalogKind, CatalogRecord, CatalogSource, FetchError};

/// How the most recent load of a catalog went
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing has been loaded yet
    NotLoaded,
    /// The catalog loaded with this many records
    Loaded(usize),
    /// The catalog loaded and is genuinely empty
    Empty,
    /// The fetch failed; the cached list is empty
    Failed(String),
    /// The fetch failed and a snapshot from disk is being served instead
    Offline {
        cached_at: DateTime<Utc>,
        reason: String,
    },
}

impl LoadOutcome {
    /// Whether the last fetch failed, regardless of fallback
    pub fn is_failure(&self) -> bool {
        matches!(self, LoadOutcome::Failed(_) | LoadOutcome::Offline { .. })
    }
}

/// Mutable part of the cache, swapped as a whole under the lock
#[derive(Debug)]
struct CacheState<T> {
    items: Option<Arc<Vec<T>>>,
    outcome: LoadOutcome,
}

/// Process-lifetime cache for one catalog
///
/// `get` serves the stored list or fetches it once; `refresh` always fetches
/// and replaces the stored list. A failed fetch stores (and returns) an empty
/// list, unless a snapshot store is attached and holds an earlier copy.
///
/// Two concurrent misses both fetch and the last writer wins. The lock is never
/// held across the fetch, so readers are not blocked by the network.
pub struct CatalogCache<T> {
    kind: CatalogKind,
    source: Arc<dyn CatalogSource>,
    snapshots: Option<SnapshotStore>,
    state: RwLock<CacheState<T>>,
}

impl<T: CatalogRecord> CatalogCache<T> {
    /// Creates an empty cache for `kind` backed by `source`
    pub fn new(kind: CatalogKind, source: Arc<dyn CatalogSource>) -> Self {
        Self {
            kind,
            source,
            snapshots: None,
            state: RwLock::new(CacheState {
                items: None,
                outcome: LoadOutcome::NotLoaded,
            }),
        }
    }

    /// Attaches a snapshot store used as an offline fallback
    pub fn with_snapshots(mut self, store: SnapshotStore) -> Self {
        self.snapshots = Some(store);
        self
    }

    /// The catalog this cache holds
    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Returns the cached list, fetching it first on a miss
    pub async fn get(&self) -> Arc<Vec<T>> {
        self.get_with_outcome().await.0
    }

    /// Fetches the catalog again and replaces the cached list
    pub async fn refresh(&self) -> Arc<Vec<T>> {
        self.refresh_with_outcome().await.0
    }

    /// Like `get`, paired with the outcome of the load that produced the list
    pub async fn get_with_outcome(&self) -> (Arc<Vec<T>>, LoadOutcome) {
        {
            let state = self.state.read().await;
            if let Some(ref items) = state.items {
                return (Arc::clone(items), state.outcome.clone());
            }
        }
        self.load().await
    }

    /// Like `refresh`, paired with the outcome of this fetch
    pub async fn refresh_with_outcome(&self) -> (Arc<Vec<T>>, LoadOutcome) {
        self.load().await
    }

    /// Returns the cached list without fetching
    pub async fn peek(&self) -> Option<Arc<Vec<T>>> {
        self.state.read().await.items.clone()
    }

    /// Outcome of the most recent load
    pub async fn last_outcome(&self) -> LoadOutcome {
        self.state.read().await.outcome.clone()
    }

    async fn load(&self) -> (Arc<Vec<T>>, LoadOutcome) {
        let (items, outcome) = self.fetch().await;
        let items = Arc::new(items);

        let mut state = self.state.write().await;
        state.items = Some(Arc::clone(&items));
        state.outcome = outcome.clone();

        (items, outcome)
    }

    async fn fetch(&self) -> (Vec<T>, LoadOutcome) {
        match self.fetch_records().await {
            Ok(items) => {
                log::info!("Loaded {} {} records", items.len(), self.kind);
                if let Some(ref store) = self.snapshots {
                    if let Err(e) = store.write(self.kind, &items) {
                        log::warn!("Could not write {} snapshot: {}", self.kind, e);
                    }
                }
                let outcome = if items.is_empty() {
                    LoadOutcome::Empty
                } else {
                    LoadOutcome::Loaded(items.len())
                };
                (items, outcome)
            }
            Err(error) => {
                log::warn!("Failed to load {} catalog: {}", self.kind, error);
                let reason = error.to_string();

                if let Some(snapshot) = self
                    .snapshots
                    .as_ref()
                    .and_then(|store| store.read::<Vec<T>>(self.kind))
                {
                    log::info!(
                        "Serving {} snapshot from {}",
                        self.kind,
                        snapshot.cached_at
                    );
                    return (
                        snapshot.data,
                        LoadOutcome::Offline {
                            cached_at: snapshot.cached_at,
                            reason,
                        },
                    );
                }

                (Vec::new(), LoadOutcome::Failed(reason))
            }
        }
    }

    async fn fetch_records(&self) -> Result<Vec<T>, FetchError> {
        let body = self.source.fetch_body(self.kind).await?;
        decode_records(self.kind, &body)
    }
}
