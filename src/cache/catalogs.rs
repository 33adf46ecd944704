//! The set of catalog caches used by the client

use std::sync::Arc;

use super::{CatalogCache, LoadOutcome, SnapshotStore};
use crate::catalog::{CatalogKind, CatalogSource, Event, Product, StoreApp, ThunderOsImage};

/// One cache per catalog, built once and shared with every consumer
pub struct Catalogs {
    pub apps: CatalogCache<StoreApp>,
    pub windows: CatalogCache<Product>,
    pub linux: CatalogCache<Product>,
    pub android: CatalogCache<Product>,
    pub thunder_os: CatalogCache<ThunderOsImage>,
    pub events: CatalogCache<Event>,
}

impl Catalogs {
    /// Creates in-memory caches for every catalog backed by `source`
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self::with_snapshots(source, None)
    }

    /// Creates caches that fall back to `snapshots` when a fetch fails
    pub fn with_snapshots(source: Arc<dyn CatalogSource>, snapshots: Option<SnapshotStore>) -> Self {
        fn cache<T: crate::catalog::CatalogRecord>(
            kind: CatalogKind,
            source: &Arc<dyn CatalogSource>,
            snapshots: &Option<SnapshotStore>,
        ) -> CatalogCache<T> {
            let cache = CatalogCache::new(kind, Arc::clone(source));
            match snapshots {
                Some(store) => cache.with_snapshots(store.clone()),
                None => cache,
            }
        }

        Self {
            apps: cache(CatalogKind::Apps, &source, &snapshots),
            windows: cache(CatalogKind::Windows, &source, &snapshots),
            linux: cache(CatalogKind::Linux, &source, &snapshots),
            android: cache(CatalogKind::Android, &source, &snapshots),
            thunder_os: cache(CatalogKind::ThunderOs, &source, &snapshots),
            events: cache(CatalogKind::Events, &source, &snapshots),
        }
    }

    /// The product cache for a Windows, Linux or Android catalog
    pub fn products(&self, kind: CatalogKind) -> Option<&CatalogCache<Product>> {
        match kind {
            CatalogKind::Windows => Some(&self.windows),
            CatalogKind::Linux => Some(&self.linux),
            CatalogKind::Android => Some(&self.android),
            _ => None,
        }
    }

    /// Outcome of the most recent load of any catalog
    pub async fn last_outcome(&self, kind: CatalogKind) -> LoadOutcome {
        match kind {
            CatalogKind::Apps => self.apps.last_outcome().await,
            CatalogKind::Windows => self.windows.last_outcome().await,
            CatalogKind::Linux => self.linux.last_outcome().await,
            CatalogKind::Android => self.android.last_outcome().await,
            CatalogKind::ThunderOs => self.thunder_os.last_outcome().await,
            CatalogKind::Events => self.events.last_outcome().await,
        }
    }

    /// Loads every catalog concurrently, skipping those already cached
    ///
    /// Returns the outcome of each catalog in `CatalogKind::ALL` order.
    pub async fn prefetch_all(&self) -> Vec<(CatalogKind, LoadOutcome)> {
        futures::join!(
            self.apps.get(),
            self.windows.get(),
            self.linux.get(),
            self.android.get(),
            self.thunder_os.get(),
            self.events.get(),
        );

        let mut outcomes = Vec::with_capacity(CatalogKind::ALL.len());
        for kind in CatalogKind::ALL {
            outcomes.push((kind, self.last_outcome(kind).await));
        }
        outcomes
    }
}
