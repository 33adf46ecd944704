//! Background catalog loading
//!
//! Each catalog load runs as its own tokio task so the interface keeps drawing
//! while the network is slow. Results come back to the main loop over a channel
//! and are applied there. Loads are never cancelled; a result for a screen the
//! user already left still lands in the shared cache.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::cache::{CatalogCache, Catalogs, LoadOutcome};
use crate::catalog::{CatalogKind, CatalogRecord, Event, Product, StoreApp, ThunderOsImage};

/// A request to load one catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub kind: CatalogKind,
    /// Fetch again even if the catalog is cached
    pub refresh: bool,
}

impl LoadRequest {
    /// Loads from the cache, fetching only on a miss
    pub fn get(kind: CatalogKind) -> Self {
        Self {
            kind,
            refresh: false,
        }
    }

    /// Always fetches
    pub fn refresh(kind: CatalogKind) -> Self {
        Self {
            kind,
            refresh: true,
        }
    }
}

/// Messages sent from load tasks to the main loop
#[derive(Debug, Clone)]
pub enum LoadMessage {
    /// App store catalog loaded
    Apps(Arc<Vec<StoreApp>>, LoadOutcome),
    /// A Windows, Linux or Android catalog loaded
    Products(CatalogKind, Arc<Vec<Product>>, LoadOutcome),
    /// Thunder OS catalog loaded
    ThunderOs(Arc<Vec<ThunderOsImage>>, LoadOutcome),
    /// Event calendar loaded
    Events(Arc<Vec<Event>>, LoadOutcome),
}

impl LoadMessage {
    /// The catalog this message is for
    pub fn kind(&self) -> CatalogKind {
        match self {
            LoadMessage::Apps(..) => CatalogKind::Apps,
            LoadMessage::Products(kind, ..) => *kind,
            LoadMessage::ThunderOs(..) => CatalogKind::ThunderOs,
            LoadMessage::Events(..) => CatalogKind::Events,
        }
    }

    /// Outcome of the load
    pub fn outcome(&self) -> &LoadOutcome {
        match self {
            LoadMessage::Apps(_, outcome)
            | LoadMessage::Products(_, _, outcome)
            | LoadMessage::ThunderOs(_, outcome)
            | LoadMessage::Events(_, outcome) => outcome,
        }
    }
}

/// Loads one catalog through the shared caches
pub async fn load(catalogs: &Catalogs, request: LoadRequest) -> LoadMessage {
    let LoadRequest { kind, refresh } = request;

    match kind {
        CatalogKind::Apps => {
            let (items, outcome) = load_from(&catalogs.apps, refresh).await;
            LoadMessage::Apps(items, outcome)
        }
        CatalogKind::ThunderOs => {
            let (items, outcome) = load_from(&catalogs.thunder_os, refresh).await;
            LoadMessage::ThunderOs(items, outcome)
        }
        CatalogKind::Events => {
            let (items, outcome) = load_from(&catalogs.events, refresh).await;
            LoadMessage::Events(items, outcome)
        }
        CatalogKind::Windows | CatalogKind::Linux | CatalogKind::Android => {
            let cache = match kind {
                CatalogKind::Windows => &catalogs.windows,
                CatalogKind::Linux => &catalogs.linux,
                _ => &catalogs.android,
            };
            let (items, outcome) = load_from(cache, refresh).await;
            LoadMessage::Products(kind, items, outcome)
        }
    }
}

async fn load_from<T: CatalogRecord>(
    cache: &CatalogCache<T>,
    refresh: bool,
) -> (Arc<Vec<T>>, LoadOutcome) {
    if refresh {
        cache.refresh_with_outcome().await
    } else {
        cache.get_with_outcome().await
    }
}

/// Handle for spawning load tasks and collecting their results
pub struct Loader {
    catalogs: Arc<Catalogs>,
    sender: mpsc::UnboundedSender<LoadMessage>,
    receiver: mpsc::UnboundedReceiver<LoadMessage>,
}

impl Loader {
    /// Creates a loader over the shared caches
    pub fn new(catalogs: Arc<Catalogs>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            catalogs,
            sender,
            receiver,
        }
    }

    /// The caches this loader reads through
    pub fn catalogs(&self) -> &Arc<Catalogs> {
        &self.catalogs
    }

    /// Spawns a task that loads one catalog
    ///
    /// Must be called from within a tokio runtime.
    pub fn request(&self, request: LoadRequest) {
        let catalogs = Arc::clone(&self.catalogs);
        let tx = self.sender.clone();

        log::debug!("Spawning load of {} (refresh: {})", request.kind, request.refresh);
        tokio::spawn(async move {
            let message = load(&catalogs, request).await;
            // The receiver is gone only when the app is shutting down
            let _ = tx.send(message);
        });
    }

    /// Spawns a task that warms every catalog, then reports each one
    pub fn prefetch_all(&self) {
        let catalogs = Arc::clone(&self.catalogs);
        let tx = self.sender.clone();

        tokio::spawn(async move {
            catalogs.prefetch_all().await;
            for kind in CatalogKind::ALL {
                // Every catalog is cached now, so this does not fetch again
                let message = load(&catalogs, LoadRequest::get(kind)).await;
                if tx.send(message).is_err() {
                    break;
                }
            }
        });
    }

    /// Returns a finished load without blocking
    pub fn try_recv(&mut self) -> Option<LoadMessage> {
        self.receiver.try_recv().ok()
    }

    /// Waits for the next finished load
    pub async fn recv(&mut self) -> Option<LoadMessage> {
        self.receiver.recv().await
    }
}
