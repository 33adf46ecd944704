//! Catalog caching
//!
//! Each catalog is fetched at most once per process unless a refresh is
//! requested. `CatalogCache` holds one catalog in memory, `Catalogs` bundles
//! one cache per catalog for injection into the UI, and `SnapshotStore`
//! persists the last good copy of each catalog to disk as an offline fallback.

mod catalog_cache;
mod catalogs;
mod snapshot;

pub use catalog_cache::{CatalogCache, LoadOutcome};
pub use catalogs::Catalogs;
pub use snapshot::{Snapshot, SnapshotStore};
