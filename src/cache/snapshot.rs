//! On-disk catalog snapshots
//!
//! Provides a `SnapshotStore` that keeps the last successfully fetched copy of
//! each catalog as a JSON file, so a catalog can still be shown when the asset
//! host is unreachable.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::CatalogKind;

/// Wrapper struct for a snapshot stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEntry<T> {
    /// The catalog records
    data: T,
    /// When the records were fetched
    cached_at: DateTime<Utc>,
}

/// A snapshot read back from disk
#[derive(Debug)]
pub struct Snapshot<T> {
    /// The catalog records
    pub data: T,
    /// When the records were originally fetched
    pub cached_at: DateTime<Utc>,
}

/// Reads and writes catalog snapshots
///
/// Snapshots live in an XDG-compliant cache directory (`~/.cache/winlay/` on
/// Linux), one file per catalog. They never expire; they are only consulted
/// when a live fetch fails.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    /// Directory where snapshot files are stored
    dir: PathBuf,
}

impl SnapshotStore {
    /// Creates a store in the XDG cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "winlay")?;
        Some(Self {
            dir: project_dirs.cache_dir().to_path_buf(),
        })
    }

    /// Creates a store in a custom directory
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Directory where snapshot files are stored
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn snapshot_path(&self, kind: CatalogKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.as_str()))
    }

    /// Writes a snapshot of a catalog, replacing any previous one
    ///
    /// The directory is created if missing.
    pub fn write<T: Serialize>(&self, kind: CatalogKind, data: &T) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let entry = SnapshotEntry {
            data,
            cached_at: Utc::now(),
        };

        let json = serde_json::to_string_pretty(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.snapshot_path(kind), json)
    }

    /// Reads the snapshot of a catalog
    ///
    /// Returns `None` if there is no snapshot or it cannot be parsed.
    pub fn read<T: DeserializeOwned>(&self, kind: CatalogKind) -> Option<Snapshot<T>> {
        let content = fs::read_to_string(self.snapshot_path(kind)).ok()?;
        let entry: SnapshotEntry<T> = serde_json::from_str(&content).ok()?;

        Some(Snapshot {
            data: entry.data,
            cached_at: entry.cached_at,
        })
    }
}
