use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use common::snapshot::Snapshot;

use crate::errors::SnapshotError;

/// The single persisted snapshot file. Reads never fail from the
/// caller's perspective; writes replace the file wholesale.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current snapshot. A missing or corrupt file reads as an
    /// empty snapshot so the API always has something to serve.
    pub fn read(&self) -> Snapshot {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!("No snapshot file at {:?}: {}", self.path, err);
                return Snapshot::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("Snapshot file {:?} failed to parse: {}", self.path, err);
                Snapshot::default()
            }
        }
    }

    /// Overwrite the snapshot file with `snapshot`, pretty-printed.
    /// No merge, no backup of the previous version.
    pub fn write(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let serialized = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, serialized)?;

        Ok(())
    }

    /// Last-modified timestamp of the snapshot file, formatted
    /// `YYYY-MM-DD HH:MM:SS` in the server's timezone. None when the
    /// file doesn't exist yet.
    pub fn last_updated(&self) -> Option<String> {
        let modified = fs::metadata(&self.path).and_then(|meta| meta.modified()).ok()?;
        let local_time: DateTime<Local> = modified.into();

        Some(local_time.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}
