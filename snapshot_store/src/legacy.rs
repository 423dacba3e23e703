use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use common::record::ProductRecord;

use crate::errors::SnapshotError;

/// The flat product list written by the browser-driven product crawl
/// and served by the legacy `/items` endpoint.
#[derive(Debug, Clone)]
pub struct LegacyStore {
    path: PathBuf,
}

impl LegacyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_items(&self) -> Vec<ProductRecord> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!("No legacy data file at {:?}: {}", self.path, err);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(err) => {
                warn!("Legacy data file {:?} failed to parse: {}", self.path, err);
                Vec::new()
            }
        }
    }

    pub fn write_items(&self, items: &[ProductRecord]) -> Result<(), SnapshotError> {
        let serialized = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, serialized)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    #[test]
    fn items_round_trip() {
        let dir = tempdir().unwrap();
        let store = LegacyStore::new(dir.path().join("data.json"));

        let items = vec![
            ProductRecord::new("1", "Drill").with_price("$99.00"),
            ProductRecord::new("2", "Saw").with_price("$49.00"),
        ];
        store.write_items(&items).unwrap();

        assert_eq!(store.read_items(), items);
    }

    #[test]
    fn missing_file_reads_as_empty_list() {
        let dir = tempdir().unwrap();
        let store = LegacyStore::new(dir.path().join("absent.json"));

        assert!(store.read_items().is_empty());
    }
}
