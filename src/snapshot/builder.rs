//! Snapshot builder: scan a root, hash every tracked file, aggregate.

use crate::error::StorageError;
use crate::snapshot::hasher;
use crate::snapshot::walker::{FileIndex, Walker, WalkerConfig};
use crate::snapshot::Snapshot;
use crate::types::RelPath;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, instrument, trace};

/// Build a snapshot from an explicit set of root-relative paths.
pub fn build_snapshot(root: &Path, paths: &BTreeSet<RelPath>) -> Result<Snapshot, StorageError> {
    let index: FileIndex = paths.iter().map(|rel| (rel.clone(), root.join(rel))).collect();
    build_from_index(&index)
}

/// Build a snapshot from a scan, reading each file at its on-disk path.
pub fn build_from_index(index: &FileIndex) -> Result<Snapshot, StorageError> {
    let mut files = BTreeMap::new();
    for (rel, full) in index {
        let hash = hasher::hash_file(full)?;
        trace!(path = %rel, hash = %hash, "Hashed file");
        files.insert(rel.clone(), hash);
    }
    Ok(Snapshot::from_files(files))
}

/// Snapshot builder for a workspace root
pub struct SnapshotBuilder {
    root: PathBuf,
    walker_config: Option<WalkerConfig>,
}

impl SnapshotBuilder {
    /// Create a new snapshot builder for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            walker_config: None,
        }
    }

    /// Set walker config (extensions, ignore patterns). When set, the walker
    /// uses this config instead of the default.
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = Some(config);
        self
    }

    /// Scan the root and build the current snapshot.
    #[instrument(skip(self), fields(workspace = %self.root.display()))]
    pub fn build(&self) -> Result<Snapshot, StorageError> {
        let start = Instant::now();

        let walker = match &self.walker_config {
            Some(config) => Walker::with_config(self.root.clone(), config.clone()),
            None => Walker::new(self.root.clone()),
        };
        let index = match walker.scan() {
            Ok(index) => {
                debug!(file_count = index.len(), "Scanned workspace");
                index
            }
            Err(e) => {
                error!("Workspace scan failed: {}", e);
                return Err(e);
            }
        };

        let snapshot = build_from_index(&index)?;
        info!(
            file_count = snapshot.len(),
            master_hash = %snapshot.master_hash,
            duration_ms = start.elapsed().as_millis() as u64,
            "Snapshot built"
        );
        Ok(snapshot)
    }
}
