//! Change tracker
//!
//! Fingerprints the tracked file set of a workspace and compares it against
//! the last deployed fingerprint. The result is persisted as a
//! [`TrackerRecord`] in `<root>/.coderman.tracker`.

pub mod diff;
pub mod record;
pub mod store;

pub use diff::{diff, Diff};
pub use record::TrackerRecord;
pub use store::{tracker_path, TRACKER_FILE_NAME};

use crate::error::{ApiError, StorageError};
use crate::snapshot::builder::SnapshotBuilder;
use crate::snapshot::walker::{FileIndex, Walker, WalkerConfig};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Change tracker bound to one workspace root.
///
/// Every operation is a blocking scan-hash-diff-persist sequence; the state
/// file is the only thing shared between invocations.
#[derive(Debug, Clone)]
pub struct ChangeTracker {
    root: PathBuf,
    state_path: PathBuf,
    walker_config: WalkerConfig,
}

impl ChangeTracker {
    /// Create a tracker for `root` with the default walker configuration.
    pub fn new(root: PathBuf) -> Self {
        let state_path = store::tracker_path(&root);
        Self {
            root,
            state_path,
            walker_config: WalkerConfig::default(),
        }
    }

    /// Use a custom walker configuration (tracked extensions, ignore patterns).
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    /// Index the tracked files by snapshot key without hashing them.
    pub fn locate_files(&self) -> Result<FileIndex, StorageError> {
        Walker::with_config(self.root.clone(), self.walker_config.clone()).scan()
    }

    /// Load the stored record, if any.
    pub fn load(&self) -> Result<Option<TrackerRecord>, StorageError> {
        store::load(&self.state_path)
    }

    /// Load the stored record; a missing tracker is a guided user error.
    pub fn load_required(&self) -> Result<TrackerRecord, ApiError> {
        self.load()?
            .ok_or_else(|| ApiError::TrackerNotInitialized(self.state_path.clone()))
    }

    /// Rescan the workspace, recompute `current` and the diff, persist.
    ///
    /// A missing tracker starts from an empty deployed snapshot. A corrupt one
    /// aborts without touching the file.
    pub fn track_changes(&self) -> Result<TrackerRecord, ApiError> {
        let existing = self.load()?;

        let current = SnapshotBuilder::new(self.root.clone())
            .with_walker_config(self.walker_config.clone())
            .build()?;

        let record = match existing {
            Some(mut record) => {
                record.update_current(current);
                record
            }
            None => {
                info!(state = %self.state_path.display(), "No tracker found, starting a new one");
                TrackerRecord::first_scan(current)
            }
        };

        store::persist(&record, &self.state_path)?;
        info!(
            status = %record.status,
            added = record.file_addition_count,
            deleted = record.file_deletion_count,
            changed = record.file_change_count,
            "Tracked changes"
        );
        Ok(record)
    }

    /// Accept the current snapshot as deployed.
    ///
    /// Only call this after the deploy service reported success.
    pub fn mark_deployed(&self, deployed_at: DateTime<Utc>) -> Result<TrackerRecord, ApiError> {
        let mut record = self.load_required()?;
        if record.is_up_to_date() {
            warn!("Marking an already synced tracker as deployed");
        }
        record.accept_current(deployed_at);
        store::persist(&record, &self.state_path)?;
        info!(master_hash = %record.deployed.master_hash, "Deployed snapshot updated");
        Ok(record)
    }
}
