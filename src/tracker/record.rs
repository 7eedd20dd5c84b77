//! Persisted tracker record

use crate::snapshot::Snapshot;
use crate::tracker::diff::{self, Diff};
use crate::types::{RelPath, SyncStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tracker state as stored in `.coderman.tracker`.
///
/// Every field except `current` has a defined fallback so records written
/// before the first deploy (no `deployed` key) still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TrackerRecord {
    /// Last snapshot accepted as successfully deployed. Missing means never deployed.
    #[serde(default)]
    pub deployed: Snapshot,
    pub current: Snapshot,
    #[serde(default)]
    pub status: SyncStatus,
    #[serde(default)]
    pub files_added: BTreeSet<RelPath>,
    #[serde(default)]
    pub files_deleted: BTreeSet<RelPath>,
    #[serde(default)]
    pub files_changed: BTreeSet<RelPath>,
    #[serde(default)]
    pub file_addition_count: usize,
    #[serde(default)]
    pub file_deletion_count: usize,
    #[serde(default)]
    pub file_change_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_at: Option<DateTime<Utc>>,
}

impl TrackerRecord {
    /// Create a record and derive its diff fields.
    pub fn new(deployed: Snapshot, current: Snapshot) -> Self {
        let mut record = Self {
            deployed,
            current,
            status: SyncStatus::NotSynced,
            files_added: BTreeSet::new(),
            files_deleted: BTreeSet::new(),
            files_changed: BTreeSet::new(),
            file_addition_count: 0,
            file_deletion_count: 0,
            file_change_count: 0,
            deployed_at: None,
        };
        record.refresh_diff();
        record
    }

    /// Record for a project that has never been deployed.
    pub fn first_scan(current: Snapshot) -> Self {
        Self::new(Snapshot::empty(), current)
    }

    /// Replace the current snapshot and recompute the diff fields.
    pub fn update_current(&mut self, current: Snapshot) {
        self.current = current;
        self.refresh_diff();
    }

    /// Roll `current` into `deployed`.
    pub fn accept_current(&mut self, deployed_at: DateTime<Utc>) {
        self.deployed = self.current.clone();
        self.deployed_at = Some(deployed_at);
        self.refresh_diff();
    }

    fn refresh_diff(&mut self) {
        let Diff {
            status,
            added,
            deleted,
            changed,
        } = diff::diff(&self.deployed, &self.current);
        self.status = status;
        self.file_addition_count = added.len();
        self.file_deletion_count = deleted.len();
        self.file_change_count = changed.len();
        self.files_added = added;
        self.files_deleted = deleted;
        self.files_changed = changed;
    }

    /// The diff fields as a `Diff`.
    pub fn diff(&self) -> Diff {
        Diff {
            status: self.status,
            added: self.files_added.clone(),
            deleted: self.files_deleted.clone(),
            changed: self.files_changed.clone(),
        }
    }

    pub fn is_synced(&self) -> bool {
        self.status.is_synced()
    }

    /// Synced and no path was added, deleted or changed.
    ///
    /// A rename keeps the master hash but still has to be deployed.
    pub fn is_up_to_date(&self) -> bool {
        self.is_synced()
            && self.files_added.is_empty()
            && self.files_deleted.is_empty()
            && self.files_changed.is_empty()
    }

    /// Files the packager must ship: changed files first, then added ones.
    pub fn files_to_deploy(&self) -> Vec<RelPath> {
        self.files_changed
            .iter()
            .chain(self.files_added.iter())
            .cloned()
            .collect()
    }
}
