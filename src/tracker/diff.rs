//! Snapshot comparison

use crate::snapshot::Snapshot;
use crate::types::{RelPath, SyncStatus};
use std::collections::BTreeSet;

/// Difference between the deployed and the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diff {
    pub status: SyncStatus,
    pub added: BTreeSet<RelPath>,
    pub deleted: BTreeSet<RelPath>,
    pub changed: BTreeSet<RelPath>,
}

impl Diff {
    /// True when no path was added, deleted or changed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.changed.is_empty()
    }
}

/// Compare two snapshots.
///
/// `added` and `deleted` are set differences on paths, `changed` holds paths
/// present in both with different hashes. The status is decided by the master
/// hashes alone.
pub fn diff(deployed: &Snapshot, current: &Snapshot) -> Diff {
    let added = current
        .files()
        .keys()
        .filter(|path| !deployed.contains(path))
        .cloned()
        .collect();

    let deleted = deployed
        .files()
        .keys()
        .filter(|path| !current.contains(path))
        .cloned()
        .collect();

    let changed = deployed
        .files()
        .iter()
        .filter(|(path, hash)| current.get(path).is_some_and(|h| h != *hash))
        .map(|(path, _)| path.clone())
        .collect();

    let status = if current.same_content(deployed) {
        SyncStatus::Synced
    } else {
        SyncStatus::NotSynced
    };

    Diff {
        status,
        added,
        deleted,
        changed,
    }
}
