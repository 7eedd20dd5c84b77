//! Tracker record persistence

use crate::error::StorageError;
use crate::store;
use crate::tracker::record::TrackerRecord;
use std::path::{Path, PathBuf};

/// File name of the tracker record inside the workspace root.
pub const TRACKER_FILE_NAME: &str = ".coderman.tracker";

/// Location of the tracker record for a workspace root.
pub fn tracker_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(TRACKER_FILE_NAME)
}

/// Write the record atomically.
pub fn persist(record: &TrackerRecord, path: &Path) -> Result<(), StorageError> {
    store::write_json_atomic(path, record)
}

/// Load the record.
///
/// `Ok(None)` means no tracker has been created yet. A file that does not
/// parse as a tracker record is `CorruptState`; no partial record is returned.
pub fn load(path: &Path) -> Result<Option<TrackerRecord>, StorageError> {
    store::read_json(path)
}
