//! Core value types shared across the tracker.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw BLAKE3 digest.
pub type Hash = [u8; 32];

/// Hex-encoded digest as it appears in the tracker file.
pub type HexHash = String;

/// Root-relative path key, `/`-separated, no leading slash.
pub type RelPath = String;

/// Whether the working tree matches the last deployed snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SyncStatus {
    #[serde(rename = "Synced")]
    Synced,
    #[serde(rename = "Not-Synced")]
    #[default]
    NotSynced,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Synced => "Synced",
            SyncStatus::NotSynced => "Not-Synced",
        }
    }

    pub fn is_synced(&self) -> bool {
        matches!(self, SyncStatus::Synced)
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
