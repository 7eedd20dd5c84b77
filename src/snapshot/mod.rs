//! File-set snapshots
//!
//! A snapshot maps every tracked file (by root-relative path) to the hex BLAKE3
//! hash of its content, plus a master hash over all per-file hashes in sorted
//! path order. Two snapshots describe the same content iff their master hashes
//! match.

pub mod builder;
pub mod hasher;
pub mod path;
pub mod walker;

use crate::types::{HexHash, RelPath};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Path→hash mapping plus its aggregate hash.
///
/// Serialized flat, the way the tracker file has always stored it:
/// `{ "master_hash": "...", "index.html": "...", "css/site.css": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub master_hash: HexHash,
    #[serde(flatten)]
    files: BTreeMap<RelPath, HexHash>,
}

impl Snapshot {
    /// Snapshot of an empty file set.
    pub fn empty() -> Self {
        Self::from_files(BTreeMap::new())
    }

    /// Build a snapshot from per-file hashes, computing the master hash.
    pub fn from_files(files: BTreeMap<RelPath, HexHash>) -> Self {
        let master_hash = hasher::compute_master_hash(files.values());
        Self { master_hash, files }
    }

    pub fn files(&self) -> &BTreeMap<RelPath, HexHash> {
        &self.files
    }

    pub fn get(&self, path: &str) -> Option<&HexHash> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn paths(&self) -> BTreeSet<RelPath> {
        self.files.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Equality by master hash.
    pub fn same_content(&self, other: &Snapshot) -> bool {
        self.master_hash == other.master_hash
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    master_hash: Option<HexHash>,
    #[serde(flatten)]
    files: BTreeMap<String, HexHash>,
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawSnapshot::deserialize(deserializer)?;
        let mut files: BTreeMap<RelPath, HexHash> = BTreeMap::new();
        for (stored, hash) in raw.files {
            let key = path::normalize_path_string(&stored);
            if files.insert(key.clone(), hash).is_some() {
                return Err(D::Error::custom(format!(
                    "path key {:?} appears more than once after normalization",
                    key
                )));
            }
        }
        // Keys written by older trackers may need normalizing, so the stored
        // master hash is kept as-is rather than recomputed.
        let master_hash = raw
            .master_hash
            .unwrap_or_else(|| hasher::compute_master_hash(files.values()));
        Ok(Snapshot { master_hash, files })
    }
}
