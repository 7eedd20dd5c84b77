//! Hash computation for tracked files and snapshots using BLAKE3

use crate::error::StorageError;
use crate::types::{Hash, HexHash};
use blake3::Hasher;
use std::fs;
use std::path::Path;

/// Compute content hash for file bytes
pub fn compute_content_hash(content: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(content);
    *hasher.finalize().as_bytes()
}

/// Hash a file's bytes and return the lowercase hex digest.
///
/// Unreadable files are an error; a skipped file would make the master hash lie.
pub fn hash_file(path: &Path) -> Result<HexHash, StorageError> {
    let content = fs::read(path).map_err(|source| StorageError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(hex::encode(compute_content_hash(&content)))
}

/// Compute the master hash of a snapshot.
///
/// master_hash = hash(h_1 || h_2 || ... || h_n) over the hex per-file hashes.
/// Callers must yield hashes in sorted-path order; an empty input hashes the
/// empty string.
pub fn compute_master_hash<'a, I>(file_hashes: I) -> HexHash
where
    I: IntoIterator<Item = &'a HexHash>,
{
    let mut hasher = Hasher::new();
    for hash in file_hashes {
        hasher.update(hash.as_bytes());
    }
    hex::encode(hasher.finalize().as_bytes())
}
