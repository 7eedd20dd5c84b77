//! Path normalization for snapshot keys

use crate::error::StorageError;
use crate::types::RelPath;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Resolve the workspace root to an absolute, symlink-free path.
pub fn resolve_root(root: &Path) -> Result<PathBuf, StorageError> {
    dunce::canonicalize(root).map_err(|e| {
        StorageError::InvalidPath(format!(
            "Failed to resolve workspace root {}: {}",
            root.display(),
            e
        ))
    })
}

/// Turn a path under `root` into a snapshot key.
///
/// Keys are `/`-separated, NFC-normalized and carry no leading slash, so the
/// same tree produces the same keys on every platform.
pub fn relative_key(root: &Path, path: &Path) -> Result<RelPath, StorageError> {
    let rel = path.strip_prefix(root).map_err(|_| {
        StorageError::InvalidPath(format!(
            "{} is not under {}",
            path.display(),
            root.display()
        ))
    })?;

    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
            Component::CurDir => {}
            other => {
                return Err(StorageError::InvalidPath(format!(
                    "Unexpected component {:?} in {}",
                    other,
                    path.display()
                )))
            }
        }
    }

    if parts.is_empty() {
        return Err(StorageError::InvalidPath(format!(
            "{} does not name a file under {}",
            path.display(),
            root.display()
        )));
    }

    Ok(normalize_path_string(&parts.join("/")))
}

/// Normalize a stored path key (without filesystem access).
///
/// Accepts keys written by older trackers (`/index.html`, `css\site.css`).
pub fn normalize_path_string(path: &str) -> String {
    let normalized: String = path.nfc().collect();
    normalized
        .replace('\\', "/")
        .trim_start_matches("./")
        .trim_start_matches('/')
        .trim_end_matches('/')
        .to_string()
}
