//! Persistence helpers for JSON state files

use crate::error::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Read and parse a JSON state file.
///
/// Returns `None` if the file doesn't exist. Returns `CorruptState` if it
/// exists but is not well-formed JSON of the expected shape; callers must not
/// discard such a file silently.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StorageError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let value = serde_json::from_slice(&bytes).map_err(|e| StorageError::CorruptState {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(Some(value))
}

/// Serialize `value` as pretty JSON with sorted keys and write it atomically.
///
/// Uses temporary file + rename so a crash or a concurrent reader never sees a
/// torn file.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    // Round-trip through Value so object keys come out sorted.
    let value = serde_json::to_value(value)
        .map_err(|e| StorageError::Serialization(format!("Failed to serialize state: {}", e)))?;
    let mut serialized = serde_json::to_string_pretty(&value)
        .map_err(|e| StorageError::Serialization(format!("Failed to serialize state: {}", e)))?;
    serialized.push('\n');

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::IoError(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create parent directory {:?}: {}", parent, e),
                ))
            })?;
        }
    }

    let mut temp_name = path.file_name().map(|n| n.to_os_string()).ok_or_else(|| {
        StorageError::InvalidPath(format!("{} has no file name", path.display()))
    })?;
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, serialized.as_bytes()).map_err(|e| {
        StorageError::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to write state to {:?}: {}", temp_path, e),
        ))
    })?;

    // Atomically rename temp file to final location
    fs::rename(&temp_path, path).map_err(|e| {
        // Clean up temp file on error
        let _ = fs::remove_file(&temp_path);
        StorageError::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to rename temp file to {:?}: {}", path, e),
        ))
    })?;

    debug!(path = %path.display(), bytes = serialized.len(), "State file written");
    Ok(())
}
