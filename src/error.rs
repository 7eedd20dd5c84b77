//! Error types for the coderman change tracker.

use std::path::PathBuf;
use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt state in {path:?}: {reason}")]
    CorruptState { path: PathBuf, reason: String },

    #[error("Content of {path} changed since it was hashed (expected {expected}, got {actual})")]
    HashMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Top-level errors surfaced to the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("There is no coderman project in {0}. Run `coderman init` first.")]
    ProjectNotInitialized(PathBuf),

    #[error("No change tracker found at {0}. Run `coderman status --recheck` to start tracking.")]
    TrackerNotInitialized(PathBuf),

    #[error("{path:?} has been tampered with ({reason}). Delete it and re-initialize.")]
    CorruptState { path: PathBuf, reason: String },

    #[error("A coderman project already exists at {0}. Use --force to overwrite it.")]
    AlreadyInitialized(PathBuf),

    #[error("Project name confirmation failed: '{0}' does not match this project")]
    ConfirmationMismatch(String),

    #[error("API key rejected: {0}")]
    Unauthorized(String),

    #[error("Deploy failed: {0}")]
    DeployFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(StorageError),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::CorruptState { path, reason } => ApiError::CorruptState { path, reason },
            other => ApiError::StorageError(other),
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
