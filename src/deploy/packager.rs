//! Bundle packaging: gzip-compressed JSON with base64 file contents.

use crate::deploy::DeployPlan;
use crate::error::StorageError;
use crate::snapshot::hasher;
use crate::types::{HexHash, RelPath};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the bundle written next to the tracked files.
pub const BUNDLE_FILE_NAME: &str = "coderman_bundle.json.gz";

/// Turns a deploy plan into a file the deploy service can accept.
pub trait Packager {
    fn package(&self, root: &Path, plan: &DeployPlan) -> Result<PathBuf, StorageError>;
}

/// One shipped file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleEntry {
    pub path: RelPath,
    /// Base64 of the raw file bytes
    pub content: String,
}

/// Decoded bundle contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    /// Master hash of the snapshot being deployed
    pub master_hash: HexHash,
    pub files: Vec<BundleEntry>,
    /// Paths the service should remove
    #[serde(default)]
    pub deleted: Vec<RelPath>,
}

impl BundleEntry {
    pub fn decode(&self) -> Result<Vec<u8>, StorageError> {
        STANDARD.decode(&self.content).map_err(|e| {
            StorageError::Serialization(format!("Invalid base64 for {}: {}", self.path, e))
        })
    }
}

/// Default packager.
#[derive(Debug, Clone, Default)]
pub struct BundlePackager {
    output_dir: Option<PathBuf>,
}

impl BundlePackager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write bundles into `dir` instead of the workspace root.
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    fn bundle_path(&self, root: &Path) -> PathBuf {
        self.output_dir
            .as_deref()
            .unwrap_or(root)
            .join(BUNDLE_FILE_NAME)
    }
}

impl Packager for BundlePackager {
    fn package(&self, root: &Path, plan: &DeployPlan) -> Result<PathBuf, StorageError> {
        let mut files = Vec::with_capacity(plan.upload.len());
        for (rel, expected) in &plan.upload {
            let full = plan.source_path(root, rel);
            let bytes = fs::read(&full).map_err(|source| StorageError::ReadFailed {
                path: full.clone(),
                source,
            })?;
            // The file must still match the snapshot that will be marked deployed.
            let actual = hex::encode(hasher::compute_content_hash(&bytes));
            if &actual != expected {
                return Err(StorageError::HashMismatch {
                    path: rel.clone(),
                    expected: expected.clone(),
                    actual,
                });
            }
            files.push(BundleEntry {
                path: rel.clone(),
                content: STANDARD.encode(&bytes),
            });
        }

        let bundle = Bundle {
            master_hash: plan.master_hash.clone(),
            files,
            deleted: plan.delete.clone(),
        };
        let json = serde_json::to_vec(&bundle)
            .map_err(|e| StorageError::Serialization(format!("Failed to encode bundle: {}", e)))?;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&json)?;
        let compressed = encoder.finish()?;

        let path = self.bundle_path(root);
        fs::write(&path, &compressed)?;
        debug!(
            path = %path.display(),
            files = bundle.files.len(),
            deleted = bundle.deleted.len(),
            bytes = compressed.len(),
            "Bundle written"
        );
        Ok(path)
    }
}

/// Read a bundle written by [`BundlePackager`].
pub fn read_bundle(path: &Path) -> Result<Bundle, StorageError> {
    let compressed = fs::read(path).map_err(|source| StorageError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let mut json = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut json)
        .map_err(|e| StorageError::CorruptState {
            path: path.to_path_buf(),
            reason: format!("not a gzip stream: {}", e),
        })?;
    serde_json::from_slice(&json).map_err(|e| StorageError::CorruptState {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
