//! Filesystem walker that enumerates tracked files

use crate::error::StorageError;
use crate::snapshot::path;
use crate::types::RelPath;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Snapshot key to the path the file actually has on disk.
///
/// The two differ when a name is not NFC or not valid UTF-8.
pub type FileIndex = BTreeMap<RelPath, PathBuf>;

/// Filesystem walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false for determinism)
    pub follow_symlinks: bool,
    /// File extensions to track, without the dot (matched case-insensitively)
    pub extensions: Vec<String>,
    /// Path components to skip entirely (e.g., ".git", "node_modules")
    pub ignore_patterns: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            extensions: vec!["html".to_string(), "css".to_string()],
            ignore_patterns: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
            ],
            max_depth: None,
        }
    }
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the tree and index tracked files by snapshot key.
    ///
    /// The index is sorted, independent of filesystem enumeration order.
    pub fn scan(&self) -> Result<FileIndex, StorageError> {
        let mut files = FileIndex::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .into_iter()
            .filter_entry(|entry| !self.should_ignore(entry));

        for entry in walker {
            let entry = entry.map_err(|e| {
                StorageError::IoError(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to walk directory: {}", e),
                ))
            })?;

            if !entry.file_type().is_file() || !self.is_tracked(entry.path()) {
                continue;
            }

            let key = path::relative_key(&self.root, entry.path())?;
            if let Some(previous) = files.get(&key) {
                return Err(StorageError::InvalidPath(format!(
                    "{} and {} both normalize to {}",
                    previous.display(),
                    entry.path().display(),
                    key
                )));
            }
            files.insert(key, entry.into_path());
        }

        Ok(files)
    }

    fn is_tracked(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.config
            .extensions
            .iter()
            .any(|tracked| tracked.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    /// Check if an entry should be ignored based on ignore patterns.
    /// Only components below the root are considered.
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| name == pattern.as_str())
    }
}

/// Enumerate tracked files under `root` with the default configuration.
pub fn scan_files(root: &Path) -> Result<BTreeSet<RelPath>, StorageError> {
    Ok(Walker::new(root.to_path_buf()).scan()?.into_keys().collect())
}
