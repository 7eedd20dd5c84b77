//! Project config (`.coderman`)
//!
//! The project file binds a workspace to a deploy target: the API key and the
//! project name. It is written once by `coderman init`, read by `deploy` and
//! removed by `destroy`.

use crate::error::{ApiError, StorageError};
use crate::store;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the project config inside the workspace root.
pub const PROJECT_FILE_NAME: &str = ".coderman";

/// Current project file format version.
pub const PROJECT_CONFIG_VERSION: f64 = 1.0;

/// Contents of `.coderman`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub version: f64,
    pub api_key: String,
    pub project_name: String,
}

impl fmt::Debug for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectConfig")
            .field("version", &self.version)
            .field("api_key", &self.masked_api_key())
            .field("project_name", &self.project_name)
            .finish()
    }
}

/// Location of the project config for a workspace root.
pub fn project_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(PROJECT_FILE_NAME)
}

impl ProjectConfig {
    /// Build a config after validating user input.
    pub fn new(api_key: &str, project_name: &str) -> Result<Self, ApiError> {
        let api_key = api_key.trim();
        let project_name = project_name.trim();
        if api_key.is_empty() {
            return Err(ApiError::InvalidInput("API key cannot be empty".to_string()));
        }
        if project_name.is_empty() {
            return Err(ApiError::InvalidInput(
                "Project name cannot be empty".to_string(),
            ));
        }
        if project_name.contains(['/', '\\']) || project_name.chars().any(char::is_whitespace) {
            return Err(ApiError::InvalidInput(format!(
                "Project name '{}' may not contain slashes or whitespace",
                project_name
            )));
        }
        Ok(Self {
            version: PROJECT_CONFIG_VERSION,
            api_key: api_key.to_string(),
            project_name: project_name.to_string(),
        })
    }

    /// Write a new project config into `workspace_root`.
    ///
    /// Refuses to replace an existing file unless `force` is set.
    pub fn create(
        workspace_root: &Path,
        api_key: &str,
        project_name: &str,
        force: bool,
    ) -> Result<(Self, PathBuf), ApiError> {
        let path = project_path(workspace_root);
        if path.exists() && !force {
            return Err(ApiError::AlreadyInitialized(path));
        }
        let config = Self::new(api_key, project_name)?;
        store::write_json_atomic(&path, &config)?;
        info!(project = %config.project_name, path = %path.display(), "Project config created");
        Ok((config, path))
    }

    /// Read the project config; `None` when the workspace is not initialized.
    pub fn read(workspace_root: &Path) -> Result<Option<Self>, StorageError> {
        store::read_json(&project_path(workspace_root))
    }

    /// Read the project config, mapping absence to `ProjectNotInitialized`.
    pub fn load(workspace_root: &Path) -> Result<Self, ApiError> {
        Self::read(workspace_root)?
            .ok_or_else(|| ApiError::ProjectNotInitialized(workspace_root.to_path_buf()))
    }

    /// Delete the project config after the user confirmed the project name.
    pub fn destroy(workspace_root: &Path, confirmation: &str) -> Result<Self, ApiError> {
        let config = Self::load(workspace_root)?;
        if config.project_name != confirmation.trim() {
            return Err(ApiError::ConfirmationMismatch(confirmation.to_string()));
        }
        let path = project_path(workspace_root);
        fs::remove_file(&path).map_err(StorageError::IoError)?;
        info!(project = %config.project_name, "Project config removed");
        Ok(config)
    }

    /// API key with everything but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }
}
