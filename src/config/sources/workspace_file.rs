//! Workspace config file source: <workspace>/coderman.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};

/// File name of the per-workspace settings file.
pub const WORKSPACE_CONFIG_FILE: &str = "coderman.toml";

pub fn workspace_config_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(WORKSPACE_CONFIG_FILE)
}

/// Add the workspace config file to builder. Overrides the global file.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = workspace_config_path(workspace_root);
    if path.is_file() {
        return Ok(builder.add_source(File::from(path).required(false)));
    }
    Ok(builder)
}
