//! XDG-style locations for global coderman files.

use crate::error::ApiError;
use directories::BaseDirs;
use std::path::PathBuf;

const APP_DIR: &str = "coderman";

/// `$XDG_CONFIG_HOME`, or the platform equivalent.
pub fn config_home() -> Result<PathBuf, ApiError> {
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ApiError::ConfigError("Could not determine home directory".to_string()))
}

/// `$XDG_DATA_HOME`, or the platform equivalent.
pub fn data_home() -> Result<PathBuf, ApiError> {
    BaseDirs::new()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ApiError::ConfigError("Could not determine home directory".to_string()))
}

/// Path to the global config file, if a home directory is known.
pub fn global_config_path() -> Option<PathBuf> {
    config_home()
        .ok()
        .map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Default log file: `$XDG_DATA_HOME/coderman/coderman.log`.
pub fn default_log_file() -> Result<PathBuf, ApiError> {
    Ok(data_home()?.join(APP_DIR).join("coderman.log"))
}
