//! Config loading entry point.

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::{paths, CodermanConfig};
use crate::error::ApiError;
use config::{Config, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`CodermanConfig`] from defaults, files and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (highest last): defaults, global file, workspace
    /// `coderman.toml`, `CODERMAN_*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<CodermanConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);
        Self::finish(builder.build()?)
    }

    /// Load configuration from one explicit file (plus defaults and environment).
    pub fn load_from_file(path: &Path) -> Result<CodermanConfig, ApiError> {
        if !path.is_file() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = environment::add_to_builder(builder);
        Self::finish(builder.build()?)
    }

    /// Location of the global config file.
    pub fn xdg_config_path() -> Option<PathBuf> {
        paths::global_config_path()
    }

    fn finish(config: Config) -> Result<CodermanConfig, ApiError> {
        let config: CodermanConfig = config.try_deserialize()?;
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        debug!(
            extensions = ?config.tracking.extensions,
            endpoint = %config.deploy.endpoint,
            "Configuration loaded"
        );
        Ok(config)
    }
}
