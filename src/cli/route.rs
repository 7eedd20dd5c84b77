//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::help::command_name;
use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_deploy_outcome, format_destroy_summary, format_init_summary, format_status_json,
    format_status_text,
};
use crate::config::{CodermanConfig, ConfigLoader};
use crate::deploy::{self, BundlePackager, HttpDeployService};
use crate::error::ApiError;
use crate::project::ProjectConfig;
use crate::snapshot::path::resolve_root;
use crate::tracker::ChangeTracker;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};

/// Runtime context for CLI execution: resolved workspace root and loaded settings.
pub struct RunContext {
    workspace_root: PathBuf,
    config: CodermanConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let workspace_root = resolve_root(&workspace_root)?;
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self::with_config(workspace_root, config))
    }

    /// Context with already loaded settings.
    pub fn with_config(workspace_root: PathBuf, config: CodermanConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config(&self) -> &CodermanConfig {
        &self.config
    }

    fn tracker(&self) -> ChangeTracker {
        ChangeTracker::new(self.workspace_root.clone())
            .with_walker_config(self.config.tracking.walker_config())
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let _span = info_span!("command", name = command_name(command)).entered();
        debug!(workspace = %self.workspace_root.display(), "Executing command");

        match command {
            Commands::Init {
                api_key,
                project_name,
                force,
            } => self.handle_init(api_key.as_deref(), project_name.as_deref(), *force),
            Commands::Status { recheck, format } => self.handle_status(*recheck, *format),
            Commands::Deploy => self.handle_deploy(),
            Commands::Destroy { project_name } => self.handle_destroy(project_name.as_deref()),
            Commands::Version => Ok(format!("coderman v{}", env!("CARGO_PKG_VERSION"))),
        }
    }

    fn handle_init(
        &self,
        api_key: Option<&str>,
        project_name: Option<&str>,
        force: bool,
    ) -> Result<String, ApiError> {
        use dialoguer::{Input, Password};

        let api_key = match api_key {
            Some(key) => key.to_string(),
            None => Password::new()
                .with_prompt("API key")
                .interact()
                .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?,
        };
        let project_name = match project_name {
            Some(name) => name.to_string(),
            None => {
                let default_name = self
                    .workspace_root
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                Input::new()
                    .with_prompt("Project name")
                    .default(default_name)
                    .interact_text()
                    .map_err(|e| {
                        ApiError::ConfigError(format!("Failed to get user input: {}", e))
                    })?
            }
        };

        let (project, path) =
            ProjectConfig::create(&self.workspace_root, &api_key, &project_name, force)?;
        let record = self.tracker().track_changes()?;
        Ok(format_init_summary(&project, &path, &record))
    }

    fn handle_status(&self, recheck: bool, format: OutputFormat) -> Result<String, ApiError> {
        let tracker = self.tracker();
        let record = if recheck {
            tracker.track_changes()?
        } else {
            tracker.load_required()?
        };
        match format {
            OutputFormat::Text => Ok(format_status_text(&record)),
            OutputFormat::Json => format_status_json(&record),
        }
    }

    fn handle_deploy(&self) -> Result<String, ApiError> {
        let project = ProjectConfig::load(&self.workspace_root)?;
        let service = HttpDeployService::new(&self.config.deploy)?;
        let outcome = deploy::deploy(&self.tracker(), &project, &BundlePackager::new(), &service)?;
        Ok(format_deploy_outcome(&project, &outcome))
    }

    fn handle_destroy(&self, project_name: Option<&str>) -> Result<String, ApiError> {
        // Fail on a missing or corrupt project file before prompting.
        ProjectConfig::load(&self.workspace_root)?;

        let confirmation = match project_name {
            Some(name) => name.to_string(),
            None => dialoguer::Input::<String>::new()
                .with_prompt("Enter project name to delete")
                .interact_text()
                .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?,
        };

        let project = match ProjectConfig::destroy(&self.workspace_root, &confirmation) {
            Ok(project) => project,
            Err(e @ ApiError::ConfirmationMismatch(_)) => {
                self.tracker().track_changes()?;
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        let record = self.tracker().track_changes()?;
        Ok(format_destroy_summary(&project, &record))
    }
}
