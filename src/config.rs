//! Configuration System
//!
//! Tool settings for coderman: which files are tracked, where the deploy
//! service lives and how logging behaves. Settings are layered from built-in
//! defaults, a global file, a per-workspace `coderman.toml` and `CODERMAN_*`
//! environment variables. The project file `.coderman` is separate; see
//! [`crate::project`].

use crate::logging::LoggingConfig;
use crate::snapshot::walker::WalkerConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use sources::workspace_file::{workspace_config_path, WORKSPACE_CONFIG_FILE};

/// Re-export of XDG path helpers
pub mod xdg {
    pub use super::paths::*;
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CodermanConfig {
    /// What the change tracker scans
    #[serde(default)]
    pub tracking: TrackingConfig,

    /// Deploy service connection
    #[serde(default)]
    pub deploy: DeployConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tracked file selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// File extensions to track, without the dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory or file names skipped during the scan
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_extensions() -> Vec<String> {
    vec!["html".to_string(), "css".to_string()]
}

fn default_ignore_patterns() -> Vec<String> {
    vec![
        ".git".to_string(),
        "node_modules".to_string(),
        "target".to_string(),
    ]
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore_patterns: default_ignore_patterns(),
            follow_symlinks: false,
        }
    }
}

impl TrackingConfig {
    /// Walker configuration for the snapshot builder.
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            follow_symlinks: self.follow_symlinks,
            extensions: self
                .extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            ignore_patterns: self.ignore_patterns.clone(),
            max_depth: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.extensions.is_empty() {
            return Err("At least one tracked extension is required".to_string());
        }
        if let Some(bad) = self
            .extensions
            .iter()
            .find(|e| e.trim().trim_start_matches('.').is_empty() || e.contains('/'))
        {
            return Err(format!("Invalid tracked extension '{}'", bad));
        }
        Ok(())
    }
}

/// Deploy service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Base URL of the deploy service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://localhost:8080".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl DeployConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(format!(
                "Deploy endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            ));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err("Deploy timeouts must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Tracking(String),
    Deploy(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Tracking(msg) => write!(f, "Tracking: {}", msg),
            ValidationError::Deploy(msg) => write!(f, "Deploy: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl CodermanConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.tracking.validate() {
            errors.push(ValidationError::Tracking(e));
        }
        if let Err(e) = self.deploy.validate() {
            errors.push(ValidationError::Deploy(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
