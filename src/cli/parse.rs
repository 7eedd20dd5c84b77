//! CLI parse: clap types for coderman. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Coderman CLI - track and deploy changes to a static HTML/CSS site
#[derive(Parser, Debug)]
#[command(name = "coderman")]
#[command(about = "Track changes to HTML/CSS files and deploy them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create the project file and start tracking
    Init {
        /// Deploy service API key (prompted when omitted)
        #[arg(long)]
        api_key: Option<String>,
        /// Project name (prompted when omitted)
        #[arg(long)]
        project_name: Option<String>,
        /// Overwrite an existing project file
        #[arg(long)]
        force: bool,
    },
    /// Compare the working tree against the deployed snapshot
    Status {
        /// Rescan the workspace before reporting
        #[arg(long)]
        recheck: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Ship changed and added files to the deploy service
    Deploy,
    /// Remove the project file after confirming the project name
    Destroy {
        /// Project name confirmation (prompted when omitted)
        #[arg(long)]
        project_name: Option<String>,
    },
    /// Print the coderman version
    Version,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
