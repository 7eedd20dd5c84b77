//! CLI command-name contract for logging spans.

use crate::cli::parse::Commands;

/// Stable command name (e.g. "status", "deploy").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Init { .. } => "init",
        Commands::Status { .. } => "status",
        Commands::Deploy => "deploy",
        Commands::Destroy { .. } => "destroy",
        Commands::Version => "version",
    }
}
