//! Project lifecycle presentation: init, destroy, deploy.

use crate::deploy::DeployOutcome;
use crate::project::ProjectConfig;
use crate::tracker::TrackerRecord;
use std::path::Path;

pub fn format_init_summary(project: &ProjectConfig, path: &Path, record: &TrackerRecord) -> String {
    let mut output = String::from("Initializing coderman project...\n\n");
    output.push_str(&format!("  ✓ {}\n", path.display()));
    output.push_str(&format!("  Project: {}\n", project.project_name));
    output.push_str(&format!("  API key: {}\n", project.masked_api_key()));
    output.push_str(&format!(
        "  Tracking {} file(s), status {}\n",
        record.current.len(),
        record.status
    ));
    output.push_str("\nRun 'coderman deploy' to publish.");
    output
}

pub fn format_destroy_summary(project: &ProjectConfig, record: &TrackerRecord) -> String {
    format!(
        "Project name confirmation successful.\nRemoved project file for '{}'.\nTracker refreshed: {} ({} added, {} deleted, {} changed)",
        project.project_name,
        record.status,
        record.file_addition_count,
        record.file_deletion_count,
        record.file_change_count
    )
}

pub fn format_deploy_outcome(project: &ProjectConfig, outcome: &DeployOutcome) -> String {
    match outcome {
        DeployOutcome::AlreadySynced { .. } => {
            "Already synced. Nothing to deploy.".to_string()
        }
        DeployOutcome::Deployed {
            record,
            uploaded,
            deleted,
        } => format!(
            "Deployed '{}': {} file(s) uploaded, {} removed.\nMaster hash: {}",
            project.project_name, uploaded, deleted, record.deployed.master_hash
        ),
    }
}
