//! Status presentation: summary table, path lists, raw JSON dump.

use crate::error::{ApiError, StorageError};
use crate::tracker::TrackerRecord;
use crate::types::RelPath;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::collections::BTreeSet;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn short_hash(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}

fn push_path_list(out: &mut String, title: &str, paths: &BTreeSet<RelPath>) {
    if paths.is_empty() {
        return;
    }
    out.push_str(&format!("\n{}\n", format_section_heading(title)));
    for path in paths {
        out.push_str(&format!("  {}\n", path));
    }
}

pub fn format_status_text(record: &TrackerRecord) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Status"));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Field", "Value"]);
    let status = if record.is_synced() {
        format!("{}", record.status.green())
    } else {
        format!("{}", record.status.yellow())
    };
    table.add_row(vec!["Status".to_string(), status]);
    table.add_row(vec![
        "File-addition".to_string(),
        record.file_addition_count.to_string(),
    ]);
    table.add_row(vec![
        "File-deletion".to_string(),
        record.file_deletion_count.to_string(),
    ]);
    table.add_row(vec![
        "File-change".to_string(),
        record.file_change_count.to_string(),
    ]);
    table.add_row(vec![
        "Tracked files".to_string(),
        record.current.len().to_string(),
    ]);
    table.add_row(vec![
        "Current hash".to_string(),
        short_hash(&record.current.master_hash).to_string(),
    ]);
    table.add_row(vec![
        "Deployed hash".to_string(),
        short_hash(&record.deployed.master_hash).to_string(),
    ]);
    table.add_row(vec![
        "Deployed at".to_string(),
        record
            .deployed_at
            .map(|at| at.to_rfc3339())
            .unwrap_or_else(|| "never".to_string()),
    ]);
    out.push_str(&format!("{}\n", table));

    push_path_list(&mut out, "Added", &record.files_added);
    push_path_list(&mut out, "Changed", &record.files_changed);
    push_path_list(&mut out, "Deleted", &record.files_deleted);
    out.trim_end().to_string()
}

/// The whole record as pretty JSON with sorted keys.
pub fn format_status_json(record: &TrackerRecord) -> Result<String, ApiError> {
    let value = serde_json::to_value(record)
        .map_err(|e| ApiError::StorageError(StorageError::Serialization(e.to_string())))?;
    serde_json::to_string_pretty(&value)
        .map_err(|e| ApiError::StorageError(StorageError::Serialization(e.to_string())))
}
