//! CLI presentation: text and json formatters per command family.

mod project;
mod status;

pub use project::{format_deploy_outcome, format_destroy_summary, format_init_summary};
pub use status::{format_section_heading, format_status_json, format_status_text};
