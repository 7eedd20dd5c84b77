//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{
    format_deploy_outcome, format_destroy_summary, format_init_summary, format_section_heading,
    format_status_json, format_status_text,
};
pub use route::RunContext;
