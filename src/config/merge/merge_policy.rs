//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// List-valued settings (extensions, ignore patterns) take their defaults from
/// serde so a later source replaces the whole list instead of merging into it.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("tracking.follow_symlinks", false)?
        .set_default("deploy.endpoint", "http://localhost:8080")?
        .set_default("deploy.connect_timeout_secs", 10_i64)?
        .set_default("deploy.request_timeout_secs", 120_i64)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
