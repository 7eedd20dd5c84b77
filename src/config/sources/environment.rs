//! Environment source: CODERMAN_<SECTION>__<KEY>, e.g. CODERMAN_DEPLOY__ENDPOINT.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("CODERMAN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("tracking.extensions")
            .with_list_parse_key("tracking.ignore_patterns"),
    )
}
