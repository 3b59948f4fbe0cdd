//! Environment source: TREEMARK_<SECTION>__<KEY>, e.g. TREEMARK_SCAN__MAX_CONCURRENCY=4

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Add the environment override source to builder.
/// Extension lists are comma-separated.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("TREEMARK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("scan.include_extensions")
            .with_list_parse_key("scan.exclude_extensions"),
    )
}
