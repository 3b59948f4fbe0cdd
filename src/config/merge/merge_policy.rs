//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("scan.scanner", "auto")?
        .set_default("scan.max_concurrency", 10)?
        .set_default("scan.follow_symlinks", true)?
        .set_default("output.outputs_dir", "outputs")?
        .set_default("output.format", "both")?
        .set_default("output.keep_extensions", true)
}
