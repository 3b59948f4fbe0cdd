//! Config loading facade: the only entry point callers use.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::TreeMarkConfig;
use crate::error::ApiError;
use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use std::path::Path;
use tracing::debug;

/// Loads and validates [`TreeMarkConfig`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace files,
    /// environment.
    pub fn load(workspace_root: &Path) -> Result<TreeMarkConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);
        debug!(workspace = %workspace_root.display(), "Loading configuration");
        Self::finish(builder)
    }

    /// Load configuration from one explicit file. Global and workspace files are not
    /// consulted; environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<TreeMarkConfig, ApiError> {
        if !path.is_file() {
            return Err(ApiError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);
        debug!(config_path = %path.display(), "Loading configuration file");
        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<TreeMarkConfig, ApiError> {
        let config: TreeMarkConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
