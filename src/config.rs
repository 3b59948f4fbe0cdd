//! Configuration System
//!
//! Layered configuration for scanning, output and logging: built-in defaults, a global
//! file, workspace files, then `TREEMARK_*` environment overrides. CLI flags are applied
//! on top by the caller.

use crate::generate::OutputFormat;
use crate::logging::LoggingConfig;
use crate::scan::{ExtensionFilter, ScanOptions, ScannerKind, DEFAULT_MAX_CONCURRENCY};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeMarkConfig {
    /// Scanner selection and tuning
    #[serde(default)]
    pub scan: ScanConfig,

    /// Generated document settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scanner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub scanner: ScannerKind,

    /// Upper bound on concurrently scanned branches
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    #[serde(default = "default_true")]
    pub follow_symlinks: bool,

    /// Only files with one of these suffixes are kept (empty keeps all)
    #[serde(default)]
    pub include_extensions: Vec<String>,

    /// Files with one of these suffixes are dropped
    #[serde(default)]
    pub exclude_extensions: Vec<String>,
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

fn default_true() -> bool {
    true
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            scanner: ScannerKind::default(),
            max_concurrency: default_max_concurrency(),
            follow_symlinks: default_true(),
            include_extensions: Vec::new(),
            exclude_extensions: Vec::new(),
        }
    }
}

impl ScanConfig {
    pub fn options(&self) -> ScanOptions {
        ScanOptions {
            max_concurrency: self.max_concurrency,
            follow_symlinks: self.follow_symlinks,
        }
    }

    pub fn filter(&self) -> ExtensionFilter {
        ExtensionFilter::new(
            self.include_extensions.clone(),
            self.exclude_extensions.clone(),
        )
    }

    /// Validate scanner configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory generated documents are written to
    #[serde(default = "default_outputs_dir")]
    pub outputs_dir: PathBuf,

    #[serde(default)]
    pub format: OutputFormat,

    /// Keep file extensions in nested names and Markdown lines
    #[serde(default = "default_true")]
    pub keep_extensions: bool,
}

fn default_outputs_dir() -> PathBuf {
    PathBuf::from("outputs")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            outputs_dir: default_outputs_dir(),
            format: OutputFormat::default(),
            keep_extensions: default_true(),
        }
    }
}

impl OutputConfig {
    /// Validate output configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.outputs_dir.as_os_str().is_empty() {
            return Err("outputs_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Scan(String),
    Output(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Scan(msg) => write!(f, "Scan: {}", msg),
            ValidationError::Output(msg) => write!(f, "Output: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl TreeMarkConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.scan.validate() {
            errors.push(ValidationError::Scan(e));
        }
        if let Err(e) = self.output.validate() {
            errors.push(ValidationError::Output(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
