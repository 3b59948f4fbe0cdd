//! CLI route: single route table and run context. Dispatches to use cases and presentation.

use crate::cli::parse::{Commands, ConvertCommands};
use crate::cli::presentation::{format_convert_result, format_generate_result, format_recreate_report};
use crate::config::{ConfigLoader, TreeMarkConfig};
use crate::convert::{json_to_markdown, markdown_to_json};
use crate::error::ApiError;
use crate::generate::{GenerateRequest, GenerateStructure, OutputFormat};
use crate::recreate::recreate;
use crate::scan::{ExtensionFilter, ScanOptions, ScannerKind};
use std::path::{Path, PathBuf};
use tracing::info;

/// Runtime context for CLI execution: workspace root and loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: TreeMarkConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::with_config(workspace_root, config))
    }

    /// Create run context from an already loaded configuration.
    pub fn with_config(workspace_root: PathBuf, config: TreeMarkConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &TreeMarkConfig {
        &self.config
    }

    /// Execute a command and return its human-readable output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Generate {
                path,
                output,
                include_extensions,
                exclude_extensions,
                scanner,
                concurrency,
                outputs_dir,
                strip_extensions,
            } => {
                let filter = if include_extensions.is_some() || exclude_extensions.is_some() {
                    ExtensionFilter::from_csv(
                        include_extensions.as_deref(),
                        exclude_extensions.as_deref(),
                    )
                } else {
                    self.config.scan.filter()
                };
                let request = GenerateRequest {
                    path: path.clone(),
                    format: output.unwrap_or(self.config.output.format),
                    filter,
                    outputs_dir: self.resolve_outputs_dir(outputs_dir.as_deref()),
                    keep_extensions: self.keep_extensions(*strip_extensions),
                };
                let options = ScanOptions {
                    max_concurrency: concurrency.unwrap_or(self.config.scan.max_concurrency),
                    ..self.config.scan.options()
                };
                self.handle_generate(scanner.unwrap_or(self.config.scan.scanner), options, &request)
            }
            Commands::Recreate {
                document,
                destination,
                dry_run,
            } => {
                let report = recreate(document, destination, *dry_run)?;
                Ok(format_recreate_report(&report))
            }
            Commands::Convert { command } => match command {
                ConvertCommands::JsonToMarkdown {
                    file,
                    outputs_dir,
                    strip_extensions,
                } => {
                    let target = json_to_markdown(
                        file,
                        &self.resolve_outputs_dir(outputs_dir.as_deref()),
                        self.keep_extensions(*strip_extensions),
                    )?;
                    Ok(format_convert_result(OutputFormat::Markdown, &target))
                }
                ConvertCommands::MarkdownToJson {
                    file,
                    outputs_dir,
                    strip_extensions,
                } => {
                    let target = markdown_to_json(
                        file,
                        &self.resolve_outputs_dir(outputs_dir.as_deref()),
                        self.keep_extensions(*strip_extensions),
                    )?;
                    Ok(format_convert_result(OutputFormat::Json, &target))
                }
            },
        }
    }

    fn handle_generate(
        &self,
        kind: ScannerKind,
        options: ScanOptions,
        request: &GenerateRequest,
    ) -> Result<String, ApiError> {
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| ApiError::Runtime(format!("Failed to create async runtime: {}", e)))?;
        let outcome = rt.block_on(GenerateStructure::new(kind, options).generate(request))?;
        info!(
            files = outcome.results.files,
            directories = outcome.results.directories,
            "Generate command finished"
        );
        Ok(format_generate_result(&outcome))
    }

    /// A flag wins over configuration; configured directories are relative to the workspace.
    fn resolve_outputs_dir(&self, flag: Option<&Path>) -> PathBuf {
        match flag {
            Some(dir) => dir.to_path_buf(),
            None => self.workspace_root.join(&self.config.output.outputs_dir),
        }
    }

    fn keep_extensions(&self, strip_flag: bool) -> bool {
        !strip_flag && self.config.output.keep_extensions
    }
}
