//! Generate use case: scan a path and write its JSON and/or Markdown documents

use crate::error::ApiError;
use crate::repository::{ensure_dir, write_json_file, write_text_file};
use crate::scan::{scanner_for, ExtensionFilter, ScanOptions, Scanner, ScannerKind};
use crate::serialize::{to_json, to_markdown};
use crate::timing::{measure, UseCaseResult};
use crate::tree::path::{sanitize_path_for_filename, MAX_SANITIZED_LEN};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Which documents to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Both,
}

impl OutputFormat {
    pub fn includes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }

    pub fn includes_markdown(self) -> bool {
        matches!(self, OutputFormat::Markdown | OutputFormat::Both)
    }
}

/// Input of one generate call
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub filter: ExtensionFilter,
    pub outputs_dir: PathBuf,
    pub keep_extensions: bool,
}

impl GenerateRequest {
    pub fn new(path: impl Into<PathBuf>, outputs_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: OutputFormat::default(),
            filter: ExtensionFilter::default(),
            outputs_dir: outputs_dir.into(),
            keep_extensions: true,
        }
    }
}

/// Documents written by a generate call, plus the size of the scanned tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerateResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<PathBuf>,
    pub files: usize,
    pub directories: usize,
}

/// Scan, serialize, write.
#[derive(Debug, Clone)]
pub struct GenerateStructure {
    kind: ScannerKind,
    options: ScanOptions,
}

impl GenerateStructure {
    pub fn new(kind: ScannerKind, options: ScanOptions) -> Self {
        Self { kind, options }
    }

    /// Run the use case, timing the whole call.
    pub async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<UseCaseResult<GenerateResults>, ApiError> {
        let outcome = measure(self.run(request)).await?;
        info!(
            elapsed_ms = outcome.elapsed.as_millis(),
            "Generate completed"
        );
        Ok(outcome)
    }

    #[instrument(skip(self, request), fields(path = %request.path.display()))]
    async fn run(&self, request: &GenerateRequest) -> Result<GenerateResults, ApiError> {
        info!(format = ?request.format, "Starting generate");
        let scanner = scanner_for(&request.path, self.kind, self.options);
        let tree = scanner.scan(&request.path, &request.filter).await?;

        let outputs_dir = ensure_dir(&request.outputs_dir)?;
        let base_name = output_base_name(&request.path);
        let mut results = GenerateResults {
            files: tree.file_count(),
            directories: tree.directory_count(),
            ..GenerateResults::default()
        };

        if request.format.includes_json() {
            let document = to_json(&tree, request.keep_extensions)?;
            let json_path = outputs_dir.join(format!("{}.json", base_name));
            write_json_file(&json_path, &document)?;
            info!(path = %json_path.display(), "Wrote JSON");
            results.json = Some(json_path);
        }

        if request.format.includes_markdown() {
            let markdown = to_markdown(&tree, request.keep_extensions);
            let md_path = outputs_dir.join(format!("{}.md", base_name));
            write_text_file(&md_path, &markdown)?;
            info!(path = %md_path.display(), "Wrote Markdown");
            results.markdown = Some(md_path);
        }

        Ok(results)
    }
}

/// File stem for documents derived from `source`.
pub fn output_base_name(source: &Path) -> String {
    sanitize_path_for_filename(&source.to_string_lossy(), MAX_SANITIZED_LEN)
}
