//! CLI presentation: text formatters per command.

use crate::generate::{GenerateResults, OutputFormat};
use crate::recreate::{RecreateAction, RecreateReport};
use crate::timing::UseCaseResult;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn format_generate_result(outcome: &UseCaseResult<GenerateResults>) -> String {
    let results = &outcome.results;
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Document", "Path"]);
    if let Some(ref json) = results.json {
        table.add_row(vec!["JSON".to_string(), json.display().to_string()]);
    }
    if let Some(ref markdown) = results.markdown {
        table.add_row(vec!["Markdown".to_string(), markdown.display().to_string()]);
    }

    format!(
        "{}\n{}",
        format!(
            "Scanned {} files in {} directories ({:.2}s)",
            results.files,
            results.directories,
            outcome.elapsed.as_secs_f64()
        )
        .green(),
        table
    )
}

pub fn format_recreate_report(report: &RecreateReport) -> String {
    let summary = if report.dry_run {
        format!(
            "Dry run: would create {} directories and {} files",
            report.directory_count(),
            report.file_count()
        )
        .yellow()
        .to_string()
    } else {
        format!(
            "Created {} directories and {} files",
            report.directory_count(),
            report.file_count()
        )
        .green()
        .to_string()
    };

    if report.actions.is_empty() {
        return summary;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Action", "Path"]);
    for action in &report.actions {
        let (kind, path) = match action {
            RecreateAction::CreateDirectory(path) => ("directory", path),
            RecreateAction::CreateFile(path) => ("file", path),
        };
        table.add_row(vec![kind.to_string(), path.display().to_string()]);
    }
    format!("{}\n{}", summary, table)
}

pub fn format_convert_result(format: OutputFormat, target: &Path) -> String {
    let label = match format {
        OutputFormat::Json => "JSON",
        OutputFormat::Markdown => "Markdown",
        OutputFormat::Both => "documents",
    };
    format!("Wrote {} to {}", label, target.display().bold())
}
