//! Document conversion between the JSON and Markdown representations
//!
//! Output names follow the generate use case: `<outputs_dir>/<sanitized source path>`
//! with the target extension.

use crate::error::ApiError;
use crate::generate::output_base_name;
use crate::repository::{ensure_dir, read_text_file, write_json_file, write_text_file};
use crate::serialize::{from_json_str, parse_markdown, to_json, to_markdown};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Convert any accepted JSON document (combined, flat list, legacy) to Markdown.
#[instrument(skip(source, outputs_dir), fields(source = %source.display()))]
pub fn json_to_markdown(
    source: &Path,
    outputs_dir: &Path,
    keep_extensions: bool,
) -> Result<PathBuf, ApiError> {
    let text = read_text_file(source)?;
    let tree = from_json_str(&text)?;
    let markdown = to_markdown(&tree, keep_extensions);

    let target = ensure_dir(outputs_dir)?.join(format!("{}.md", output_base_name(source)));
    write_text_file(&target, &markdown)?;
    info!(target = %target.display(), "Wrote Markdown");
    Ok(target)
}

/// Convert a Markdown bullet list to the combined JSON document.
#[instrument(skip(source, outputs_dir), fields(source = %source.display()))]
pub fn markdown_to_json(
    source: &Path,
    outputs_dir: &Path,
    keep_extensions: bool,
) -> Result<PathBuf, ApiError> {
    let text = read_text_file(source)?;
    let tree = parse_markdown(&text)?;
    let document = to_json(&tree, keep_extensions)?;

    let target = ensure_dir(outputs_dir)?.join(format!("{}.json", output_base_name(source)));
    write_json_file(&target, &document)?;
    info!(target = %target.display(), "Wrote JSON");
    Ok(target)
}
