//! Skeleton reconstruction
//!
//! Materializes the directories and empty files described by an exported document under
//! a destination directory. File contents are never reproduced.
//!
//! Dispatch order: an object with `flat`, then an object with `tree`, then a bare list of
//! paths, then a legacy object whose nodes carry their own `path`. Markdown documents
//! (`.md`, `.markdown`, or extension-less text that is not JSON) are parsed and converted
//! to the combined JSON shape first.

use crate::error::{RepositoryError, SerializationError};
use crate::repository::{create_empty_file, read_text_file};
use crate::serialize::json::{self, JsonShape, LegacyNode};
use crate::serialize::markdown::parse_markdown;
use crate::tree::path::{is_safe_segment, split_flat_path, split_native_path};
use crate::tree::TreeNode;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// One filesystem mutation, performed or (in a dry run) only planned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "path", rename_all = "snake_case")]
pub enum RecreateAction {
    CreateDirectory(PathBuf),
    CreateFile(PathBuf),
}

/// Outcome of [`recreate`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecreateReport {
    pub dry_run: bool,
    pub actions: Vec<RecreateAction>,
}

impl RecreateReport {
    pub fn file_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, RecreateAction::CreateFile(_)))
            .count()
    }

    pub fn directory_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, RecreateAction::CreateDirectory(_)))
            .count()
    }
}

/// Recreate the skeleton described by `document` under `destination`.
///
/// With `dry_run`, nothing on disk changes; every would-be action is logged and
/// reported. A failure aborts the remaining work and leaves already-created entries in
/// place.
#[instrument(skip(document, destination), fields(document = %document.display(), destination = %destination.display()))]
pub fn recreate(
    document: &Path,
    destination: &Path,
    dry_run: bool,
) -> Result<RecreateReport, RepositoryError> {
    let start = Instant::now();
    let data = load_document(document)?;
    let mut materializer = Materializer::new(destination, dry_run);

    match json::classify(&data) {
        JsonShape::Combined {
            flat: Some(flat), ..
        } if !flat.is_null() => {
            let entries = json::flat_entries(flat).map_err(|e| invalid(document, e))?;
            materializer.create_from_flat(&entries)?;
        }
        JsonShape::Combined {
            tree: Some(tree), ..
        } => {
            let root = json::from_nested(tree).map_err(|e| invalid(document, e))?;
            materializer.create_from_tree(&root, destination)?;
        }
        JsonShape::Combined { .. } => {
            warn!("Document has an empty flat list and no tree, nothing to create");
        }
        JsonShape::FlatList(_) => {
            let entries = json::flat_entries(&data).map_err(|e| invalid(document, e))?;
            materializer.create_from_flat(&entries)?;
        }
        JsonShape::Legacy(node) => {
            let root = json::decode_legacy(node).map_err(|e| invalid(document, e))?;
            materializer.create_from_legacy(&root)?;
        }
        JsonShape::Unrecognized if data.is_object() => {
            warn!("Document object has no recognizable entries, nothing to create");
        }
        JsonShape::Unrecognized => {
            return Err(RepositoryError::UnsupportedFormat {
                path: document.to_path_buf(),
            });
        }
    }

    let report = materializer.finish();
    info!(
        dry_run,
        files = report.file_count(),
        directories = report.directory_count(),
        duration_ms = start.elapsed().as_millis(),
        "Recreation completed"
    );
    Ok(report)
}

/// Read a document as JSON. Markdown sources are converted to the combined shape.
///
/// Extension-less documents are tried as JSON first and read as Markdown only when
/// that fails.
fn load_document(document: &Path) -> Result<Value, RepositoryError> {
    let text = read_text_file(document)?;

    if is_markdown(document) {
        return markdown_to_value(document, &text);
    }

    match serde_json::from_str(&text) {
        Ok(value) => Ok(value),
        Err(e) if document.extension().is_none() => {
            debug!(error = %e, "Extension-less document is not JSON, reading it as Markdown");
            markdown_to_value(document, &text)
        }
        Err(e) => Err(invalid(document, e.into())),
    }
}

fn markdown_to_value(document: &Path, text: &str) -> Result<Value, RepositoryError> {
    let tree = parse_markdown(text).map_err(|e| invalid(document, e))?;
    let exported = json::to_json(&tree, true).map_err(|e| invalid(document, e))?;
    serde_json::to_value(exported).map_err(|e| invalid(document, e.into()))
}

/// `.md` or `.markdown`, case-insensitive.
fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        let ext = ext.to_string_lossy();
        ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown")
    })
}

fn invalid(document: &Path, err: SerializationError) -> RepositoryError {
    RepositoryError::InvalidDocument {
        path: document.to_path_buf(),
        message: err.to_string(),
    }
}

/// Performs (or records) directory and file creation under one destination.
struct Materializer<'a> {
    destination: &'a Path,
    dry_run: bool,
    known_dirs: HashSet<PathBuf>,
    actions: Vec<RecreateAction>,
}

impl<'a> Materializer<'a> {
    fn new(destination: &'a Path, dry_run: bool) -> Self {
        Self {
            destination,
            dry_run,
            known_dirs: HashSet::new(),
            actions: Vec::new(),
        }
    }

    fn finish(self) -> RecreateReport {
        RecreateReport {
            dry_run: self.dry_run,
            actions: self.actions,
        }
    }

    /// Each entry is a `/`-separated path relative to the destination.
    fn create_from_flat(&mut self, entries: &[&str]) -> Result<(), RepositoryError> {
        for entry in entries {
            let segments = split_flat_path(entry);
            if segments.is_empty() {
                warn!(entry = %entry, "Skipping flat entry without path segments");
                continue;
            }
            let target = self.resolve(entry, &segments)?;
            self.create_file(&target)?;
        }
        Ok(())
    }

    /// Node names become path components below `dir`. An unnamed node stands for `dir`
    /// itself.
    fn create_from_tree(&mut self, node: &TreeNode, dir: &Path) -> Result<(), RepositoryError> {
        let current = if node.name.is_empty() {
            dir.to_path_buf()
        } else if is_safe_segment(&node.name) {
            dir.join(&node.name)
        } else {
            return Err(RepositoryError::UnsafePath {
                path: dir.join(&node.name),
            });
        };

        if node.is_dir {
            self.ensure_directory(&current)?;
            for child in &node.children {
                self.create_from_tree(child, &current)?;
            }
            Ok(())
        } else {
            self.create_file(&current)
        }
    }

    /// Every node is placed by its own `path`, made relative to the destination.
    /// A node without a path is skipped together with its subtree.
    fn create_from_legacy(&mut self, node: &LegacyNode) -> Result<(), RepositoryError> {
        let Some(path) = node.path() else {
            debug!("Skipping legacy node without a path");
            return Ok(());
        };

        // A path of only separators or a drive names the destination itself.
        let segments = split_native_path(path);
        if !node.is_dir() {
            if segments.is_empty() {
                warn!(path = %path, "Skipping legacy file without path segments");
                return Ok(());
            }
            let target = self.resolve(path, &segments)?;
            return self.create_file(&target);
        }

        let target = self.resolve(path, &segments)?;
        self.ensure_directory(&target)?;
        for child in node.children() {
            self.create_from_legacy(child)?;
        }
        Ok(())
    }

    fn resolve(&self, raw: &str, segments: &[&str]) -> Result<PathBuf, RepositoryError> {
        if !segments.iter().all(|s| is_safe_segment(s)) {
            return Err(RepositoryError::UnsafePath {
                path: PathBuf::from(raw),
            });
        }
        Ok(segments
            .iter()
            .fold(self.destination.to_path_buf(), |acc, s| acc.join(s)))
    }

    /// Create `dir` and any missing ancestors up to the destination, parents first.
    fn ensure_directory(&mut self, dir: &Path) -> Result<(), RepositoryError> {
        if self.known_dirs.contains(dir) {
            return Ok(());
        }
        if dir != self.destination {
            if let Some(parent) = dir.parent().filter(|p| p.starts_with(self.destination)) {
                self.ensure_directory(parent)?;
            }
        }

        if !dir.is_dir() {
            if self.dry_run {
                info!(path = %dir.display(), "Would create directory");
            } else {
                fs::create_dir_all(dir).map_err(|e| RepositoryError::io(dir, e))?;
                info!(path = %dir.display(), "Created directory");
            }
            self.actions
                .push(RecreateAction::CreateDirectory(dir.to_path_buf()));
        }
        self.known_dirs.insert(dir.to_path_buf());
        Ok(())
    }

    fn create_file(&mut self, path: &Path) -> Result<(), RepositoryError> {
        let parent = path.parent().unwrap_or(self.destination);
        self.ensure_directory(parent)?;

        if self.dry_run {
            info!(path = %path.display(), "Would create file");
        } else {
            create_empty_file(path)?;
            info!(path = %path.display(), "Created file");
        }
        self.actions.push(RecreateAction::CreateFile(path.to_path_buf()));
        Ok(())
    }
}
