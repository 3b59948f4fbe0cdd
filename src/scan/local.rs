//! Local filesystem scanner
//!
//! The root is listed once; each direct child becomes a branch walked depth-first on a
//! blocking worker. A semaphore bounds how many branches run at the same time, and the
//! branches are reattached in enumeration order whatever order they finish in.

use super::{ExtensionFilter, ScanOptions, Scanner};
use crate::error::ScanError;
use crate::tree::TreeNode;
use async_trait::async_trait;
use futures::future::join_all;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

/// Scanner for directories on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalScanner {
    options: ScanOptions,
}

impl Default for LocalScanner {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}

impl LocalScanner {
    /// Create a scanner. A concurrency limit of zero is raised to one.
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options: ScanOptions {
                max_concurrency: options.max_concurrency.max(1),
                ..options
            },
        }
    }
}

#[async_trait]
impl Scanner for LocalScanner {
    #[instrument(skip(self, filter), fields(path = %path.display()))]
    async fn scan(&self, path: &Path, filter: &ExtensionFilter) -> Result<TreeNode, ScanError> {
        let start = Instant::now();
        let follow_symlinks = self.options.follow_symlinks;
        info!(
            max_concurrency = self.options.max_concurrency,
            "Starting local scan"
        );

        let listing = {
            let root = path.to_path_buf();
            let filter = filter.clone();
            tokio::task::spawn_blocking(move || list_root(&root, &filter, follow_symlinks))
                .await
                .map_err(|e| ScanError::failed(path, e))??
        };

        let (mut root, children) = match listing {
            RootListing::File(node) => return Ok(node),
            RootListing::Directory { node, children } => (node, children),
        };

        let semaphore = Arc::new(Semaphore::new(self.options.max_concurrency));
        let branches = children.into_iter().map(|child| {
            let semaphore = Arc::clone(&semaphore);
            let filter = filter.clone();
            async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| ScanError::failed(&child, e))?;
                let branch = child.clone();
                tokio::task::spawn_blocking(move || scan_branch(&branch, &filter, follow_symlinks))
                    .await
                    .map_err(|e| ScanError::failed(&child, e))?
            }
        });

        // join_all yields results in input order.
        for result in join_all(branches).await {
            if let Some(child) = result? {
                root.add_child(child);
            }
        }

        info!(
            files = root.file_count(),
            directories = root.directory_count(),
            duration_ms = start.elapsed().as_millis(),
            "Local scan completed"
        );
        Ok(root)
    }
}

/// The scan root and the children that still need a branch walk.
enum RootListing {
    File(TreeNode),
    Directory {
        node: TreeNode,
        children: Vec<PathBuf>,
    },
}

fn list_root(
    path: &Path,
    filter: &ExtensionFilter,
    follow_symlinks: bool,
) -> Result<RootListing, ScanError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ScanError::NotFound(path.to_path_buf()),
        _ => ScanError::failed(path, e),
    })?;

    let name = display_name(path);
    let path_str = path.to_string_lossy().into_owned();
    if !metadata.is_dir() {
        return Ok(RootListing::File(TreeNode::file(
            name,
            path_str,
            Some(metadata.len()),
        )));
    }

    let node = TreeNode::directory(name, path_str);
    let read_dir = match fs::read_dir(path) {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            warn!(path = %path.display(), "Permission denied while scanning");
            return Ok(RootListing::Directory {
                node,
                children: Vec::new(),
            });
        }
        Err(e) => return Err(ScanError::failed(path, e)),
    };

    let mut children = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| ScanError::failed(path, e))?;
        let child_path = entry.path();
        if !entry_is_dir(&entry, follow_symlinks) {
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if !filter.allows(&file_name) {
                debug!(path = %child_path.display(), "Filtered out by extension");
                continue;
            }
        }
        children.push(child_path);
    }

    Ok(RootListing::Directory { node, children })
}

fn entry_is_dir(entry: &fs::DirEntry, follow_symlinks: bool) -> bool {
    if follow_symlinks {
        fs::metadata(entry.path())
            .map(|m| m.is_dir())
            .unwrap_or(false)
    } else {
        entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
    }
}

/// Walk one child of the root depth-first.
///
/// Returns `None` when the branch itself has to be skipped (permission denied, vanished
/// entry).
fn scan_branch(
    branch: &Path,
    filter: &ExtensionFilter,
    follow_symlinks: bool,
) -> Result<Option<TreeNode>, ScanError> {
    // open[i] is the directory currently being filled at depth i.
    let mut open: Vec<TreeNode> = Vec::new();

    for entry in WalkDir::new(branch).follow_links(follow_symlinks) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_skippable(&err) => {
                warn!(
                    path = ?err.path(),
                    error = %err,
                    "Skipping path that could not be scanned"
                );
                continue;
            }
            Err(err) => {
                let failed_at = err.path().unwrap_or(branch).to_path_buf();
                return Err(ScanError::failed(failed_at, err));
            }
        };

        close_to_depth(&mut open, entry.depth());

        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path().to_string_lossy().into_owned();
        if entry.file_type().is_dir() {
            open.push(TreeNode::directory(name, path));
            continue;
        }

        if !filter.allows(&name) {
            debug!(path = %path, "Filtered out by extension");
            continue;
        }

        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(err) if is_skippable(&err) => {
                warn!(path = %path, error = %err, "Skipping file without readable metadata");
                continue;
            }
            Err(err) => return Err(ScanError::failed(entry.path(), err)),
        };

        let node = TreeNode::file(name, path, Some(size));
        match open.last_mut() {
            Some(parent) => parent.add_child(node),
            None => return Ok(Some(node)),
        }
    }

    close_to_depth(&mut open, 1);
    Ok(open.pop())
}

/// Fold finished directories into their parents until `open` holds at most `depth`
/// levels (never folding the branch root itself).
fn close_to_depth(open: &mut Vec<TreeNode>, depth: usize) {
    while open.len() > depth.max(1) {
        if let Some(done) = open.pop() {
            if let Some(parent) = open.last_mut() {
                parent.add_child(done);
            }
        }
    }
}

/// Permission problems, symlink loops and entries that vanished (or dangle) mid-scan
/// degrade to a skipped child.
fn is_skippable(err: &walkdir::Error) -> bool {
    if err.loop_ancestor().is_some() {
        return true;
    }
    matches!(
        err.io_error().map(io::Error::kind),
        Some(io::ErrorKind::PermissionDenied) | Some(io::ErrorKind::NotFound)
    )
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
