//! Zip archive scanner
//!
//! Rebuilds the hierarchy from entry names alone. Intermediate directories that only
//! appear as prefixes are created once and shared by every entry below them.

use super::{ExtensionFilter, Scanner};
use crate::error::ScanError;
use crate::tree::path::split_flat_path;
use crate::tree::TreeNode;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};
use zip::result::ZipError;
use zip::ZipArchive;

/// Scanner for `.zip` archives
#[derive(Debug, Clone, Default)]
pub struct ArchiveScanner;

impl ArchiveScanner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Scanner for ArchiveScanner {
    /// Extension filters do not apply to archive entries.
    #[instrument(skip(self, filter), fields(path = %path.display()))]
    async fn scan(&self, path: &Path, filter: &ExtensionFilter) -> Result<TreeNode, ScanError> {
        if !filter.is_empty() {
            debug!("Extension filters are ignored for archives");
        }
        let archive_path = path.to_path_buf();
        tokio::task::spawn_blocking(move || scan_archive(&archive_path))
            .await
            .map_err(|e| ScanError::failed(path, e))?
    }
}

/// Arena slot used while the hierarchy is assembled.
struct Slot {
    node: TreeNode,
    children: Vec<usize>,
}

/// Read the central directory of `path` and build its tree.
pub fn scan_archive(path: &Path) -> Result<TreeNode, ScanError> {
    let start = Instant::now();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ScanError::NotFound(path.to_path_buf()),
        _ => ScanError::failed(path, e),
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| match e {
        ZipError::InvalidArchive(_) | ZipError::UnsupportedArchive(_) => {
            ScanError::NotArchive(path.to_path_buf())
        }
        other => ScanError::failed(path, other),
    })?;

    let root_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    let mut slots = vec![Slot {
        node: TreeNode::directory(root_name, path.to_string_lossy().into_owned()),
        children: Vec::new(),
    }];
    // Virtual entry path -> slot index. The root is the empty path.
    let mut index: HashMap<String, usize> = HashMap::from([(String::new(), 0)]);

    for i in 0..archive.len() {
        let entry = archive
            .by_index_raw(i)
            .map_err(|e| ScanError::failed(path, e))?;
        let entry_is_dir = entry.is_dir();
        let entry_size = entry.size();
        let entry_name = entry.name().to_string();
        drop(entry);

        let segments = split_flat_path(&entry_name);
        let mut parent_key = String::new();
        for (depth, segment) in segments.iter().enumerate() {
            let key = if parent_key.is_empty() {
                segment.to_string()
            } else {
                format!("{}/{}", parent_key, segment)
            };
            if !index.contains_key(&key) {
                let is_dir = depth + 1 < segments.len() || entry_is_dir;
                let node = if is_dir {
                    TreeNode::directory(*segment, key.clone())
                } else {
                    TreeNode::file(*segment, key.clone(), Some(entry_size))
                };
                let slot = slots.len();
                slots.push(Slot {
                    node,
                    children: Vec::new(),
                });
                let parent = index[&parent_key];
                slots[parent].children.push(slot);
                index.insert(key.clone(), slot);
            }
            parent_key = key;
        }
    }

    let entries = slots.len() - 1;
    let root = assemble(&mut slots, 0);
    info!(
        entries,
        duration_ms = start.elapsed().as_millis(),
        "Archive scan completed"
    );
    Ok(root)
}

/// Move the arena into an owned tree, children in insertion order.
fn assemble(slots: &mut Vec<Slot>, idx: usize) -> TreeNode {
    let children = std::mem::take(&mut slots[idx].children);
    let mut node = std::mem::replace(&mut slots[idx].node, TreeNode::empty());
    for child in children {
        let child_node = assemble(slots, child);
        node.add_child(child_node);
    }
    node
}
