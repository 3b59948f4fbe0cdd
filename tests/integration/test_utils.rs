//! Shared fixtures for integration tests

use std::fs;
use std::io::Write;
use std::path::Path;
use zip::write::FileOptions;
use zip::ZipWriter;

/// Create files under `root`. Entries ending in `/` are created as directories.
pub fn build_fixture(root: &Path, entries: &[&str]) {
    for entry in entries {
        let path = root.join(entry.trim_end_matches('/'));
        if entry.ends_with('/') {
            fs::create_dir_all(&path).unwrap();
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, entry.as_bytes()).unwrap();
        }
    }
}

/// Write a zip archive. Entries ending in `/` become explicit directory entries.
pub fn write_zip(path: &Path, entries: &[&str]) {
    let file = fs::File::create(path).unwrap();
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default();
    for entry in entries {
        if entry.ends_with('/') {
            writer.add_directory(*entry, options).unwrap();
        } else {
            writer.start_file(*entry, options).unwrap();
            writer.write_all(entry.as_bytes()).unwrap();
        }
    }
    writer.finish().unwrap();
}

/// Names of the direct children of `node`, in order.
pub fn child_names(node: &treemark::tree::TreeNode) -> Vec<&str> {
    node.children.iter().map(|c| c.name.as_str()).collect()
}
