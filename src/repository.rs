//! Filesystem helpers for exported documents and recreated skeletons

use crate::error::RepositoryError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Create `path` and all of its parents, returning the canonical absolute path.
///
/// Existing directories are not an error.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<PathBuf, RepositoryError> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|e| RepositoryError::io(path, e))?;
    dunce::canonicalize(path).map_err(|e| RepositoryError::io(path, e))
}

/// Write text to `path` atomically
///
/// Parent directories are created first. Content goes to `<path>.tmp`, which is then
/// renamed into place.
pub fn write_text_file<P: AsRef<Path>>(path: P, content: &str) -> Result<(), RepositoryError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RepositoryError::io(parent, e))?;
    }

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, content).map_err(|e| RepositoryError::io(&temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        // Clean up temp file on error
        let _ = fs::remove_file(&temp_path);
        RepositoryError::io(path, e)
    })?;

    debug!(path = %path.display(), bytes = content.len(), "Wrote file");
    Ok(())
}

/// Pretty-print `value` as UTF-8 JSON (two-space indentation) and write it atomically.
pub fn write_json_file<P: AsRef<Path>, T: Serialize + ?Sized>(
    path: P,
    value: &T,
) -> Result<(), RepositoryError> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(value).map_err(|e| RepositoryError::InvalidDocument {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    write_text_file(path, &content)
}

/// Read a UTF-8 document.
pub fn read_text_file<P: AsRef<Path>>(path: P) -> Result<String, RepositoryError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| RepositoryError::io(path, e))
}

/// Create an empty file, truncating any existing content.
pub fn create_empty_file<P: AsRef<Path>>(path: P) -> Result<(), RepositoryError> {
    let path = path.as_ref();
    fs::File::create(path).map_err(|e| RepositoryError::io(path, e))?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
