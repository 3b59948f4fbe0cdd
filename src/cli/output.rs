//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, ScanError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Scan(ScanError::NotFound(path)) => {
            format!("Error: path does not exist: {}", path.display())
        }
        ApiError::Scan(ScanError::NotArchive(path)) => format!(
            "Error: {} is not a zip archive (use --scanner local to scan it as a directory)",
            path.display()
        ),
        other => format!("Error: {}", other),
    }
}
