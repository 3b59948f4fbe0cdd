//! Error types for the TreeMark tree scanning and serialization system.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed root cause carried by scan failures.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Scan-time errors
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Not a zip archive: {0}")]
    NotArchive(PathBuf),

    #[error("Scan failed for {path}: {source}")]
    ScanFailed {
        path: PathBuf,
        #[source]
        source: BoxedCause,
    },
}

impl ScanError {
    /// Wrap any root cause as a scan failure for `path`.
    pub fn failed(path: impl Into<PathBuf>, source: impl Into<BoxedCause>) -> Self {
        ScanError::ScanFailed {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// JSON and Markdown export/import errors
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("Markdown parse error at line {line}: {message}")]
    Markdown { line: usize, message: String },
}

/// Write and reconstruction errors. Every variant names the offending path.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid document {path}: {message}")]
    InvalidDocument { path: PathBuf, message: String },

    #[error("Refusing to create entry outside the destination: {path}")]
    UnsafePath { path: PathBuf },

    #[error("Unsupported document format for recreation: {path}")]
    UnsupportedFormat { path: PathBuf },
}

impl RepositoryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RepositoryError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors surfaced by use cases, configuration and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
