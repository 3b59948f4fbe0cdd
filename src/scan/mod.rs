//! Scanners
//!
//! Turn a directory or a zip archive into a [`TreeNode`]. The scanner variants form a
//! closed set behind the [`Scanner`] capability; [`scanner_for`] picks one from the
//! shape of the input.

pub mod archive;
pub mod filter;
pub mod local;

use crate::error::ScanError;
use crate::tree::TreeNode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub use archive::ArchiveScanner;
pub use filter::ExtensionFilter;
pub use local::LocalScanner;

/// Default upper bound on concurrently scanned branches.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Produce a tree from a path.
#[async_trait]
pub trait Scanner: Send + Sync {
    async fn scan(&self, path: &Path, filter: &ExtensionFilter) -> Result<TreeNode, ScanError>;
}

/// Which scanner to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScannerKind {
    /// Zip scanner for `.zip` files, local scanner otherwise
    #[default]
    Auto,
    /// Local filesystem scanner
    Local,
    /// Zip archive scanner
    Zip,
}

/// Tuning knobs for the local scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub max_concurrency: usize,
    pub follow_symlinks: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            follow_symlinks: true,
        }
    }
}

/// The concrete scanner chosen by [`scanner_for`].
#[derive(Debug, Clone)]
pub enum AnyScanner {
    Local(LocalScanner),
    Archive(ArchiveScanner),
}

#[async_trait]
impl Scanner for AnyScanner {
    async fn scan(&self, path: &Path, filter: &ExtensionFilter) -> Result<TreeNode, ScanError> {
        match self {
            AnyScanner::Local(scanner) => scanner.scan(path, filter).await,
            AnyScanner::Archive(scanner) => scanner.scan(path, filter).await,
        }
    }
}

/// Pick a scanner for `path`.
///
/// `Auto` chooses the archive scanner only for an existing file named `*.zip`
/// (case-insensitive).
pub fn scanner_for(path: &Path, kind: ScannerKind, options: ScanOptions) -> AnyScanner {
    let scanner = match kind {
        ScannerKind::Auto if looks_like_zip(path) => AnyScanner::Archive(ArchiveScanner::new()),
        ScannerKind::Auto | ScannerKind::Local => AnyScanner::Local(LocalScanner::new(options)),
        ScannerKind::Zip => AnyScanner::Archive(ArchiveScanner::new()),
    };
    debug!(path = %path.display(), ?kind, scanner = ?scanner, "Selected scanner");
    scanner
}

fn looks_like_zip(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("zip"))
            .unwrap_or(false)
}
