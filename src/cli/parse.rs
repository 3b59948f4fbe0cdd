//! CLI parse: clap types for TreeMark. No behavior; definitions only.

use crate::generate::OutputFormat;
use crate::scan::ScannerKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TreeMark CLI - folder structures as JSON and Markdown trees
#[derive(Parser)]
#[command(name = "treemark")]
#[command(about = "Turn folder structures into JSON and Markdown trees, and back into empty skeletons")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q', default_value = "false", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (used when output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a directory or zip archive and write its JSON and/or Markdown tree
    Generate {
        /// Directory or .zip file to scan
        path: PathBuf,
        /// Documents to write
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,
        /// Comma-separated suffixes to keep, e.g. ".py,.md"
        #[arg(long)]
        include_extensions: Option<String>,
        /// Comma-separated suffixes to drop, e.g. ".log"
        #[arg(long)]
        exclude_extensions: Option<String>,
        /// Scanner to use
        #[arg(long, value_enum)]
        scanner: Option<ScannerKind>,
        /// Maximum number of branches scanned concurrently
        #[arg(long)]
        concurrency: Option<usize>,
        /// Directory the documents are written to
        #[arg(long)]
        outputs_dir: Option<PathBuf>,
        /// Drop file extensions from nested names and Markdown lines
        #[arg(long)]
        strip_extensions: bool,
    },
    /// Create the empty directory/file skeleton described by a JSON or Markdown document
    Recreate {
        /// JSON or Markdown document
        document: PathBuf,
        /// Directory the skeleton is created under
        destination: PathBuf,
        /// Report what would be created without touching the filesystem
        #[arg(long)]
        dry_run: bool,
    },
    /// Convert documents between JSON and Markdown
    Convert {
        #[command(subcommand)]
        command: ConvertCommands,
    },
}

#[derive(Subcommand)]
pub enum ConvertCommands {
    /// Convert a JSON document (combined, flat list or legacy) to Markdown
    JsonToMarkdown {
        /// JSON document
        file: PathBuf,
        /// Directory the Markdown file is written to
        #[arg(long)]
        outputs_dir: Option<PathBuf>,
        /// Drop file extensions from Markdown lines
        #[arg(long)]
        strip_extensions: bool,
    },
    /// Convert a Markdown bullet list to the combined JSON document
    MarkdownToJson {
        /// Markdown document
        file: PathBuf,
        /// Directory the JSON file is written to
        #[arg(long)]
        outputs_dir: Option<PathBuf>,
        /// Drop file extensions from nested names
        #[arg(long)]
        strip_extensions: bool,
    },
}
