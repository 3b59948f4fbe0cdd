//! Integration tests for TreeMark scanning, serialization and reconstruction

mod test_utils;

mod archive_scan;
mod cli_commands;
mod generate_usecase;
mod json_export;
mod markdown_roundtrip;
mod recreate_skeleton;
mod scan_filters;
