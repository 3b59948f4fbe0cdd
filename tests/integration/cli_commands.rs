//! Command routing through the CLI run context

use super::test_utils::build_fixture;
use clap::Parser;
use std::fs;
use tempfile::TempDir;
use treemark::cli::{map_error, Cli, RunContext};
use treemark::config::{TreeMarkConfig, WORKSPACE_CONFIG_FILE};

fn run(workspace: &std::path::Path, args: &[&str]) -> Result<String, String> {
    let mut argv = vec!["treemark"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    RunContext::with_config(workspace.to_path_buf(), TreeMarkConfig::default())
        .execute(&cli.command)
        .map_err(|e| map_error(&e))
}

#[test]
fn test_generate_then_convert_both_ways() {
    let temp_dir = TempDir::new().unwrap();
    let ws = temp_dir.path();
    let project = ws.join("proj");
    build_fixture(&project, &["lib/util.rs", "main.rs"]);
    let outputs = ws.join("outputs");

    run(
        ws,
        &[
            "generate",
            project.to_str().unwrap(),
            "--output",
            "json",
            "--outputs-dir",
            outputs.to_str().unwrap(),
        ],
    )
    .unwrap();
    let json_doc = fs::read_dir(&outputs).unwrap().next().unwrap().unwrap().path();

    let converted = ws.join("converted");
    let text = run(
        ws,
        &[
            "convert",
            "json-to-markdown",
            json_doc.to_str().unwrap(),
            "--outputs-dir",
            converted.to_str().unwrap(),
        ],
    )
    .unwrap();
    assert!(text.contains("Wrote Markdown"));

    let md_doc = fs::read_dir(&converted).unwrap().next().unwrap().unwrap().path();
    let text = run(
        ws,
        &[
            "convert",
            "markdown-to-json",
            md_doc.to_str().unwrap(),
            "--outputs-dir",
            converted.to_str().unwrap(),
            "--strip-extensions",
        ],
    )
    .unwrap();
    assert!(text.contains("Wrote JSON"));
}

#[test]
fn test_missing_scan_target_maps_to_friendly_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nowhere");

    let err = run(temp_dir.path(), &["generate", missing.to_str().unwrap()]).unwrap_err();
    assert!(err.starts_with("Error: path does not exist"));
}

#[test]
fn test_run_context_loads_workspace_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(WORKSPACE_CONFIG_FILE),
        "[output]\nformat = \"json\"\nkeep_extensions = false\n",
    )
    .unwrap();

    let context = RunContext::new(temp_dir.path().to_path_buf(), None).unwrap();
    assert_eq!(
        context.config().output.format,
        treemark::generate::OutputFormat::Json
    );
    assert!(!context.config().output.keep_extensions);
}
