//! The generate use case end to end

use super::test_utils::{build_fixture, write_zip};
use std::fs;
use tempfile::TempDir;
use treemark::generate::{output_base_name, GenerateRequest, GenerateStructure, OutputFormat};
use treemark::scan::{ScanOptions, ScannerKind};
use treemark::serialize::{from_json_str, parse_markdown};

#[tokio::test]
async fn test_generate_documents_agree() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("project");
    build_fixture(&project, &["a/b/c.txt", "a/d.txt", "e/", "f.md"]);

    let request = GenerateRequest::new(&project, temp_dir.path().join("outputs"));
    let outcome = GenerateStructure::new(ScannerKind::Local, ScanOptions::default())
        .generate(&request)
        .await
        .unwrap();

    let results = &outcome.results;
    assert_eq!(results.files, 3);
    assert_eq!(results.directories, 4);

    let from_json = from_json_str(&fs::read_to_string(results.json.as_ref().unwrap()).unwrap())
        .unwrap();
    let from_markdown =
        parse_markdown(&fs::read_to_string(results.markdown.as_ref().unwrap()).unwrap()).unwrap();
    assert!(from_json.same_shape(&from_markdown));
}

#[tokio::test]
async fn test_generate_from_zip_names_outputs_after_archive() {
    let temp_dir = TempDir::new().unwrap();
    let zip_path = temp_dir.path().join("bundle.zip");
    write_zip(&zip_path, &["src/lib.rs", "Cargo.toml"]);

    let mut request = GenerateRequest::new(&zip_path, temp_dir.path().join("outputs"));
    request.format = OutputFormat::Markdown;

    let results = GenerateStructure::new(ScannerKind::Auto, ScanOptions::default())
        .generate(&request)
        .await
        .unwrap()
        .results;

    let markdown_path = results.markdown.unwrap();
    assert_eq!(
        markdown_path.file_name().unwrap().to_string_lossy(),
        format!("{}.md", output_base_name(&zip_path))
    );
    assert_eq!(
        fs::read_to_string(markdown_path).unwrap(),
        "- bundle.zip/\n  - src/\n    - lib.rs\n  - Cargo.toml"
    );
}

#[tokio::test]
async fn test_single_worker_matches_default_concurrency() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("p");
    build_fixture(&project, &["1/a", "2/b", "3/c", "4/d", "5/e", "top"]);

    let serial = GenerateStructure::new(
        ScannerKind::Local,
        ScanOptions {
            max_concurrency: 1,
            follow_symlinks: true,
        },
    );
    let parallel = GenerateStructure::new(ScannerKind::Local, ScanOptions::default());

    let mut request = GenerateRequest::new(&project, temp_dir.path().join("serial"));
    request.format = OutputFormat::Json;
    let serial_json = fs::read_to_string(
        serial.generate(&request).await.unwrap().results.json.unwrap(),
    )
    .unwrap();

    request.outputs_dir = temp_dir.path().join("parallel");
    let parallel_json = fs::read_to_string(
        parallel.generate(&request).await.unwrap().results.json.unwrap(),
    )
    .unwrap();

    assert_eq!(serial_json, parallel_json);
}
