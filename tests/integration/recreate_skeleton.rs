//! Skeleton reconstruction from generated documents

use super::test_utils::build_fixture;
use std::fs;
use tempfile::TempDir;
use treemark::recreate::{recreate, RecreateAction};
use treemark::repository::{write_json_file, write_text_file};
use treemark::scan::{ExtensionFilter, LocalScanner, Scanner};
use treemark::serialize::{flatten, to_json, to_markdown};

#[tokio::test]
async fn test_scan_export_recreate_scan() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("app");
    build_fixture(&source, &["main.py", "service/api.py", "service/db/models.py"]);

    let tree = LocalScanner::default()
        .scan(&source, &ExtensionFilter::default())
        .await
        .unwrap();
    let doc_path = temp_dir.path().join("app.json");
    write_json_file(&doc_path, &to_json(&tree, true).unwrap()).unwrap();

    let dest = temp_dir.path().join("copy");
    let report = recreate(&doc_path, &dest, false).unwrap();
    assert_eq!(report.file_count(), 3);

    let models = dest.join("app/service/db/models.py");
    assert!(models.is_file());
    assert_eq!(fs::metadata(&models).unwrap().len(), 0);

    let rescanned = LocalScanner::default()
        .scan(&dest.join("app"), &ExtensionFilter::default())
        .await
        .unwrap();
    let mut expected = flatten(&tree);
    let mut actual = flatten(&rescanned);
    expected.sort();
    actual.sort();
    assert_eq!(actual, expected);
}

#[test]
fn test_recreate_from_markdown_document() {
    let temp_dir = TempDir::new().unwrap();
    let doc = temp_dir.path().join("layout.md");
    write_text_file(&doc, "- web/\n  - static/\n  - app.js").unwrap();
    let dest = temp_dir.path().join("out");

    let report = recreate(&doc, &dest, false).unwrap();

    assert!(dest.join("web/app.js").is_file());
    // Flat lists carry files only, so empty directories are not recreated
    assert!(!dest.join("web/static").exists());
    assert_eq!(report.file_count(), 1);
}

#[test]
fn test_nested_tree_recreates_empty_directories() {
    let temp_dir = TempDir::new().unwrap();
    let doc = temp_dir.path().join("tree.json");
    fs::write(
        &doc,
        r#"{"tree": {"name": "web", "type": "directory", "children": [
            {"name": "static", "type": "directory"},
            {"name": "app.js", "type": "file"}
        ]}}"#,
    )
    .unwrap();
    let dest = temp_dir.path().join("out");

    recreate(&doc, &dest, false).unwrap();
    assert!(dest.join("web/static").is_dir());
    assert!(dest.join("web/app.js").is_file());
}

#[test]
fn test_dry_run_reports_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let doc = temp_dir.path().join("doc.json");
    fs::write(&doc, r#"{"flat": ["x/y.txt"]}"#).unwrap();
    let dest = temp_dir.path().join("D");

    let report = recreate(&doc, &dest, true).unwrap();

    assert!(!dest.exists());
    assert!(report
        .actions
        .contains(&RecreateAction::CreateFile(dest.join("x").join("y.txt"))));
}

#[test]
fn test_markdown_export_can_be_recreated() {
    let temp_dir = TempDir::new().unwrap();
    let mut root = treemark::tree::TreeNode::directory("r", "r");
    root.add_child(treemark::tree::TreeNode::file("a.txt", "r/a.txt", None));
    let doc = temp_dir.path().join("r.md");
    write_text_file(&doc, &to_markdown(&root, true)).unwrap();

    let dest = temp_dir.path().join("out");
    recreate(&doc, &dest, false).unwrap();
    assert!(dest.join("r/a.txt").is_file());
}
