//! Zip archives through the scanner factory

use super::test_utils::{child_names, write_zip};
use tempfile::TempDir;
use treemark::error::ScanError;
use treemark::scan::{scanner_for, AnyScanner, ExtensionFilter, ScanOptions, Scanner, ScannerKind};
use treemark::serialize::{flatten, to_json};

#[tokio::test]
async fn test_auto_scanner_reads_zip_hierarchy() {
    let temp_dir = TempDir::new().unwrap();
    let zip_path = temp_dir.path().join("release.zip");
    write_zip(
        &zip_path,
        &["bin/", "bin/tool", "lib/a/one.so", "lib/a/two.so", "README"],
    );

    let scanner = scanner_for(&zip_path, ScannerKind::Auto, ScanOptions::default());
    assert!(matches!(scanner, AnyScanner::Archive(_)));

    let tree = scanner
        .scan(&zip_path, &ExtensionFilter::default())
        .await
        .unwrap();

    assert_eq!(tree.name, "release.zip");
    assert_eq!(child_names(&tree), vec!["bin", "lib", "README"]);
    assert_eq!(
        flatten(&tree),
        vec![
            "release.zip/bin/tool",
            "release.zip/lib/a/one.so",
            "release.zip/lib/a/two.so",
            "release.zip/README",
        ]
    );
    // Entry contents are the entry names themselves
    assert_eq!(tree.children[2].size, Some("README".len() as u64));
}

#[tokio::test]
async fn test_archive_tree_exports_like_a_directory() {
    let temp_dir = TempDir::new().unwrap();
    let zip_path = temp_dir.path().join("a.zip");
    write_zip(&zip_path, &["x/y.txt"]);

    let tree = scanner_for(&zip_path, ScannerKind::Zip, ScanOptions::default())
        .scan(&zip_path, &ExtensionFilter::default())
        .await
        .unwrap();
    let document = to_json(&tree, true).unwrap();

    assert_eq!(document.flat, vec!["a.zip/x/y.txt"]);
    let value = serde_json::to_value(&document.tree).unwrap();
    assert_eq!(value["children"][0]["type"], "directory");
}

#[tokio::test]
async fn test_forced_zip_scanner_on_plain_file() {
    let temp_dir = TempDir::new().unwrap();
    let text = temp_dir.path().join("notes.txt");
    std::fs::write(&text, "plain text").unwrap();

    let err = scanner_for(&text, ScannerKind::Zip, ScanOptions::default())
        .scan(&text, &ExtensionFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::NotArchive(_)));
}
