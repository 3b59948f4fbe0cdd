//! Extension filters on the local scanner

use super::test_utils::build_fixture;
use treemark::scan::{ExtensionFilter, LocalScanner, ScanOptions, Scanner};
use treemark::serialize::flatten;
use tempfile::TempDir;

async fn scan_files(root: &std::path::Path, filter: ExtensionFilter) -> Vec<String> {
    let tree = LocalScanner::new(ScanOptions::default())
        .scan(root, &filter)
        .await
        .unwrap();
    let mut files = flatten(&tree);
    files.sort();
    files
}

#[tokio::test]
async fn test_include_keeps_matching_files_only() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("pkg");
    build_fixture(&root, &["a.py", "b.txt"]);

    let files = scan_files(&root, ExtensionFilter::new(vec![".py".into()], vec![])).await;
    assert_eq!(files, vec!["pkg/a.py"]);
}

#[tokio::test]
async fn test_exclude_drops_matching_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("pkg");
    build_fixture(&root, &["a.py", "b.txt"]);

    let files = scan_files(&root, ExtensionFilter::new(vec![], vec![".txt".into()])).await;
    assert_eq!(files, vec!["pkg/a.py"]);
}

#[tokio::test]
async fn test_directories_are_descended_regardless_of_filters() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("pkg");
    build_fixture(&root, &["docs.txt/inner.py", "src/deep/x.py", "src/deep/y.md", "empty/"]);

    let tree = LocalScanner::new(ScanOptions::default())
        .scan(&root, &ExtensionFilter::from_csv(Some(".py"), Some(".txt")))
        .await
        .unwrap();

    let mut files = flatten(&tree);
    files.sort();
    assert_eq!(files, vec!["pkg/docs.txt/inner.py", "pkg/src/deep/x.py"]);

    let empty = tree.children.iter().find(|c| c.name == "empty").unwrap();
    assert!(empty.is_dir);
    assert!(empty.children.is_empty());
}

#[tokio::test]
async fn test_sizes_and_kinds() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("pkg");
    build_fixture(&root, &["sub/"]);
    std::fs::write(root.join("five.bin"), b"12345").unwrap();

    let tree = LocalScanner::default()
        .scan(&root, &ExtensionFilter::default())
        .await
        .unwrap();

    assert!(tree.is_dir);
    assert_eq!(tree.size, None);
    let file = tree.children.iter().find(|c| c.name == "five.bin").unwrap();
    assert_eq!(file.size, Some(5));
    let sub = tree.children.iter().find(|c| c.name == "sub").unwrap();
    assert_eq!(sub.size, None);
}
