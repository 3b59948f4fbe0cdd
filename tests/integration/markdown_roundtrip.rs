//! Markdown rendering and parsing against scanned trees

use super::test_utils::build_fixture;
use tempfile::TempDir;
use treemark::error::SerializationError;
use treemark::scan::{ExtensionFilter, LocalScanner, Scanner};
use treemark::serialize::{parse_markdown, to_json, to_markdown};

#[tokio::test]
async fn test_scanned_tree_survives_markdown() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("site");
    build_fixture(
        &root,
        &["index.html", "assets/css/main.css", "assets/img/", "-draft.md"],
    );

    let tree = LocalScanner::default()
        .scan(&root, &ExtensionFilter::default())
        .await
        .unwrap();
    let markdown = to_markdown(&tree, true);
    assert!(markdown.lines().all(|l| !l.trim().is_empty()));

    let parsed = parse_markdown(&markdown).unwrap();
    assert!(parsed.same_shape(&tree));
}

#[test]
fn test_hand_written_markdown_is_tolerated() {
    let text = "\
* project/

  + src/
      - lib.rs
  - Cargo.toml
";
    let tree = parse_markdown(text).unwrap();
    assert_eq!(tree.name, "project");
    assert_eq!(tree.children.len(), 2);
    assert_eq!(tree.children[0].children[0].name, "lib.rs");

    let document = to_json(&tree, true).unwrap();
    assert_eq!(document.flat, vec!["project/src/lib.rs", "project/Cargo.toml"]);
}

#[test]
fn test_stripped_markdown_keeps_directory_names() {
    let tree = parse_markdown("- v2.0/\n  - app.tar.gz").unwrap();
    assert_eq!(to_markdown(&tree, false), "- v2.0/\n  - app.tar");
}

#[test]
fn test_two_top_level_entries_fail() {
    let err = parse_markdown("- a.txt\n- b.txt").unwrap_err();
    assert!(matches!(err, SerializationError::Markdown { line: 2, .. }));
}
