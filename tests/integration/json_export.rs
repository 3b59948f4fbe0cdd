//! JSON export and import across the accepted document shapes

use serde_json::json;
use treemark::serialize::{flatten, from_json, from_json_str, to_json};
use treemark::tree::TreeNode;

fn sample() -> TreeNode {
    let mut root = TreeNode::directory("root", "/abs/root");
    root.add_child(TreeNode::file("f.txt", "/abs/root/f.txt", Some(1)));
    let mut sub = TreeNode::directory("sub", "/abs/root/sub");
    sub.add_child(TreeNode::file("g.md", "/abs/root/sub/g.md", Some(2)));
    root.add_child(sub);
    root
}

#[test]
fn test_combined_document_text_round_trip() {
    let document = to_json(&sample(), true).unwrap();
    let text = serde_json::to_string_pretty(&document).unwrap();
    assert!(!text.contains("\"path\""));
    assert!(!text.contains("\"size\""));

    let decoded = from_json_str(&text).unwrap();
    assert!(decoded.same_shape(&sample()));
}

#[test]
fn test_stripped_names_do_not_touch_flat() {
    let document = to_json(&sample(), false).unwrap();
    let value = serde_json::to_value(&document).unwrap();

    assert_eq!(value["tree"]["children"][0]["name"], "f");
    assert_eq!(value["tree"]["children"][1]["children"][0]["name"], "g");
    assert_eq!(value["flat"], json!(["root/f.txt", "root/sub/g.md"]));
}

#[test]
fn test_flat_only_document_matches_nested_shape() {
    let document = to_json(&sample(), true).unwrap();
    let from_flat = from_json(&json!({ "flat": document.flat })).unwrap();
    assert!(from_flat.same_shape(&sample()));
}

#[test]
fn test_multiple_roots_use_virtual_root() {
    let tree = from_json(&json!(["alpha/a.txt", "beta/b.txt", "alpha/c.txt"])).unwrap();
    assert!(tree.is_virtual_root());
    assert_eq!(tree.children.len(), 2);
    assert_eq!(
        flatten(&tree),
        vec![
            "__virtual_root__/alpha/a.txt",
            "__virtual_root__/alpha/c.txt",
            "__virtual_root__/beta/b.txt",
        ]
    );
}

#[test]
fn test_legacy_document() {
    let tree = from_json(&json!({
        "name": "proj",
        "path": "D:\\proj",
        "type": "directory",
        "children": [
            { "name": "main.rs", "path": "D:\\proj\\main.rs", "type": "file", "size": 10 }
        ]
    }))
    .unwrap();

    assert_eq!(tree.path, "D:\\proj");
    assert_eq!(tree.children[0].size, Some(10));
    assert_eq!(flatten(&tree), vec!["proj/main.rs"]);
}

#[test]
fn test_unrecognized_documents_are_empty() {
    for data in [json!({}), json!(null), json!("text"), json!({ "other": 1 })] {
        let tree = from_json(&data).unwrap();
        assert_eq!(tree, TreeNode::empty());
    }
}
