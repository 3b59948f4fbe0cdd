//! Property-based tests for serializer round trips

use proptest::prelude::*;
use proptest::test_runner::TestRunner;
use treemark::serialize::{flatten, from_flat_list, from_json_str, parse_markdown, to_json, to_markdown};
use treemark::tree::TreeNode;

/// Tree shape without names. Names are assigned by position so siblings stay unique.
#[derive(Debug, Clone)]
enum Shape {
    File,
    Dir(Vec<Shape>),
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![Just(Shape::File), Just(Shape::Dir(Vec::new()))];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(Shape::Dir)
    })
}

fn root_strategy() -> impl Strategy<Value = TreeNode> {
    prop::collection::vec(shape_strategy(), 0..6).prop_map(|children| {
        let mut root = TreeNode::directory("root", "root");
        for (index, child) in children.iter().enumerate() {
            root.add_child(build(child, index, "root"));
        }
        root
    })
}

fn build(shape: &Shape, index: usize, parent: &str) -> TreeNode {
    match shape {
        Shape::File => {
            let name = format!("file{}.txt", index);
            let path = format!("{}/{}", parent, name);
            TreeNode::file(name, path, None)
        }
        Shape::Dir(children) => {
            let name = format!("dir {}", index);
            let path = format!("{}/{}", parent, name);
            let mut node = TreeNode::directory(name, path.clone());
            for (i, child) in children.iter().enumerate() {
                node.add_child(build(child, i, &path));
            }
            node
        }
    }
}

#[test]
fn test_markdown_roundtrip_preserves_shape() {
    let mut runner = TestRunner::default();

    runner
        .run(&root_strategy(), |tree| {
            let text = to_markdown(&tree, true);
            let parsed = parse_markdown(&text).unwrap();
            prop_assert!(parsed.same_shape(&tree), "markdown:\n{}", text);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_json_roundtrip_preserves_shape() {
    let mut runner = TestRunner::default();

    runner
        .run(&root_strategy(), |tree| {
            let document = to_json(&tree, true).unwrap();
            let text = serde_json::to_string(&document).unwrap();
            let parsed = from_json_str(&text).unwrap();
            prop_assert!(parsed.same_shape(&tree));
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_flat_list_rebuild_is_stable() {
    let mut runner = TestRunner::default();

    runner
        .run(&root_strategy(), |tree| {
            let flat = flatten(&tree);
            let rebuilt = from_flat_list(&flat);
            prop_assert_eq!(flatten(&rebuilt), flat);
            Ok(())
        })
        .unwrap();
}
