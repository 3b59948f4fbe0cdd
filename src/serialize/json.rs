//! JSON serializer and deserializer
//!
//! Export produces the combined document:
//!
//! ```json
//! { "tree": { "name": "root", "type": "directory", "children": [ ... ] },
//!   "flat": [ "root/f.txt", "root/sub/g.md" ] }
//! ```
//!
//! Nested nodes never carry `path` or `size`, and `children` is omitted when empty.
//! Import accepts the combined document, a bare flat list, and the legacy single-node
//! layout (`name`/`path`/`type`/`children`).

use crate::error::SerializationError;
use crate::tree::path::{join_virtual, split_flat_path, strip_extension};
use crate::tree::TreeNode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

/// Node kinds admitted by the export schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
    Archive,
}

impl NodeKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "directory" => Some(NodeKind::Directory),
            "file" => Some(NodeKind::File),
            "archive" => Some(NodeKind::Archive),
            _ => None,
        }
    }

    /// Directories and archives may hold children.
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Directory | NodeKind::Archive)
    }
}

/// One node of the exported nested tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ExportNode>>,
}

/// The combined export document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub tree: ExportNode,
    pub flat: Vec<String>,
}

/// Convert a tree to the nested export shape.
///
/// With `keep_extensions = false`, file names lose their extension. Directory names are
/// never touched.
pub fn to_export_tree(node: &TreeNode, keep_extensions: bool) -> ExportNode {
    let name = if !keep_extensions && !node.is_dir {
        strip_extension(&node.name).to_string()
    } else {
        node.name.clone()
    };

    let children = if node.children.is_empty() {
        None
    } else {
        Some(
            node.children
                .iter()
                .map(|c| to_export_tree(c, keep_extensions))
                .collect(),
        )
    };

    ExportNode {
        name,
        kind: if node.is_dir {
            NodeKind::Directory
        } else {
            NodeKind::File
        },
        children,
    }
}

/// Every file path, `/`-joined from the top-level node's own name, depth-first.
///
/// Directories never appear. Names are always the real names, whatever extension
/// policy the nested tree used.
pub fn flatten(node: &TreeNode) -> Vec<String> {
    let mut out = Vec::new();
    flatten_into(node, "", &mut out);
    out
}

fn flatten_into(node: &TreeNode, prefix: &str, out: &mut Vec<String>) {
    let current = join_virtual(prefix, &node.name);
    if node.is_dir {
        for child in &node.children {
            flatten_into(child, &current, out);
        }
    } else {
        out.push(current);
    }
}

/// Build the combined export document.
///
/// The nested tree is checked against the export schema; a mismatch is logged and the
/// document is returned unchanged.
#[instrument(skip(node), fields(root = %node.name))]
pub fn to_json(node: &TreeNode, keep_extensions: bool) -> Result<ExportDocument, SerializationError> {
    let document = ExportDocument {
        tree: to_export_tree(node, keep_extensions),
        flat: flatten(node),
    };

    let tree_value = serde_json::to_value(&document.tree)?;
    if let Err(violations) = validate_export_tree(&tree_value) {
        debug!(
            ?violations,
            "Export tree did not validate against the export schema"
        );
    }

    Ok(document)
}

/// Check a nested tree value against the export schema.
///
/// Returns every violation found, each prefixed with the `/`-joined location.
pub fn validate_export_tree(value: &Value) -> Result<(), Vec<String>> {
    let mut violations = Vec::new();
    validate_node(value, "", true, &mut violations);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn validate_node(value: &Value, location: &str, is_root: bool, violations: &mut Vec<String>) {
    let Some(map) = value.as_object() else {
        violations.push(format!("{}: node is not an object", display_location(location)));
        return;
    };

    for key in map.keys() {
        if !matches!(key.as_str(), "name" | "type" | "children") {
            violations.push(format!(
                "{}: unexpected key '{}'",
                display_location(location),
                key
            ));
        }
    }

    let name = match map.get("name") {
        Some(Value::String(name)) => name.as_str(),
        _ => {
            violations.push(format!("{}: missing string 'name'", display_location(location)));
            ""
        }
    };
    if name.is_empty() && !is_root {
        violations.push(format!("{}: empty name", display_location(location)));
    }
    let here = join_virtual(location, name);

    let kind = match map.get("type").and_then(Value::as_str).and_then(NodeKind::parse) {
        Some(kind) => Some(kind),
        None => {
            violations.push(format!("{}: missing or unknown 'type'", here));
            None
        }
    };

    let Some(children) = map.get("children") else {
        return;
    };
    let Some(children) = children.as_array() else {
        violations.push(format!("{}: 'children' is not a list", here));
        return;
    };
    if children.is_empty() {
        violations.push(format!("{}: 'children' must be omitted when empty", here));
    }
    if kind == Some(NodeKind::File) {
        violations.push(format!("{}: file node has children", here));
    }
    for child in children {
        validate_node(child, &here, false, violations);
    }
}

fn display_location(location: &str) -> &str {
    if location.is_empty() {
        "<root>"
    } else {
        location
    }
}

/// Keys that mark an object as a legacy single-node document.
const LEGACY_KEYS: [&str; 4] = ["name", "path", "type", "children"];

/// Recognized top-level JSON shapes.
#[derive(Debug, Clone, Copy)]
pub enum JsonShape<'a> {
    /// Object carrying `tree` and/or `flat`
    Combined {
        tree: Option<&'a Value>,
        flat: Option<&'a Value>,
    },
    /// Bare list of path strings
    FlatList(&'a [Value]),
    /// Legacy object with `name`/`path`/`type`/`children`
    Legacy(&'a Value),
    /// Anything else, including `{}`
    Unrecognized,
}

/// Classify a parsed document.
pub fn classify(data: &Value) -> JsonShape<'_> {
    match data {
        Value::Object(map) if map.contains_key("tree") || map.contains_key("flat") => {
            JsonShape::Combined {
                tree: map.get("tree"),
                flat: map.get("flat"),
            }
        }
        Value::Array(items) => JsonShape::FlatList(items),
        Value::Object(map) if LEGACY_KEYS.iter().any(|k| map.contains_key(*k)) => {
            JsonShape::Legacy(data)
        }
        _ => JsonShape::Unrecognized,
    }
}

/// Decode any accepted JSON shape into a tree.
///
/// Precedence: combined document (`tree` before `flat`), bare flat list, legacy node,
/// then the synthetic `"empty"` directory.
pub fn from_json(data: &Value) -> Result<TreeNode, SerializationError> {
    match classify(data) {
        JsonShape::Combined {
            tree: Some(tree), ..
        } => from_nested(tree),
        JsonShape::Combined { flat, .. } => {
            let entries = flat_entries(flat.unwrap_or(&Value::Null))?;
            Ok(from_flat_list(&entries))
        }
        JsonShape::FlatList(items) => {
            let entries = string_entries(items)?;
            Ok(from_flat_list(&entries))
        }
        JsonShape::Legacy(map) => from_legacy(map),
        JsonShape::Unrecognized => {
            debug!("Unrecognized JSON document, returning empty tree");
            Ok(TreeNode::empty())
        }
    }
}

/// Decode a nested export tree. Missing names are empty and missing types mean `file`.
pub fn from_nested(tree: &Value) -> Result<TreeNode, SerializationError> {
    let nested = NestedNode::deserialize(tree)
        .map_err(|e| SerializationError::Malformed(format!("invalid tree node: {}", e)))?;
    Ok(nested.into_tree(""))
}

/// Decode a legacy single-node document. Every node keeps its own `path`.
pub fn from_legacy(node: &Value) -> Result<TreeNode, SerializationError> {
    Ok(decode_legacy(node)?.into_tree())
}

/// Decode a legacy node as written, without filling in missing paths.
pub fn decode_legacy(node: &Value) -> Result<LegacyNode, SerializationError> {
    LegacyNode::deserialize(node)
        .map_err(|e| SerializationError::Malformed(format!("invalid legacy node: {}", e)))
}

/// Parse JSON text and decode it with [`from_json`].
pub fn from_json_str(text: &str) -> Result<TreeNode, SerializationError> {
    let value: Value = serde_json::from_str(text)?;
    from_json(&value)
}

/// Read the `flat` member of a combined document. `null` counts as empty.
pub fn flat_entries(flat: &Value) -> Result<Vec<&str>, SerializationError> {
    match flat {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => string_entries(items),
        _ => Err(SerializationError::Malformed(
            "'flat' must be a list of paths".to_string(),
        )),
    }
}

fn string_entries(items: &[Value]) -> Result<Vec<&str>, SerializationError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().ok_or_else(|| {
                SerializationError::Malformed(format!("flat entry {} is not a string", i))
            })
        })
        .collect()
}

/// Rebuild a tree from file paths.
///
/// The first path's first segment names the root. The first time a path starts with a
/// different segment, the root is reparented under a synthetic `"__virtual_root__"`;
/// from then on every path is inserted beneath that virtual root with all of its
/// segments. Missing intermediate directories are created and matched by exact name.
pub fn from_flat_list<S: AsRef<str>>(paths: &[S]) -> TreeNode {
    let mut root: Option<TreeNode> = None;
    let mut virtualized = false;

    for raw in paths {
        let segments = split_flat_path(raw.as_ref());
        let Some((&first, rest)) = segments.split_first() else {
            continue;
        };

        let root = root.get_or_insert_with(|| TreeNode::directory(first, first));
        let remaining: &[&str] = if virtualized {
            &segments
        } else if root.name == first {
            rest
        } else {
            let previous = std::mem::replace(root, TreeNode::virtual_root());
            root.add_child(previous);
            virtualized = true;
            debug!(first_segment = first, "Flat list has several roots, using a virtual root");
            &segments
        };

        insert_path(root, remaining);
    }

    root.unwrap_or_else(TreeNode::empty)
}

fn insert_path(root: &mut TreeNode, segments: &[&str]) {
    let mut cursor = root;
    for (i, segment) in segments.iter().enumerate() {
        let is_last = i + 1 == segments.len();
        let idx = match cursor.children.iter().position(|c| c.name == *segment) {
            Some(idx) => {
                if !is_last && !cursor.children[idx].is_dir {
                    cursor.children[idx].promote_to_directory();
                }
                idx
            }
            None => {
                let path = join_virtual(&cursor.path, segment);
                let child = if is_last {
                    TreeNode::file(*segment, path, None)
                } else {
                    TreeNode::directory(*segment, path)
                };
                cursor.add_child(child);
                cursor.children.len() - 1
            }
        };
        cursor = &mut cursor.children[idx];
    }
}

/// Lenient view of a nested export node: missing name is empty, missing type is a file.
#[derive(Debug, Deserialize)]
struct NestedNode {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    children: Option<Vec<NestedNode>>,
}

impl NestedNode {
    fn into_tree(self, parent_path: &str) -> TreeNode {
        let name = self.name.unwrap_or_default();
        let path = join_virtual(parent_path, &name);
        let is_dir = self
            .kind
            .as_deref()
            .and_then(NodeKind::parse)
            .map(NodeKind::is_container)
            .unwrap_or(false);

        let children = self.children.unwrap_or_default();
        if !is_dir {
            if !children.is_empty() {
                debug!(path = %path, "Dropping children of a file node");
            }
            return TreeNode::file(name, path, None);
        }

        let mut node = TreeNode::directory(name, path);
        for child in children {
            let child = child.into_tree(&node.path);
            node.add_child(child);
        }
        node
    }
}

/// Lenient view of a legacy node. Without `type`, a node with children is a directory.
#[derive(Debug, Deserialize)]
pub struct LegacyNode {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    children: Option<Vec<LegacyNode>>,
}

impl LegacyNode {
    /// The node's own `path`, if present and non-empty.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }

    pub fn is_dir(&self) -> bool {
        match self.kind.as_deref() {
            Some(kind) if !kind.is_empty() => NodeKind::parse(kind)
                .map(NodeKind::is_container)
                .unwrap_or(false),
            _ => !self.children().is_empty(),
        }
    }

    pub fn children(&self) -> &[LegacyNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    fn into_tree(self) -> TreeNode {
        let is_dir = self.is_dir();
        let name = self.name.unwrap_or_default();
        let path = self.path.unwrap_or_else(|| name.clone());
        let children = self.children.unwrap_or_default();

        if !is_dir {
            if !children.is_empty() {
                debug!(path = %path, "Dropping children of a legacy file node");
            }
            return TreeNode::file(name, path, self.size);
        }

        let mut node = TreeNode::directory(name, path);
        for child in children {
            node.add_child(child.into_tree());
        }
        node
    }
}
