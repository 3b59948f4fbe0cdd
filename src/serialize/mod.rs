//! Serializers
//!
//! Two interchangeable representations of a [`crate::tree::TreeNode`]: the combined
//! JSON document (nested tree plus flat file list) and an indented Markdown bullet list.

pub mod json;
pub mod markdown;

pub use json::{
    classify, flatten, from_flat_list, from_json, from_json_str, to_export_tree, to_json,
    ExportDocument, ExportNode, JsonShape, NodeKind,
};
pub use markdown::{parse_markdown, to_markdown};
