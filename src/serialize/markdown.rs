//! Markdown serializer and parser
//!
//! One bullet per node, two spaces of indentation per depth level, and a trailing `/`
//! on directories:
//!
//! ```text
//! - root/
//!   - a.txt
//!   - sub/
//!     - b.txt
//! ```

use crate::error::SerializationError;
use crate::tree::path::{join_virtual, strip_extension};
use crate::tree::TreeNode;
use tracing::{debug, instrument};

const INDENT: &str = "  ";

/// Render a tree as an indented bullet list. Lines are joined with `\n`.
pub fn to_markdown(node: &TreeNode, keep_extensions: bool) -> String {
    let mut lines = Vec::new();
    render(node, 0, keep_extensions, &mut lines);
    lines.join("\n")
}

fn render(node: &TreeNode, depth: usize, keep_extensions: bool, lines: &mut Vec<String>) {
    let display = if node.is_dir {
        format!("{}/", node.name)
    } else if keep_extensions {
        node.name.clone()
    } else {
        strip_extension(&node.name).to_string()
    };
    lines.push(format!("{}- {}", INDENT.repeat(depth), display));

    for child in &node.children {
        render(child, depth + 1, keep_extensions, lines);
    }
}

/// One non-blank line of a bullet list.
#[derive(Debug, PartialEq, Eq)]
struct Entry<'a> {
    depth: usize,
    name: &'a str,
    is_dir: bool,
}

fn parse_line(line: &str) -> Entry<'_> {
    let spaces = line.len() - line.trim_start_matches(' ').len();
    let content = line.trim();
    let content = ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| content.strip_prefix(marker))
        .or_else(|| content.strip_prefix('-'))
        .unwrap_or(content)
        .trim();

    Entry {
        depth: spaces / 2,
        name: content.trim_end_matches('/').trim(),
        is_dir: content.ends_with('/'),
    }
}

/// Parse an indented bullet list back into a tree.
///
/// Blank lines are ignored. The parent of each entry is the nearest preceding entry with
/// a smaller depth; depth gaps are accepted. The first entry is the root at depth 0
/// whatever its indentation, so any later entry at depth 0 is a second top-level entry
/// and an error. Empty input yields the `"empty"` directory.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn parse_markdown(text: &str) -> Result<TreeNode, SerializationError> {
    // (depth, node) pairs; a node is attached to its parent when popped.
    let mut stack: Vec<(usize, TreeNode)> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let entry = parse_line(line);

        while stack.last().map(|(d, _)| *d >= entry.depth).unwrap_or(false) {
            if stack.len() == 1 {
                return Err(SerializationError::Markdown {
                    line: idx + 1,
                    message: format!("'{}' is a second top-level entry", entry.name),
                });
            }
            pop_into_parent(&mut stack);
        }

        let (depth, path) = match stack.last() {
            Some((_, parent)) => (entry.depth, join_virtual(&parent.path, entry.name)),
            None => (0, entry.name.to_string()),
        };
        let node = if entry.is_dir {
            TreeNode::directory(entry.name, path)
        } else {
            TreeNode::file(entry.name, path, None)
        };
        stack.push((depth, node));
    }

    while stack.len() > 1 {
        pop_into_parent(&mut stack);
    }

    match stack.pop() {
        Some((_, root)) => Ok(root),
        None => {
            debug!("Markdown document has no entries, returning empty tree");
            Ok(TreeNode::empty())
        }
    }
}

/// Pop the top entry and attach it to the entry below. Callers keep at least two
/// entries on the stack.
fn pop_into_parent(stack: &mut Vec<(usize, TreeNode)>) {
    let Some((_, node)) = stack.pop() else {
        return;
    };
    if let Some((_, parent)) = stack.last_mut() {
        if !parent.is_dir {
            debug!(path = %parent.path, "Entry without trailing '/' has children, treating it as a directory");
        }
        parent.add_child(node);
    }
}
