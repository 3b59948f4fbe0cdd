//! Filesystem-like tree
//!
//! The in-memory hierarchy every scanner produces and every serializer and the
//! reconstructor consume.

pub mod node;
pub mod path;

pub use node::{TreeNode, EMPTY_ROOT_NAME, VIRTUAL_ROOT_NAME};
