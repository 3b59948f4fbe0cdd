//! TreeMark: folder structures as portable trees
//!
//! Scans a directory or zip archive into a [`tree::TreeNode`], serializes it as a combined
//! JSON document (nested tree plus flat file list) or an indented Markdown bullet list,
//! reads both back (including legacy layouts), and recreates empty skeletons on disk.

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod generate;
pub mod logging;
pub mod recreate;
pub mod repository;
pub mod scan;
pub mod serialize;
pub mod timing;
pub mod tree;
