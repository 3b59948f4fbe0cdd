//! Merge layer: defaults applied before any source.

pub mod merge_policy;
