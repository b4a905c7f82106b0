//! Core copy operations.
//!
//! This module provides the recursive tree copier, single-file placement
//! under a conflict policy, and the free-name resolver used by the rename
//! policy.

mod file;
mod outcome;
mod tree;
mod unique;
mod utils;

// Re-export public API
pub use file::copy_file;
pub use outcome::{CopyReport, CopyStats, Outcome, OutcomeKind};
pub use tree::{copy_tree, copy_tree_with};
pub use unique::unique_path;
