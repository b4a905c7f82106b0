//! Builder API for ergonomic tree copies.
//!
//! The builder pattern provides a fluent interface for configuring and
//! running a single tree copy. This is often more convenient than manually
//! constructing [`CopyOptions`].
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use treecopy::CopyBuilder;
//!
//! let report = CopyBuilder::new("src", "dst").run();
//! println!("Copied {} files", report.stats.files_copied);
//! ```
//!
//! ## Flatten With Renaming
//!
//! ```no_run
//! use treecopy::CopyBuilder;
//!
//! // Gather every file two levels deep into one folder, never clobbering
//! let report = CopyBuilder::new("photos", "inbox")
//!     .flatten()
//!     .max_depth(2)
//!     .rename_on_conflict()
//!     .run();
//!
//! for failure in report.failures() {
//!     eprintln!("{}: {:?}", failure.src().display(), failure.error());
//! }
//! ```

use crate::copy::{CopyReport, CopyStats, Outcome, copy_tree, copy_tree_with};
use crate::options::{CopyOptions, OnConflict};
use std::path::{Path, PathBuf};

/// A builder for configuring and running a tree copy.
///
/// # Example
///
/// ```no_run
/// use treecopy::CopyBuilder;
///
/// let stats = CopyBuilder::new("/data/project", "/backup/project")
///     .skip_existing()
///     .run_with(|outcome| println!("{} {}", outcome.kind(), outcome.dst().display()));
/// println!("{} skipped", stats.files_skipped);
/// ```
#[derive(Debug, Clone)]
pub struct CopyBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: CopyOptions,
}

impl CopyBuilder {
    /// Create a new `CopyBuilder` with the given source and destination paths.
    ///
    /// Uses default options (unbounded, mirrored, overwrite existing).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: CopyOptions::default(),
        }
    }

    /// Limit how many directory levels are entered (0 = unbounded).
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options = self.options.with_max_depth(depth);
        self
    }

    /// Height bound (0 = unbounded), checked against the depth counter.
    #[must_use]
    pub fn max_height(mut self, height: usize) -> Self {
        self.options = self.options.with_max_height(height);
        self
    }

    /// Put every file directly under the destination root.
    #[must_use]
    pub fn flatten(mut self) -> Self {
        self.options = self.options.with_flatten(true);
        self
    }

    /// Replace existing destination files (default behavior).
    #[must_use]
    pub fn overwrite(mut self) -> Self {
        self.options = self.options.with_on_conflict(OnConflict::Overwrite);
        self
    }

    /// Leave existing destination files untouched.
    #[must_use]
    pub fn skip_existing(mut self) -> Self {
        self.options = self.options.with_on_conflict(OnConflict::Skip);
        self
    }

    /// Write next to existing destination files under `name_<n>.ext`.
    #[must_use]
    pub fn rename_on_conflict(mut self) -> Self {
        self.options = self.options.with_on_conflict(OnConflict::Rename);
        self
    }

    /// Set the conflict policy.
    #[must_use]
    pub fn on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.options = self.options.with_on_conflict(on_conflict);
        self
    }

    /// Disable fsync after writing files.
    ///
    /// This improves performance but reduces durability guarantees.
    #[must_use]
    pub fn no_fsync(mut self) -> Self {
        self.options = self.options.without_fsync();
        self
    }

    /// Get a reference to the current options.
    #[must_use]
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Run the copy and collect every outcome.
    #[must_use = "the report carries per-entry failures"]
    pub fn run(self) -> CopyReport {
        copy_tree(&self.src, &self.dst, &self.options)
    }

    /// Run the copy, streaming each outcome to `sink`.
    pub fn run_with<F>(self, sink: F) -> CopyStats
    where
        F: FnMut(Outcome),
    {
        copy_tree_with(&self.src, &self.dst, &self.options, sink)
    }
}
