//! Configuration options for tree copies.
//!
//! This module provides [`CopyOptions`] for configuring traversal bounds,
//! flattening and durability, and [`OnConflict`] for choosing what happens
//! when a destination file already exists.
//!
//! # Example
//!
//! ```
//! use treecopy::{CopyOptions, OnConflict};
//!
//! let options = CopyOptions::default()
//!     .with_max_depth(2)
//!     .with_flatten(true)
//!     .with_on_conflict(OnConflict::Rename);
//! ```

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Behavior when a destination file already exists.
///
/// # Default
///
/// The default is [`OnConflict::Overwrite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OnConflict {
    /// Replace the destination's bytes with the source's bytes.
    #[default]
    Overwrite,
    /// Leave the destination untouched and move on.
    Skip,
    /// Copy next to the destination under a free `name_<n>.ext` path.
    ///
    /// See [`unique_path`](crate::unique_path).
    Rename,
}

impl OnConflict {
    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Skip => "skip",
            Self::Rename => "rename",
        }
    }
}

impl fmt::Display for OnConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnConflict {
    type Err = Error;

    /// Parse a policy name (case-insensitive).
    ///
    /// Anything outside `overwrite`, `skip` and `rename` is a configuration
    /// defect and yields [`Error::UnknownPolicy`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "skip" => Ok(Self::Skip),
            "rename" => Ok(Self::Rename),
            _ => Err(Error::UnknownPolicy(s.to_owned())),
        }
    }
}

/// Options for a tree copy.
///
/// Use [`Default::default()`] to get the defaults, then customize using the
/// builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `max_depth` | 0 | Unbounded |
/// | `max_height` | 0 | Unbounded |
/// | `flatten` | `false` | Mirror the source structure |
/// | `on_conflict` | `Overwrite` | Replace existing files |
/// | `fsync` | `true` | Sync to disk before the final rename |
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CopyOptions {
    /// Number of directory levels entered below a root (0 = unbounded)
    ///
    /// A directory reached at depth `d` is only listed when `d < max_depth`.
    pub max_depth: usize,

    /// Height bound (0 = unbounded)
    ///
    /// Checked against the same per-branch depth counter as `max_depth`,
    /// so the smaller non-zero of the two is the effective bound.
    pub max_height: usize,

    /// Discard source nesting and place every file directly under the
    /// destination root
    pub flatten: bool,

    /// Behavior when a destination file already exists
    pub on_conflict: OnConflict,

    /// Whether to sync file data to disk before it becomes visible (default: true)
    pub fsync: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            max_depth: 0,
            max_height: 0,
            flatten: false,
            on_conflict: OnConflict::Overwrite,
            fsync: true,
        }
    }
}

impl CopyOptions {
    /// Set the maximum depth (0 = unbounded)
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the maximum height (0 = unbounded)
    #[must_use]
    pub fn with_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Enable or disable flattening
    #[must_use]
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    /// Set the conflict behavior
    #[must_use]
    pub fn with_on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = on_conflict;
        self
    }

    /// Disable fsync for faster (but less durable) copies
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    /// Whether a directory at `depth` may still be listed.
    pub(crate) fn may_descend(&self, depth: usize) -> bool {
        let within = |bound: usize| bound == 0 || depth < bound;
        within(self.max_depth) && within(self.max_height)
    }
}
