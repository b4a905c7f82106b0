//! # treecopy
//!
//! Copy files and directory trees with bounded depth, optional flattening,
//! and pluggable conflict resolution.
//!
//! ## Core Features
//!
//! - **Depth bounds**: stop descending after `max_depth` directory levels
//! - **Flattening**: drop source nesting and gather every file under one root
//! - **Conflict policies**: overwrite, skip, or rename to a free `name_<n>.ext`
//! - **Kind safety**: never replaces a directory with a file or the reverse
//! - **Isolated failures**: a bad entry fails only its own branch
//! - **Outcome stream**: every action is reported as an [`Outcome`], traversal never prints
//! - **Atomic writes**: bytes go through a temp file and are renamed into place
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use treecopy::CopyBuilder;
//!
//! let report = CopyBuilder::new("src", "dst").run();
//! println!(
//!     "Copied {} files ({} bytes)",
//!     report.stats.files_copied, report.stats.bytes_copied
//! );
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use treecopy::{CopyOptions, OnConflict, copy_tree_with};
//! use std::path::Path;
//!
//! let options = CopyOptions::default()
//!     .with_max_depth(3)
//!     .with_flatten(true)
//!     .with_on_conflict(OnConflict::Rename);
//!
//! let stats = copy_tree_with(Path::new("src"), Path::new("dst"), &options, |outcome| {
//!     println!("{} {}", outcome.kind(), outcome.dst().display());
//! });
//! println!("{} failures", stats.failures);
//! ```
//!
//! ## Task Lists
//!
//! [`CopyTask`] bundles one or many sources with a destination and options;
//! [`run_tasks`] runs a list of them in order. With the `serde` feature,
//! tasks can be loaded from configuration via [`TaskConfig`].
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialize/Deserialize for options and `TaskConfig` |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod copy;
mod error;
mod options;
mod task;

#[cfg(feature = "serde")]
mod config;

pub use builder::CopyBuilder;
pub use copy::{
    CopyReport, CopyStats, Outcome, OutcomeKind, copy_file, copy_tree, copy_tree_with,
    unique_path,
};
pub use error::{Error, ErrorCode, Result, is_no_space_error};
pub use options::{CopyOptions, OnConflict};
pub use task::{CopyTask, Source, run_tasks};

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub use config::{TaskConfig, run_configs};
