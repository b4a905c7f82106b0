//! Task-list configuration (requires `serde` feature).
//!
//! [`TaskConfig`] is the serialized form of a [`CopyTask`]: everything but
//! the source and destination is optional and falls back to the
//! [`CopyOptions`] defaults. Both `snake_case` and `camelCase` field names
//! are accepted.
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use treecopy::TaskConfig;
//!
//! let configs: Vec<TaskConfig> = serde_json::from_str(r#"[
//!     { "src": "assets", "dest": "dist/assets" },
//!     { "src": ["a", "b"], "dest": "flat", "flatten": true, "onConflict": "rename" }
//! ]"#)?;
//! let task = configs[1].clone().into_task()?;
//! assert!(task.options.flatten);
//! # Ok(())
//! # }
//! ```

use crate::copy::{CopyStats, Outcome};
use crate::error::Result;
use crate::options::{CopyOptions, OnConflict};
use crate::task::{CopyTask, Source};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

fn default_fsync() -> bool {
    true
}

/// One entry of a task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    /// One source path or a list of them
    #[serde(alias = "source")]
    pub src: Source,

    /// Destination path
    #[serde(alias = "destination")]
    pub dest: PathBuf,

    /// Depth bound (0 = unbounded)
    #[serde(default, alias = "maxDepth")]
    pub max_depth: usize,

    /// Height bound (0 = unbounded)
    #[serde(default, alias = "maxHeight")]
    pub max_height: usize,

    /// Flatten into the destination root
    #[serde(default)]
    pub flatten: bool,

    /// Conflict policy name; `overwrite` when absent
    #[serde(
        default,
        alias = "onConflict",
        alias = "conflict_policy",
        alias = "conflictPolicy"
    )]
    pub on_conflict: Option<String>,

    /// Sync written files to disk
    #[serde(default = "default_fsync")]
    pub fsync: bool,
}

impl TaskConfig {
    /// Validate the entry and turn it into a runnable task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPolicy`](crate::Error::UnknownPolicy) when
    /// `on_conflict` names no known policy.
    pub fn into_task(self) -> Result<CopyTask> {
        let on_conflict = match self.on_conflict.as_deref() {
            Some(name) => name.parse::<OnConflict>()?,
            None => OnConflict::default(),
        };

        let mut options = CopyOptions::default()
            .with_max_depth(self.max_depth)
            .with_max_height(self.max_height)
            .with_flatten(self.flatten)
            .with_on_conflict(on_conflict);
        if !self.fsync {
            options = options.without_fsync();
        }

        Ok(CopyTask::new(self.src, &self.dest).with_options(options))
    }
}

/// Run configured tasks in order, streaming every outcome to `sink`.
///
/// An entry that fails validation produces one [`Outcome::Failed`],
/// attributed to its first source, and the run moves on to the next entry.
pub fn run_configs<F>(configs: Vec<TaskConfig>, mut sink: F) -> CopyStats
where
    F: FnMut(Outcome),
{
    let start_time = Instant::now();
    let mut stats = CopyStats::default();

    for config in configs {
        let src = config.src.paths().first().cloned().unwrap_or_default();
        let dest = config.dest.clone();

        match config.into_task() {
            Ok(task) => stats.merge(&task.run_with(&mut sink)),
            Err(error) => {
                tracing::warn!(src = %src.display(), code = %error.code(), "{error}");
                let outcome = Outcome::failed(&src, &dest, error);
                stats.record(&outcome);
                sink(outcome);
            }
        }
    }

    stats.duration = start_time.elapsed();
    stats
}
