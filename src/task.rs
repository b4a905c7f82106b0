//! Copy tasks and task-list orchestration.
//!
//! A [`CopyTask`] names one or more sources, a destination and the
//! [`CopyOptions`] to copy them with. [`run_tasks`] resolves every task into
//! root `(source, destination)` pairs and runs the tree copier on each pair,
//! one after another, streaming outcomes to a single sink.
//!
//! # Example
//!
//! ```no_run
//! use treecopy::{CopyOptions, CopyTask, run_tasks};
//!
//! let tasks = vec![
//!     CopyTask::new("assets", "dist/assets"),
//!     CopyTask::new(vec!["docs/guide", "docs/api"], "dist/docs")
//!         .with_options(CopyOptions::default().with_max_depth(3)),
//! ];
//!
//! let stats = run_tasks(&tasks, |outcome| println!("{:?}", outcome.kind()));
//! println!("{} files written", stats.files_written());
//! ```

use crate::copy::{CopyStats, Outcome, copy_tree_with};
use crate::options::CopyOptions;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// The source side of a task: one path or an ordered list of paths.
///
/// The shape matters: a single path is copied straight onto the task's
/// destination, while each path of a list gets its own sub-destination
/// (see [`CopyTask::roots`]).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Source {
    /// A single source path
    One(PathBuf),
    /// An ordered list of source paths
    Many(Vec<PathBuf>),
}

impl Source {
    /// Source paths in order.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            Self::One(path) => std::slice::from_ref(path),
            Self::Many(paths) => paths,
        }
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Self::One(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Self::One(path.to_path_buf())
    }
}

impl From<&str> for Source {
    fn from(path: &str) -> Self {
        Self::One(PathBuf::from(path))
    }
}

impl<P: Into<PathBuf>> From<Vec<P>> for Source {
    fn from(paths: Vec<P>) -> Self {
        Self::Many(paths.into_iter().map(Into::into).collect())
    }
}

/// One traversal request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyTask {
    /// What to copy
    pub source: Source,
    /// Where to copy it
    pub destination: PathBuf,
    /// How to copy it
    pub options: CopyOptions,
}

impl CopyTask {
    /// Create a task with default options.
    pub fn new<S: Into<Source>, P: AsRef<Path>>(source: S, destination: P) -> Self {
        Self {
            source: source.into(),
            destination: destination.as_ref().to_path_buf(),
            options: CopyOptions::default(),
        }
    }

    /// Replace the task's options.
    #[must_use]
    pub fn with_options(mut self, options: CopyOptions) -> Self {
        self.options = options;
        self
    }

    /// The `(source, destination)` pairs the tree copier is started on.
    ///
    /// - A single source maps onto the destination itself.
    /// - With a list of sources, each one maps to the destination joined
    ///   with the source's path relative to its own parent directory (its
    ///   last component). A source without a last component (`/`, `..`)
    ///   maps onto the destination itself.
    /// - With flattening, every source of a list maps onto the destination
    ///   root.
    ///
    /// Sources are not checked for overlap: two sources with the same last
    /// component (`a/report` and `b/report`) share a sub-destination.
    #[must_use]
    pub fn roots(&self) -> Vec<(PathBuf, PathBuf)> {
        match &self.source {
            Source::One(src) => vec![(src.clone(), self.destination.clone())],
            Source::Many(sources) => sources
                .iter()
                .map(|src| {
                    let dst = match src.file_name() {
                        Some(name) if !self.options.flatten => self.destination.join(name),
                        _ => self.destination.clone(),
                    };
                    (src.clone(), dst)
                })
                .collect(),
        }
    }

    /// Run this task, streaming outcomes to `sink`.
    pub fn run_with<F>(&self, mut sink: F) -> CopyStats
    where
        F: FnMut(Outcome),
    {
        let mut stats = CopyStats::default();
        for (src, dst) in self.roots() {
            tracing::debug!(src = %src.display(), dst = %dst.display(), "copying root");
            let root_stats = copy_tree_with(&src, &dst, &self.options, &mut sink);
            stats.merge(&root_stats);
        }
        stats
    }
}

/// Run `tasks` strictly in order, streaming every outcome to `sink`.
///
/// Failures inside a task never stop later roots or later tasks. The
/// returned statistics cover the whole list; returning is the completion
/// point of the run.
pub fn run_tasks<F>(tasks: &[CopyTask], mut sink: F) -> CopyStats
where
    F: FnMut(Outcome),
{
    let start_time = Instant::now();
    let mut stats = CopyStats::default();

    for (index, task) in tasks.iter().enumerate() {
        tracing::debug!(
            task = index,
            destination = %task.destination.display(),
            flatten = task.options.flatten,
            on_conflict = %task.options.on_conflict,
            "running task"
        );
        stats.merge(&task.run_with(&mut sink));
    }

    stats.duration = start_time.elapsed();
    tracing::debug!(
        tasks = tasks.len(),
        files = stats.files_written(),
        failures = stats.failures,
        "all tasks finished"
    );
    stats
}
