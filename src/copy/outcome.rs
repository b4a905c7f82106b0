//! Per-entry results of a tree copy and their aggregation.

use crate::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Result of one traversal action.
///
/// The tree copier produces one of these for every file it handles and
/// every directory it materializes. Traversal never prints; callers decide
/// how outcomes are presented.
#[derive(Debug)]
#[non_exhaustive]
pub enum Outcome {
    /// File copied to a previously free destination
    Copied {
        /// Source file
        src: PathBuf,
        /// Destination file
        dst: PathBuf,
        /// Number of bytes written
        bytes: u64,
    },
    /// Existing destination file replaced
    Overwritten {
        /// Source file
        src: PathBuf,
        /// Destination file
        dst: PathBuf,
        /// Number of bytes written
        bytes: u64,
    },
    /// Existing destination file left untouched
    Skipped {
        /// Source file
        src: PathBuf,
        /// Destination file that already existed
        dst: PathBuf,
    },
    /// Destination existed, file written under a free name instead
    Renamed {
        /// Source file
        src: PathBuf,
        /// Destination that was occupied
        original: PathBuf,
        /// Path actually written
        renamed: PathBuf,
        /// Number of bytes written
        bytes: u64,
    },
    /// Destination directory created
    DirectoryCreated {
        /// Source directory
        src: PathBuf,
        /// Created directory
        dst: PathBuf,
    },
    /// The branch rooted at `src` failed and was abandoned
    Failed {
        /// Source entry the failure is attributed to
        src: PathBuf,
        /// Destination being written when the failure happened
        dst: PathBuf,
        /// What went wrong
        error: Error,
    },
}

/// Fieldless discriminant of [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    /// See [`Outcome::Copied`]
    Copied,
    /// See [`Outcome::Overwritten`]
    Overwritten,
    /// See [`Outcome::Skipped`]
    Skipped,
    /// See [`Outcome::Renamed`]
    Renamed,
    /// See [`Outcome::DirectoryCreated`]
    DirectoryCreated,
    /// See [`Outcome::Failed`]
    Failed,
}

impl OutcomeKind {
    /// Lowercase name, stable for machine-readable output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Copied => "copied",
            Self::Overwritten => "overwritten",
            Self::Skipped => "skipped",
            Self::Renamed => "renamed",
            Self::DirectoryCreated => "directory_created",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Outcome {
    pub(crate) fn failed(src: &Path, dst: &Path, error: Error) -> Self {
        Self::Failed {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
            error,
        }
    }

    /// Which kind of action this was.
    #[must_use]
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Copied { .. } => OutcomeKind::Copied,
            Self::Overwritten { .. } => OutcomeKind::Overwritten,
            Self::Skipped { .. } => OutcomeKind::Skipped,
            Self::Renamed { .. } => OutcomeKind::Renamed,
            Self::DirectoryCreated { .. } => OutcomeKind::DirectoryCreated,
            Self::Failed { .. } => OutcomeKind::Failed,
        }
    }

    /// Source path this outcome is attributed to.
    #[must_use]
    pub fn src(&self) -> &Path {
        match self {
            Self::Copied { src, .. }
            | Self::Overwritten { src, .. }
            | Self::Skipped { src, .. }
            | Self::Renamed { src, .. }
            | Self::DirectoryCreated { src, .. }
            | Self::Failed { src, .. } => src,
        }
    }

    /// Final destination path (the renamed path for [`Outcome::Renamed`]).
    #[must_use]
    pub fn dst(&self) -> &Path {
        match self {
            Self::Copied { dst, .. }
            | Self::Overwritten { dst, .. }
            | Self::Skipped { dst, .. }
            | Self::DirectoryCreated { dst, .. }
            | Self::Failed { dst, .. } => dst,
            Self::Renamed { renamed, .. } => renamed,
        }
    }

    /// Bytes written by this action.
    #[must_use]
    pub fn bytes(&self) -> u64 {
        match self {
            Self::Copied { bytes, .. }
            | Self::Overwritten { bytes, .. }
            | Self::Renamed { bytes, .. } => *bytes,
            _ => 0,
        }
    }

    /// The error, if this outcome is a failure.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Whether this outcome reports a failed branch.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Statistics from one or more tree copies.
///
/// Built by feeding every [`Outcome`] through [`CopyStats::record`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Files copied to a free destination
    pub files_copied: u64,
    /// Files that replaced an existing destination
    pub files_overwritten: u64,
    /// Files written under a generated name
    pub files_renamed: u64,
    /// Files left alone because the destination existed
    pub files_skipped: u64,
    /// Directories created
    pub dirs_created: u64,
    /// Failed branches
    pub failures: u64,
    /// Total bytes written
    pub bytes_copied: u64,
    /// Duration of the copy operation
    pub duration: Duration,
}

impl CopyStats {
    /// Account for one outcome.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome.kind() {
            OutcomeKind::Copied => self.files_copied += 1,
            OutcomeKind::Overwritten => self.files_overwritten += 1,
            OutcomeKind::Renamed => self.files_renamed += 1,
            OutcomeKind::Skipped => self.files_skipped += 1,
            OutcomeKind::DirectoryCreated => self.dirs_created += 1,
            OutcomeKind::Failed => self.failures += 1,
        }
        self.bytes_copied += outcome.bytes();
    }

    /// Add another set of statistics into this one (durations are summed).
    pub fn merge(&mut self, other: &CopyStats) {
        self.files_copied += other.files_copied;
        self.files_overwritten += other.files_overwritten;
        self.files_renamed += other.files_renamed;
        self.files_skipped += other.files_skipped;
        self.dirs_created += other.dirs_created;
        self.failures += other.failures;
        self.bytes_copied += other.bytes_copied;
        self.duration += other.duration;
    }

    /// Files whose bytes were written (copied, overwritten or renamed).
    #[must_use]
    pub fn files_written(&self) -> u64 {
        self.files_copied + self.files_overwritten + self.files_renamed
    }
}

/// Everything a collecting tree copy produced.
///
/// Returned by [`copy_tree`](crate::copy_tree).
#[derive(Debug, Default)]
pub struct CopyReport {
    /// Outcomes in the order they happened
    pub outcomes: Vec<Outcome>,
    /// Aggregated statistics
    pub stats: CopyStats,
}

impl CopyReport {
    /// Outcomes that report failures.
    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    /// Whether every branch completed without failure.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.stats.failures == 0
    }
}
