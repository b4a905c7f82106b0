//! Error types for treecopy.
//!
//! This module provides the [`Error`] enum containing every failure a copy
//! branch can report, the [`Result`] type alias, and [`ErrorCode`] for
//! stable machine-readable classification.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Not found | [`Error::SourceNotFound`] |
//! | Kind conflict | [`Error::NotADirectory`], [`Error::IsADirectory`] |
//! | Configuration | [`Error::UnknownPolicy`] |
//! | Filesystem | [`Error::Io`], [`Error::TempFile`], [`Error::Persist`] |
//!
//! None of these abort a traversal. The tree copier turns each one into an
//! [`Outcome::Failed`](crate::Outcome::Failed) for the branch that produced it.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for treecopy operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// This helper function detects storage-full conditions across platforms.
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` (errno 28) |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ENOSPC: i32 = 28;
            return raw_error == ENOSPC;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// Errors that can occur while copying a single branch of a tree.
///
/// All errors include the path they are attributed to.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Source path does not exist at traversal time
    #[error("Source path does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// A non-directory occupies a path where a directory is required
    #[error("Not a directory, refusing to replace it: {0}")]
    NotADirectory(PathBuf),

    /// A directory occupies a path where a file is required
    #[error("Is a directory, refusing to replace it with a file: {0}")]
    IsADirectory(PathBuf),

    /// Conflict policy name outside the recognized set
    #[error("Unknown conflict policy: {0:?} (expected overwrite, skip or rename)")]
    UnknownPolicy(String),

    /// IO error during a filesystem operation
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path the failing operation was applied to
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to create temporary file
    #[error("Failed to create temporary file in {path}: {source}")]
    TempFile {
        /// Directory where temp file creation was attempted
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to persist temporary file
    #[error("Failed to persist temporary file to {path}: {source}")]
    Persist {
        /// Target path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
}

impl Error {
    /// Wrap an IO error with the path it happened on.
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Stable classification of this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::SourceNotFound(_) => ErrorCode::SourceNotFound,
            Self::NotADirectory(_) | Self::IsADirectory(_) => ErrorCode::KindConflict,
            Self::UnknownPolicy(_) => ErrorCode::UnknownPolicy,
            Self::Io { source, .. } | Self::TempFile { source, .. } | Self::Persist { source, .. } => {
                ErrorCode::from_io(source)
            }
        }
    }

    /// The underlying IO error, if this is a filesystem failure.
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Io { source, .. } | Self::TempFile { source, .. } | Self::Persist { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

/// Machine-readable error classification.
///
/// Used by presentation layers to report configuration defects separately
/// from filesystem errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Caller supplied invalid input (bad operands, malformed task file)
    InvalidInput,
    /// Source path does not exist
    SourceNotFound,
    /// File/directory kind mismatch at the destination
    KindConflict,
    /// Unrecognized conflict policy
    UnknownPolicy,
    /// Permission denied by the filesystem
    PermissionDenied,
    /// Destination device is full
    NoSpace,
    /// Any other IO failure
    IoError,
}

impl ErrorCode {
    /// Classify a raw IO error.
    #[must_use]
    pub fn from_io(error: &io::Error) -> Self {
        if is_no_space_error(error) {
            return Self::NoSpace;
        }
        match error.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::NotFound => Self::SourceNotFound,
            _ => Self::IoError,
        }
    }

    /// Snake-case name of the code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::SourceNotFound => "source_not_found",
            Self::KindConflict => "kind_conflict",
            Self::UnknownPolicy => "unknown_policy",
            Self::PermissionDenied => "permission_denied",
            Self::NoSpace => "no_space",
            Self::IoError => "io_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
