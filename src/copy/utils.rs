//! Utility functions for tree copy operations.
//!
//! This module contains the existence-and-kind query every traversal step
//! starts from, kind-conflict detection for directory errors, and the
//! byte-level content copy.

use crate::error::Error;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

// =============================================================================
// Existence and kind
// =============================================================================

/// What currently occupies a path.
///
/// Absence is a normal answer, not an error. Only failures other than
/// "not found" surface as `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathKind {
    /// Nothing exists at the path
    Absent,
    /// A non-directory entry (regular file or anything else that is not a directory)
    File,
    /// A directory
    Directory,
}

/// Query existence and kind of `path`, following symlinks like a plain stat.
pub(crate) fn probe(path: &Path) -> io::Result<PathKind> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(PathKind::Directory),
        Ok(_) => Ok(PathKind::File),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(PathKind::Absent),
        Err(e) => Err(e),
    }
}

/// The nearest path among `path` and its ancestors that is a file.
fn file_ancestor(path: &Path) -> Option<PathBuf> {
    path.ancestors()
        .filter(|p| !p.as_os_str().is_empty())
        .find(|p| matches!(probe(p), Ok(PathKind::File)))
        .map(Path::to_path_buf)
}

/// Wrap an IO error from a directory lookup or creation at `path`.
///
/// When the failure comes from a file standing where a directory is needed
/// (on `path` itself or one of its ancestors), this is a kind conflict on
/// that file rather than a plain IO error.
pub(crate) fn dir_error(path: &Path, source: io::Error) -> Error {
    if matches!(
        source.kind(),
        io::ErrorKind::NotADirectory | io::ErrorKind::AlreadyExists
    ) {
        if let Some(file) = file_ancestor(path) {
            return Error::NotADirectory(file);
        }
    }
    Error::io(path, source)
}

// =============================================================================
// File content copying
// =============================================================================

/// Copy all bytes from `src` into `dst`, returning the number of bytes written.
pub(crate) fn copy_file_contents(src: &File, dst: &File) -> io::Result<u64> {
    io::copy(&mut BufReader::new(src), &mut &*dst)
}

// =============================================================================
// Tests
// =============================================================================
