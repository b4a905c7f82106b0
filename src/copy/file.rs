//! Single file placement.
//!
//! This module decides what happens to one source file given whatever
//! currently occupies its destination, and writes bytes through a temp
//! file so no partial destination is ever visible.

use crate::error::{Error, Result};
use crate::options::{CopyOptions, OnConflict};
use std::fs::{self, File};
use std::path::Path;
use tempfile::NamedTempFile;

use super::outcome::Outcome;
use super::unique::unique_path;
use super::utils::{PathKind, copy_file_contents, dir_error, probe};

/// How the temp file is moved onto its final path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Fail if something appeared at the destination in the meantime
    NoClobber,
    /// Atomically replace the existing destination
    Replace,
}

/// Copy a single file, applying the conflict policy.
///
/// Unlike the tree copier this never flattens: `dst` is the exact file path
/// to write.
///
/// # Returns
///
/// The [`Outcome`] describing the action taken (never [`Outcome::Failed`];
/// failures are returned as `Err`).
///
/// # Errors
///
/// Returns an error if:
/// - Source does not exist ([`Error::SourceNotFound`])
/// - Source is a directory ([`Error::IsADirectory`])
/// - A directory occupies `dst` ([`Error::IsADirectory`])
/// - A file occupies a parent directory of `dst` ([`Error::NotADirectory`])
/// - IO operations fail ([`Error::Io`], [`Error::TempFile`], [`Error::Persist`])
pub fn copy_file(src: &Path, dst: &Path, options: &CopyOptions) -> Result<Outcome> {
    match probe(src).map_err(|e| Error::io(src, e))? {
        PathKind::Absent => Err(Error::SourceNotFound(src.to_path_buf())),
        PathKind::Directory => Err(Error::IsADirectory(src.to_path_buf())),
        PathKind::File => place_file(src, dst, options),
    }
}

/// Place the bytes of `src` at `dst` according to `options.on_conflict`.
///
/// `src` is known to be a non-directory.
pub(crate) fn place_file(src: &Path, dst: &Path, options: &CopyOptions) -> Result<Outcome> {
    match probe(dst).map_err(|e| dir_error(dst, e))? {
        PathKind::Directory => Err(Error::IsADirectory(dst.to_path_buf())),
        PathKind::File => match options.on_conflict {
            OnConflict::Overwrite => {
                let bytes = write_via_temp(src, dst, options, Placement::Replace)?;
                Ok(Outcome::Overwritten {
                    src: src.to_path_buf(),
                    dst: dst.to_path_buf(),
                    bytes,
                })
            }
            OnConflict::Skip => Ok(Outcome::Skipped {
                src: src.to_path_buf(),
                dst: dst.to_path_buf(),
            }),
            OnConflict::Rename => {
                let renamed = unique_path(dst).map_err(|e| Error::io(dst, e))?;
                let bytes = write_via_temp(src, &renamed, options, Placement::NoClobber)?;
                Ok(Outcome::Renamed {
                    src: src.to_path_buf(),
                    original: dst.to_path_buf(),
                    renamed,
                    bytes,
                })
            }
        },
        PathKind::Absent => {
            if let Some(parent) = non_empty_parent(dst) {
                fs::create_dir_all(parent).map_err(|e| dir_error(parent, e))?;
            }
            let bytes = write_via_temp(src, dst, options, Placement::NoClobber)?;
            Ok(Outcome::Copied {
                src: src.to_path_buf(),
                dst: dst.to_path_buf(),
                bytes,
            })
        }
    }
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Stream `src` into a temp file next to `dst`, then move it into place.
fn write_via_temp(
    src: &Path,
    dst: &Path,
    options: &CopyOptions,
    placement: Placement,
) -> Result<u64> {
    let src_file = File::open(src).map_err(|e| Error::io(src, e))?;

    let dst_parent = non_empty_parent(dst).unwrap_or(Path::new("."));
    let temp_file = new_temp_file(dst_parent)?;

    let bytes = copy_file_contents(&src_file, temp_file.as_file()).map_err(|e| Error::io(dst, e))?;

    if options.fsync {
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| Error::io(dst, e))?;
    }

    let persisted = match placement {
        Placement::NoClobber => temp_file.persist_noclobber(dst),
        Placement::Replace => temp_file.persist(dst),
    };
    persisted.map_err(|e| Error::Persist {
        path: dst.to_path_buf(),
        source: e.error,
    })?;

    Ok(bytes)
}

/// Temp file in `dir` with ordinary (umask-governed) permissions.
fn new_temp_file(dir: &Path) -> Result<NamedTempFile> {
    let temp_err = |source: std::io::Error| Error::TempFile {
        path: dir.to_path_buf(),
        source,
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tempfile::Builder::new()
            .permissions(fs::Permissions::from_mode(0o666))
            .tempfile_in(dir)
            .map_err(temp_err)
    }
    #[cfg(not(unix))]
    {
        NamedTempFile::new_in(dir).map_err(temp_err)
    }
}
