//! Recursive tree copy.
//!
//! Walks a source depth-first, strictly sequentially and in name order,
//! so directory creation and generated rename suffixes happen in a stable,
//! reproducible order. Every file handled and every directory created is
//! reported as an [`Outcome`]; a failing entry only ends its own branch.

use crate::error::Error;
use crate::options::CopyOptions;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use super::file::place_file;
use super::outcome::{CopyReport, CopyStats, Outcome};
use super::utils::{PathKind, dir_error, probe};

/// Copy `src` (file or directory) to `dst`, collecting every outcome.
///
/// # Path mapping
///
/// - Without flattening, `dst` mirrors `src`: a directory source becomes
///   the directory `dst`, a file source is written to the path `dst`.
/// - With [`CopyOptions::flatten`], `dst` is the destination root and every
///   file lands at `dst/<file name>`; no directories are created other than
///   the root, and empty source directories contribute nothing.
///
/// # Bounds
///
/// The root sits at depth 0 and each directory level adds 1. A directory at
/// depth `d` is not listed when `max_depth > 0 && d >= max_depth` (the same
/// test applies to `max_height`).
///
/// # Failures
///
/// Nothing here returns an error. Missing sources, file/directory kind
/// conflicts and IO errors become [`Outcome::Failed`] for the entry
/// involved, and the walk continues with its siblings.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use treecopy::{CopyOptions, OnConflict, copy_tree};
///
/// let options = CopyOptions::default()
///     .with_flatten(true)
///     .with_on_conflict(OnConflict::Rename);
/// let report = copy_tree(Path::new("photos"), Path::new("inbox"), &options);
/// for failure in report.failures() {
///     eprintln!("{}: {:?}", failure.src().display(), failure.error());
/// }
/// ```
pub fn copy_tree(src: &Path, dst: &Path, options: &CopyOptions) -> CopyReport {
    let mut outcomes = Vec::new();
    let stats = copy_tree_with(src, dst, options, |outcome| outcomes.push(outcome));
    CopyReport { outcomes, stats }
}

/// Copy `src` to `dst`, streaming each outcome to `sink` as it happens.
///
/// Same semantics as [`copy_tree`]. Returns the aggregated statistics once
/// the walk is complete.
pub fn copy_tree_with<F>(src: &Path, dst: &Path, options: &CopyOptions, sink: F) -> CopyStats
where
    F: FnMut(Outcome),
{
    let start_time = Instant::now();

    let mut walker = TreeWalker {
        root: dst,
        options,
        sink,
        stats: CopyStats::default(),
    };
    walker.visit(src, dst, 0);

    let mut stats = walker.stats;
    stats.duration = start_time.elapsed();
    stats
}

struct TreeWalker<'a, F> {
    /// Destination root, where flattened files land
    root: &'a Path,
    options: &'a CopyOptions,
    sink: F,
    stats: CopyStats,
}

impl<F> TreeWalker<'_, F>
where
    F: FnMut(Outcome),
{
    fn visit(&mut self, src: &Path, dst: &Path, depth: usize) {
        match probe(src) {
            Ok(PathKind::Directory) => self.visit_dir(src, dst, depth),
            Ok(PathKind::File) => self.visit_file(src, dst),
            Ok(PathKind::Absent) => {
                self.fail(src, dst, Error::SourceNotFound(src.to_path_buf()));
            }
            Err(e) => self.fail(src, dst, Error::io(src, e)),
        }
    }

    fn visit_dir(&mut self, src: &Path, dst: &Path, depth: usize) {
        if !self.options.may_descend(depth) {
            tracing::debug!(
                src = %src.display(),
                depth,
                max_depth = self.options.max_depth,
                max_height = self.options.max_height,
                "depth bound reached, not descending"
            );
            return;
        }

        let names = match read_names(src) {
            Ok(names) => names,
            Err(e) => return self.fail(src, dst, Error::io(src, e)),
        };

        if self.options.flatten {
            if names.is_empty() {
                tracing::debug!(src = %src.display(), "empty directory ignored while flattening");
                return;
            }
            if depth == 0 {
                if let Err(error) = self.check_flatten_root() {
                    let root = self.root;
                    return self.fail(src, root, error);
                }
            }
        } else if let Err(error) = self.ensure_dir(src, dst) {
            return self.fail(src, dst, error);
        }

        for name in names {
            let child_src = src.join(&name);
            let child_dst = if self.options.flatten {
                self.root.join(&name)
            } else {
                dst.join(&name)
            };
            self.visit(&child_src, &child_dst, depth + 1);
        }
    }

    fn visit_file(&mut self, src: &Path, dst: &Path) {
        let target = match (self.options.flatten, src.file_name()) {
            (true, Some(name)) => self.root.join(name),
            _ => dst.to_path_buf(),
        };

        match place_file(src, &target, self.options) {
            Ok(outcome) => self.emit(outcome),
            Err(error) => self.fail(src, &target, error),
        }
    }

    /// The flatten root must not be a file, so a bad root fails once per
    /// source root instead of once per file.
    fn check_flatten_root(&self) -> Result<(), Error> {
        match probe(self.root) {
            Ok(PathKind::File) => Err(Error::NotADirectory(self.root.to_path_buf())),
            Ok(_) => Ok(()),
            Err(e) => Err(dir_error(self.root, e)),
        }
    }

    /// Make sure `dst` is a directory, creating it if nothing is there.
    fn ensure_dir(&mut self, src: &Path, dst: &Path) -> Result<(), Error> {
        match probe(dst).map_err(|e| dir_error(dst, e))? {
            PathKind::Directory => Ok(()),
            PathKind::File => Err(Error::NotADirectory(dst.to_path_buf())),
            PathKind::Absent => {
                fs::create_dir_all(dst).map_err(|e| dir_error(dst, e))?;
                self.emit(Outcome::DirectoryCreated {
                    src: src.to_path_buf(),
                    dst: dst.to_path_buf(),
                });
                Ok(())
            }
        }
    }

    fn fail(&mut self, src: &Path, dst: &Path, error: Error) {
        self.emit(Outcome::failed(src, dst, error));
    }

    fn emit(&mut self, outcome: Outcome) {
        match &outcome {
            Outcome::Failed { src, dst, error } => tracing::warn!(
                src = %src.display(),
                dst = %dst.display(),
                code = %error.code(),
                "{error}"
            ),
            other => tracing::debug!(
                src = %other.src().display(),
                dst = %other.dst().display(),
                "{}",
                other.kind()
            ),
        }
        self.stats.record(&outcome);
        (self.sink)(outcome);
    }
}

/// Names of the immediate entries of `dir`, sorted for a stable walk order.
fn read_names(dir: &Path) -> io::Result<Vec<OsString>> {
    let mut names = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}
