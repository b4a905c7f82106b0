//! Free-name resolution for the rename conflict policy.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Find a path derived from `candidate` that does not exist right now.
///
/// Returns `candidate` itself when it is free. Otherwise tries
/// `<stem>_1<ext>`, `<stem>_2<ext>`, ... in the same directory, always
/// built from the original stem, and returns the first one that is free.
///
/// This only checks; it never creates anything. A concurrent writer can
/// still take the returned path before the caller uses it.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// // With "out/report.txt" present, this yields "out/report_1.txt".
/// let free = treecopy::unique_path(Path::new("out/report.txt"))?;
/// # Ok::<(), std::io::Error>(())
/// ```
///
/// # Errors
///
/// Returns the first existence check that fails for a reason other than
/// "not found" (e.g. permission denied on the parent directory).
pub fn unique_path(candidate: &Path) -> io::Result<PathBuf> {
    unique_path_with(candidate, |path| path.try_exists())
}

/// [`unique_path`] with a caller-supplied existence predicate.
pub(crate) fn unique_path_with<F>(candidate: &Path, mut exists: F) -> io::Result<PathBuf>
where
    F: FnMut(&Path) -> io::Result<bool>,
{
    if !exists(candidate)? {
        return Ok(candidate.to_path_buf());
    }

    let parent = candidate.parent().unwrap_or(Path::new(""));
    let stem = candidate.file_stem().unwrap_or_default();
    let ext = candidate.extension();

    let mut n: u64 = 1;
    loop {
        let mut name = OsString::from(stem);
        name.push(format!("_{n}"));
        if let Some(ext) = ext {
            name.push(".");
            name.push(ext);
        }

        let next = parent.join(name);
        if !exists(&next)? {
            return Ok(next);
        }
        n += 1;
    }
}
