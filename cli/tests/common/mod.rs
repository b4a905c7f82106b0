//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory holding both sources and destinations, so tests can
/// run `tcopy` with relative operands from inside it.
pub struct TestFixture {
    pub root: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Write a file, creating its parents.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directory");
        }
        fs::write(path, content).expect("Failed to write file");
    }

    pub fn mkdir(&self, rel: &str) {
        fs::create_dir_all(self.path(rel)).expect("Failed to create directory");
    }

    /// Source tree `a/ {x.txt="1", b/ {y.txt="2"}}`.
    pub fn create_sample_tree(&self) {
        self.write("a/x.txt", "1");
        self.write("a/b/y.txt", "2");
    }

    /// `src/root.txt` plus one `level<n>/file<n>.txt` per nesting level.
    pub fn create_nested_structure(&self, depth: usize) {
        let mut current = self.path("src");
        fs::create_dir_all(&current).expect("Failed to create directory");
        fs::write(current.join("root.txt"), "root").expect("Failed to write file");
        for level in 0..depth {
            current = current.join(format!("level{}", level));
            fs::create_dir_all(&current).expect("Failed to create directory");
            fs::write(
                current.join(format!("file{}.txt", level)),
                format!("content at level {}", level),
            )
            .expect("Failed to write file");
        }
    }

    pub fn assert_file_content(&self, rel: &str, expected: &str) {
        let path = self.path(rel);
        assert!(path.is_file(), "File does not exist: {:?}", path);
        let actual = fs::read_to_string(&path).expect("Failed to read file");
        assert_eq!(actual, expected, "File content mismatch at {:?}", path);
    }

    /// Sorted listing of everything under `rel`, directories suffixed `/`.
    pub fn listing(&self, rel: &str) -> Vec<String> {
        let base = self.path(rel);
        let mut out = Vec::new();
        walk(&base, &base, &mut out);
        out.sort();
        out
    }
}

fn walk(base: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in fs::read_dir(dir).expect("Failed to read directory") {
        let path = entry.expect("Failed to read entry").path();
        let rel = path
            .strip_prefix(base)
            .expect("entry under base")
            .to_string_lossy()
            .replace('\\', "/");
        if path.is_dir() {
            out.push(format!("{}/", rel));
            walk(base, &path, out);
        } else {
            out.push(rel);
        }
    }
}
