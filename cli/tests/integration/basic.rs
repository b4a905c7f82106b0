//! Basic functionality integration tests for tcopy CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_basic_file_copy() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::write(src.path().join("test.txt"), "hello world").unwrap();

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.arg(src.path().join("test.txt"))
        .arg(dst.path().join("test.txt"))
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dst.path().join("test.txt")).unwrap(),
        "hello world"
    );
}

#[test]
fn test_mirror_tree() {
    let fx = TestFixture::new();
    fx.create_sample_tree();

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .arg("a")
        .arg("out")
        .assert()
        .success();

    assert_eq!(fx.listing("out"), vec!["b/", "b/y.txt", "x.txt"]);
    fx.assert_file_content("out/x.txt", "1");
    fx.assert_file_content("out/b/y.txt", "2");
}

#[test]
fn test_flatten_tree() {
    let fx = TestFixture::new();
    fx.create_sample_tree();

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .arg("--flatten")
        .arg("a")
        .arg("out")
        .assert()
        .success();

    assert_eq!(fx.listing("out"), vec!["x.txt", "y.txt"]);
    fx.assert_file_content("out/x.txt", "1");
    fx.assert_file_content("out/y.txt", "2");
}

#[test]
fn test_recopy_into_existing_tree_overwrites() {
    let fx = TestFixture::new();
    fx.create_sample_tree();

    for _ in 0..2 {
        let mut cmd = cargo_bin_cmd!("tcopy");
        cmd.current_dir(fx.root.path())
            .args(["-q", "a", "out"])
            .assert()
            .success();
    }

    assert_eq!(fx.listing("out"), vec!["b/", "b/y.txt", "x.txt"]);
}

#[test]
fn test_copy_multiple_sources() {
    let fx = TestFixture::new();
    fx.write("one/f1.txt", "content1");
    fx.write("two/f2.txt", "content2");
    fx.write("note.txt", "note");

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["one", "two", "note.txt", "dest"])
        .assert()
        .success();

    assert_eq!(
        fx.listing("dest"),
        vec!["note.txt", "one/", "one/f1.txt", "two/", "two/f2.txt"]
    );
    fx.assert_file_content("dest/two/f2.txt", "content2");
}

#[test]
fn test_copy_multiple_sources_flattened() {
    let fx = TestFixture::new();
    fx.write("one/f1.txt", "content1");
    fx.write("two/deeper/f2.txt", "content2");

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["-f", "one", "two", "dest"])
        .assert()
        .success();

    assert_eq!(fx.listing("dest"), vec!["f1.txt", "f2.txt"]);
}

#[test]
fn test_empty_directory_is_created_when_mirroring() {
    let fx = TestFixture::new();
    fx.mkdir("src/empty");
    fx.write("src/file.txt", "x");

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["src", "dst"])
        .assert()
        .success();

    assert_eq!(fx.listing("dst"), vec!["empty/", "file.txt"]);
}

#[test]
fn test_missing_source_reported_but_exit_zero() {
    let fx = TestFixture::new();

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["nope", "out"])
        .assert()
        .success()
        .stderr(predicate::str::contains("error[source_not_found]"));

    assert!(!fx.path("out").exists());
}

#[test]
fn test_missing_destination_operand() {
    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.arg("only-one")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Missing destination operand"));
}

#[test]
fn test_no_arguments_is_usage_error() {
    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.assert().failure().code(2);
}

#[test]
fn test_help() {
    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--flatten"))
        .stdout(predicate::str::contains("--on-conflict"))
        .stdout(predicate::str::contains("--max-depth"));
}

#[test]
fn test_version() {
    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tcopy"));
}

#[test]
fn test_no_sync_copies_normally() {
    let fx = TestFixture::new();
    fx.create_sample_tree();

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["--no-sync", "a", "out"])
        .assert()
        .success();

    fx.assert_file_content("out/b/y.txt", "2");
}
