//! Conflict policy and kind conflict tests for tcopy CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case::overwrite("overwrite", "new", &["x.txt"])]
#[case::skip("skip", "old", &["x.txt"])]
#[case::rename("rename", "old", &["x.txt", "x_1.txt"])]
fn test_existing_file_policy(
    #[case] policy: &str,
    #[case] expected: &str,
    #[case] expected_listing: &[&str],
) {
    let fx = TestFixture::new();
    fx.write("src/x.txt", "new");
    fx.write("out/x.txt", "old");

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["--on-conflict", policy, "src", "out"])
        .assert()
        .success();

    fx.assert_file_content("out/x.txt", expected);
    assert_eq!(fx.listing("out"), expected_listing);
}

#[test]
fn test_rename_generates_increasing_suffixes() {
    let fx = TestFixture::new();
    fx.write("src/x.txt", "new");

    for _ in 0..3 {
        let mut cmd = cargo_bin_cmd!("tcopy");
        cmd.current_dir(fx.root.path())
            .args(["-c", "rename", "-q", "src", "out"])
            .assert()
            .success();
    }

    assert_eq!(fx.listing("out"), vec!["x.txt", "x_1.txt", "x_2.txt"]);
}

#[test]
fn test_rename_on_flatten_collisions() {
    let fx = TestFixture::new();
    fx.write("src/x.txt", "top");
    fx.write("src/sub/x.txt", "nested");

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["-f", "-c", "rename", "src", "out"])
        .assert()
        .success();

    // "sub" sorts before "x.txt", so the nested file lands first
    fx.assert_file_content("out/x.txt", "nested");
    fx.assert_file_content("out/x_1.txt", "top");
}

#[test]
fn test_skip_reports_summary() {
    let fx = TestFixture::new();
    fx.write("src/x.txt", "new");
    fx.write("out/x.txt", "old");

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["-c", "skip", "src", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to copy (1 files already exist)"));
}

#[rstest]
#[case::overwrite("overwrite")]
#[case::skip("skip")]
#[case::rename("rename")]
fn test_file_onto_directory_is_kind_conflict(#[case] policy: &str) {
    let fx = TestFixture::new();
    fx.write("src/x.txt", "new");
    fx.write("out/x.txt/keep.txt", "kept");

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["-c", policy, "src", "out"])
        .assert()
        .success()
        .stderr(predicate::str::contains("error[kind_conflict]"));

    fx.assert_file_content("out/x.txt/keep.txt", "kept");
}

#[test]
fn test_directory_onto_file_is_kind_conflict() {
    let fx = TestFixture::new();
    fx.write("src/b/y.txt", "2");
    fx.write("src/z.txt", "3");
    fx.write("out/b", "i am a file");

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["src", "out"])
        .assert()
        .success()
        .stderr(predicate::str::contains("error[kind_conflict]"));

    // The conflicting branch is untouched and its sibling still copied
    fx.assert_file_content("out/b", "i am a file");
    fx.assert_file_content("out/z.txt", "3");
}

#[test]
fn test_unknown_policy_is_usage_error() {
    let fx = TestFixture::new();
    fx.write("src/x.txt", "new");

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["-c", "merge", "src", "out"])
        .assert()
        .code(2);

    assert!(!fx.path("out").exists());
}
