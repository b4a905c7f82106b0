//! Task file (`--tasks`) integration tests for tcopy CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;

#[test]
fn test_task_list_runs_in_order() {
    let fx = TestFixture::new();
    fx.create_sample_tree();
    fx.write(
        "tasks.json",
        r#"[
            { "src": "a", "dest": "out" },
            { "src": "a", "dest": "flat", "flatten": true }
        ]"#,
    );

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["--tasks", "tasks.json"])
        .assert()
        .success();

    assert_eq!(fx.listing("out"), vec!["b/", "b/y.txt", "x.txt"]);
    assert_eq!(fx.listing("flat"), vec!["x.txt", "y.txt"]);
}

#[test]
fn test_single_task_object_with_camel_case() {
    let fx = TestFixture::new();
    fx.create_sample_tree();
    fx.write("out/x.txt", "old");
    fx.write(
        "task.json",
        r#"{ "source": "a", "destination": "out", "maxDepth": 1, "conflictPolicy": "rename" }"#,
    );

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["-t", "task.json"])
        .assert()
        .success();

    assert_eq!(fx.listing("out"), vec!["x.txt", "x_1.txt"]);
    fx.assert_file_content("out/x.txt", "old");
    fx.assert_file_content("out/x_1.txt", "1");
}

#[test]
fn test_multi_source_task() {
    let fx = TestFixture::new();
    fx.write("one/f1.txt", "1");
    fx.write("two/f2.txt", "2");
    fx.write(
        "tasks.json",
        r#"[{ "src": ["one", "two"], "dest": "dest" }]"#,
    );

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["--tasks", "tasks.json"])
        .assert()
        .success();

    assert_eq!(
        fx.listing("dest"),
        vec!["one/", "one/f1.txt", "two/", "two/f2.txt"]
    );
}

#[test]
fn test_unknown_policy_fails_only_its_task() {
    let fx = TestFixture::new();
    fx.create_sample_tree();
    fx.write(
        "tasks.json",
        r#"[
            { "src": "a", "dest": "bad", "on_conflict": "merge" },
            { "src": "a", "dest": "good" }
        ]"#,
    );

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["--tasks", "tasks.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("error[unknown_policy]"))
        .stderr(predicate::str::contains("merge"));

    assert!(!fx.path("bad").exists());
    fx.assert_file_content("good/b/y.txt", "2");
}

#[test]
fn test_invalid_json_is_usage_error() {
    let fx = TestFixture::new();
    fx.write("tasks.json", "[{ \"src\": \"a\" ");

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["--tasks", "tasks.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid task file"));
}

#[test]
fn test_unknown_field_is_usage_error() {
    let fx = TestFixture::new();
    fx.write("tasks.json", r#"{ "src": "a", "dest": "out", "depth": 3 }"#);

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["--tasks", "tasks.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown field `depth`"));

    assert!(!fx.path("out").exists());
}

#[test]
fn test_missing_task_file() {
    let fx = TestFixture::new();

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["--tasks", "absent.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read task file"));
}

#[test]
fn test_tasks_conflicts_with_operands() {
    let fx = TestFixture::new();
    fx.write("tasks.json", "[]");

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["--tasks", "tasks.json", "--flatten"])
        .assert()
        .code(2);
}

#[test]
fn test_empty_task_list() {
    let fx = TestFixture::new();
    fx.write("tasks.json", "[]");

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(fx.root.path())
        .args(["--tasks", "tasks.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to copy"));
}
