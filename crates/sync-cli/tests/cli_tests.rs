//! Integration tests for the syncsel binary

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use sync_test_utils::workspace::TestWorkspace;

const SNAPSHOT: &str = r#"
selection = ["trunk"]

[[records]]
path = "trunk"
kind = "folder"
state = "modified"

[[records]]
path = "trunk/added.txt"
state = "added"

[[records]]
path = "trunk/theirs.txt"
state = "normal"
remote = { state = "modified", url = "svn://h/repo/trunk/theirs.txt", revision = 5 }

[[records]]
path = "trunk/removed.txt"
state = "normal"
remote = { state = "deleted", url = "svn://h/repo/trunk/removed.txt", revision = 6 }

[[records]]
path = "trunk/locked.txt"
state = "normal"
mask = "LOCKED"
"#;

fn syncsel() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("syncsel"))
}

fn snapshot(workspace: &TestWorkspace) -> PathBuf {
    workspace.write("snapshot.toml", SNAPSHOT)
}

#[test]
fn test_no_command_prints_hint() {
    syncsel()
        .assert()
        .success()
        .stdout(predicate::str::contains("syncsel --help"));
}

#[test]
fn test_commands_lists_catalogue() {
    syncsel()
        .arg("commands")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract-incoming"))
        .stdout(predicate::str::contains("override-and-commit"));
}

#[test]
fn test_filters_lists_standard_filters() {
    syncsel()
        .arg("filters")
        .assert()
        .success()
        .stdout(predicate::str::contains("commitable"))
        .stdout(predicate::str::contains("Total:"));
}

#[test]
fn test_select_with_command_filters() {
    let workspace = TestWorkspace::new();
    let path = snapshot(&workspace);

    for model in ["flat", "tree"] {
        syncsel()
            .args(["select", "--model", model, "--command", "commit", "-s"])
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("trunk/added.txt"))
            .stdout(predicate::str::contains("theirs.txt").not());
    }
}

#[test]
fn test_select_ad_hoc_remote_filter_as_json() {
    let workspace = TestWorkspace::new();
    let path = snapshot(&workspace);

    syncsel()
        .args(["select", "--remote-filter", "deleted", "--direction", "incoming", "--json", "-s"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"trunk/removed.txt\""))
        .stdout(predicate::str::contains("added.txt").not());
}

#[test]
fn test_select_requires_some_filter() {
    let workspace = TestWorkspace::new();
    let path = snapshot(&workspace);

    syncsel()
        .args(["select", "-s"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--command"));
}

#[test]
fn test_select_unknown_filter_fails() {
    let workspace = TestWorkspace::new();
    let path = snapshot(&workspace);

    syncsel()
        .args(["select", "--filter", "shiny", "-s"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown state filter: 'shiny'"));
}

#[test]
fn test_missing_snapshot_fails() {
    syncsel()
        .args(["select", "--command", "commit", "-s", "does-not-exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_records_show_direction() {
    let workspace = TestWorkspace::new();
    let path = snapshot(&workspace);

    syncsel()
        .args(["records", "--command", "update", "-s"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("incoming"))
        .stdout(predicate::str::contains("trunk/theirs.txt"))
        .stdout(predicate::str::contains("remote=deleted"));
}

#[test]
fn test_plan_marks_extracted_deletions() {
    let workspace = TestWorkspace::new();
    let path = snapshot(&workspace);

    syncsel()
        .args(["plan", "--command", "extract-incoming", "-s"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("extract-incoming"))
        .stdout(predicate::str::contains("trunk/removed.txt"))
        .stdout(predicate::str::contains("(deleted)"));
}

#[test]
fn test_plan_with_nothing_to_do() {
    let workspace = TestWorkspace::new();
    let path = snapshot(&workspace);

    syncsel()
        .args(["plan", "--command", "unlock", "-s"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to unlock"));
}

#[test]
fn test_transfer_round_trip() {
    let temp = assert_fs::TempDir::new().unwrap();
    let out = temp.child("refs.bin");

    syncsel()
        .args(["transfer", "encode", "--operation", "cut", "--url", "svn://h/r/a@3", "--url", "svn://h/r/b", "-o"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Encoded"));
    out.assert(predicate::path::exists());

    syncsel()
        .args(["transfer", "decode"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("operation"))
        .stdout(predicate::str::contains("svn://h/r/a@3"))
        .stdout(predicate::str::contains("svn://h/r/b"));
}

#[test]
fn test_transfer_none_decodes_to_no_data() {
    let temp = assert_fs::TempDir::new().unwrap();
    let out = temp.child("none.bin");

    syncsel()
        .args(["transfer", "encode", "--operation", "none", "--url", "svn://h/r/a", "-o"])
        .arg(out.path())
        .assert()
        .success();

    syncsel()
        .args(["transfer", "decode", "--json"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("null\n"));
}

#[test]
fn test_completions_for_bash() {
    syncsel()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("syncsel"));
}
