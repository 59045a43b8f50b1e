//! CLI tests for treedrop
//!
//! Every command runs with `--no-notify` or an unreachable backend so no
//! test needs a live server.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

fn treedrop(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("treedrop").unwrap();
    cmd.current_dir(cwd).env("RUST_LOG", "off");
    cmd
}

/// project/a.txt (10 bytes) and project/b/c.txt (5 bytes)
fn project() -> TempDir {
    let temp = tempdir().unwrap();
    let root = temp.path().join("project");
    fs::create_dir_all(root.join("b")).unwrap();
    fs::write(root.join("a.txt"), [b'a'; 10]).unwrap();
    fs::write(root.join("b/c.txt"), [b'c'; 5]).unwrap();
    temp
}

fn json_stdout(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

#[test]
fn test_tree_prints_nested_files() {
    let temp = project();
    treedrop(temp.path())
        .args(["--no-notify", "tree", "project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project/"))
        .stdout(predicate::str::contains("    c.txt (5 B)"));
}

#[test]
fn test_tree_json_envelope() {
    let temp = project();
    let output = treedrop(temp.path())
        .args(["--no-notify", "--json", "tree", "project"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = json_stdout(&output.stdout);
    assert_eq!(json["schema_version"], 1);
    assert_eq!(json["ok"], true);
    assert_eq!(json["data"]["file_count"], 2);
    assert_eq!(json["data"]["total_bytes"], 15);
    assert_eq!(json["data"]["tree"]["path"], "/project");
    assert_eq!(json["data"]["tree"]["type"], "directory");
}

#[test]
fn test_list_json_manifest() {
    let temp = project();
    let output = treedrop(temp.path())
        .args(["--no-notify", "--json", "list", "project"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = json_stdout(&output.stdout);
    let mut paths: Vec<String> = json["data"]["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["path"].as_str().unwrap().to_string())
        .collect();
    paths.sort();
    assert_eq!(paths, vec!["/project/a.txt", "/project/b/c.txt"]);
}

#[test]
fn test_list_table() {
    let temp = project();
    treedrop(temp.path())
        .args(["--no-notify", "list", "project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/project/b/c.txt"))
        .stdout(predicate::str::contains("2 files"));
}

#[test]
fn test_drag_payload() {
    let temp = project();
    treedrop(temp.path())
        .args(["--no-notify", "drag", "project", "--path", "/project/b/c.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name":"c.txt""#))
        .stdout(predicate::str::contains(r#""size":5"#))
        .stdout(predicate::str::contains(r#""type":"text/plain""#));
}

#[test]
fn test_drag_unknown_path_is_not_found() {
    let temp = project();
    let output = treedrop(temp.path())
        .args(["--no-notify", "--json", "drag", "project", "--path", "/project/missing.txt"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let json = json_stdout(&output.stderr);
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"]["code"], "not_found");
}

#[test]
fn test_missing_path_fails_ingestion() {
    let temp = tempdir().unwrap();
    treedrop(temp.path())
        .args(["--no-notify", "tree", "nowhere"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("ingestion failed"));
}

#[test]
fn test_ask_with_nothing_to_send() {
    let temp = project();
    treedrop(temp.path())
        .args(["--no-notify", "ask", "project"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Nothing to send"));
}

#[test]
fn test_ask_unknown_attachment() {
    let temp = project();
    treedrop(temp.path())
        .args(["--no-notify", "ask", "project", "--query", "hi", "--attach", "/project/zzz"])
        .assert()
        .code(3);
}

#[test]
fn test_ask_unreachable_backend() {
    let temp = project();
    fs::write(
        temp.path().join("treedrop.toml"),
        "[backend]\nbase_url = \"http://127.0.0.1:1\"\ntimeout_ms = 2000\nnotify_on_ingest = false\n",
    )
    .unwrap();

    let output = treedrop(temp.path())
        .args(["--json", "ask", "project", "--query", "what?", "--attach", "/project/a.txt"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(6));
    assert_eq!(json_stdout(&output.stderr)["error"]["code"], "backend_error");
}

#[test]
fn test_ask_repeated_attachment_is_sent_once() {
    let temp = project();
    fs::write(
        temp.path().join("treedrop.toml"),
        "[backend]\nbase_url = \"http://127.0.0.1:1\"\ntimeout_ms = 2000\nnotify_on_ingest = false\n",
    )
    .unwrap();

    // An empty query with a file attached twice still reaches the backend
    let output = treedrop(temp.path())
        .args([
            "--json", "ask", "project",
            "--attach", "/project/a.txt",
            "--attach", "/project/a.txt",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(6));
    assert_eq!(json_stdout(&output.stderr)["error"]["code"], "backend_error");
}

#[test]
fn test_tree_of_dot_is_named_after_directory() {
    let temp = project();
    let output = treedrop(&temp.path().join("project"))
        .args(["--no-notify", "--json", "tree", "."])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(json_stdout(&output.stdout)["data"]["tree"]["path"], "/project");
}

#[test]
fn test_config_init_and_show() {
    let temp = tempdir().unwrap();
    treedrop(temp.path())
        .args(["config", "init"])
        .assert()
        .success();
    assert!(temp.path().join("treedrop.toml").exists());

    treedrop(temp.path())
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    treedrop(temp.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();

    let output = treedrop(temp.path())
        .args(["--json", "config", "show"])
        .output()
        .unwrap();
    let json = json_stdout(&output.stdout);
    assert_eq!(json["data"]["from_file"], true);
    assert_eq!(json["data"]["config"]["backend"]["base_url"], "http://localhost:8000");
    assert_eq!(json["data"]["config"]["ingest"]["read_batch_size"], 100);
}

#[test]
fn test_explicit_missing_config_is_not_found() {
    let temp = project();
    treedrop(temp.path())
        .args(["--config", "nope.toml", "tree", "project"])
        .assert()
        .code(3);
}

#[test]
fn test_invalid_ignore_pattern_is_config_error() {
    let temp = project();
    fs::write(temp.path().join("treedrop.toml"), "[ingest]\nignore = [\"[\"]\n").unwrap();
    treedrop(temp.path())
        .args(["--json", "--no-notify", "tree", "project"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid_config"));
}
