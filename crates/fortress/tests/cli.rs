//! Binary-level tests for the fortress CLI
//!
//! Run the real executable against manifests in temporary directories and
//! check exit status and output.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const LAYERED: &str = r#"
[[component]]
name = "web"
requires = ["datasource", "logger"]

[[component]]
name = "datasource"
requires = ["logger"]

[[component]]
name = "logger"
"#;

const CYCLIC: &str = r#"
[[component]]
name = "root"
requires = ["child3"]

[[component]]
name = "child3"
requires = ["root"]
"#;

fn write_manifest(temp_dir: &TempDir, content: &str) -> PathBuf {
    let path = temp_dir.path().join("components.toml");
    fs::write(&path, content).unwrap();
    path
}

fn fortress(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fortress").unwrap();
    cmd.current_dir(temp_dir.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_check_succeeds_on_acyclic_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir, LAYERED);

    fortress(&temp_dir)
        .arg("check")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 components, no cycles"));
}

#[test]
fn test_check_fails_on_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir, CYCLIC);

    fortress(&temp_dir)
        .arg("check")
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("root → child3 → root"));
}

#[test]
fn test_order_shutdown() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir, LAYERED);

    fortress(&temp_dir)
        .args(["order", "--shutdown"])
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 (2) : web [ datasource, logger ]"))
        .stdout(predicate::str::contains("#3 (0) : logger"));
}

#[test]
fn test_order_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir, LAYERED);

    let output = fortress(&temp_dir)
        .args(["order", "--output", "json"])
        .arg(&manifest)
        .output()
        .unwrap();
    assert!(output.status.success());

    let sequence: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(sequence[0]["name"], "logger");
    assert_eq!(sequence[2]["name"], "web");
}

#[test]
fn test_graph_prints_dot() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir, CYCLIC);

    fortress(&temp_dir)
        .arg("graph")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph"));
}

#[test]
fn test_env_file_sets_output_format() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir, LAYERED);
    fs::write(temp_dir.path().join(".env"), "FORTRESS_OUTPUT=json\n").unwrap();

    fortress(&temp_dir)
        .env_remove("FORTRESS_OUTPUT")
        .arg("check")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"acyclic\": true"));
}

#[test]
fn test_no_command_prints_usage_hint() {
    let temp_dir = TempDir::new().unwrap();

    fortress(&temp_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("fortress --help"));
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let temp_dir = TempDir::new().unwrap();

    fortress(&temp_dir)
        .args(["--log-level", "9", "version"])
        .assert()
        .failure();
}
