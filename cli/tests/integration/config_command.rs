//! Integration tests for `podbridge config`.
//!
//! All tests set `PODBRIDGE_CONFIG` to a temp path so they never read or
//! write `~/.podbridge/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn podbridge(config: &str) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("podbridge"));
    cmd.env("NO_COLOR", "1").env("PODBRIDGE_CONFIG", config);
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

#[test]
fn test_config_help_shows_show_and_set_subcommands() {
    let (_dir, path) = temp_config_path();
    podbridge(&path)
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn test_config_show_without_file_uses_defaults() {
    let (_dir, path) = temp_config_path();
    podbridge(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("colima"))
        .stdout(predicate::str::contains("/run/podman/podman.sock"))
        .stdout(predicate::str::contains(path.as_str()));
}

#[test]
fn test_config_set_then_show_roundtrip() {
    let (_dir, path) = temp_config_path();
    podbridge(&path)
        .args(["config", "set", "vm_name", "lima-podman"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set vm_name = lima-podman"));

    podbridge(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lima-podman"));
}

#[test]
fn test_config_show_json() {
    let (_dir, path) = temp_config_path();
    let output = podbridge(&path)
        .args(["config", "show", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["config"]["vm_name"], "colima");
    assert_eq!(value["path"], path.as_str());
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    podbridge(&path)
        .args(["config", "set", "runtime", "docker"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting: runtime"));
}

#[test]
fn test_config_set_invalid_value_fails_without_writing() {
    let (dir, path) = temp_config_path();
    podbridge(&path)
        .args(["config", "set", "sockets.rootful", "podman.sock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be absolute"));
    assert!(!dir.path().join("config.yaml").exists());
}

#[test]
fn test_config_set_json_error_object() {
    let (_dir, path) = temp_config_path();
    let output = podbridge(&path)
        .args(["--json", "config", "set", "vm_name", "bad name"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "error");
}
