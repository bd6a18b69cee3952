//! Integration tests for `haul config`.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn haul_with_config(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("haul"));
    cmd.env("NO_COLOR", "1");
    cmd.env("HOME", dir.path());
    cmd.env("HAUL_CONFIG", dir.path().join("config.yaml"));
    cmd
}

#[test]
fn test_config_show_defaults() {
    let dir = TempDir::new().expect("tempdir");
    haul_with_config(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ssh.user:"))
        .stdout(predicate::str::contains("root"))
        .stdout(predicate::str::contains("transfer.attempts:"));
}

#[test]
fn test_config_set_then_show_roundtrip() {
    let dir = TempDir::new().expect("tempdir");

    haul_with_config(&dir)
        .args(["config", "set", "ssh.user", "builder"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set ssh.user = builder"));

    haul_with_config(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("builder"));
}

#[test]
fn test_config_set_unknown_key_fails() {
    let dir = TempDir::new().expect("tempdir");
    haul_with_config(&dir)
        .args(["config", "set", "nope.key", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn test_config_set_invalid_value_fails() {
    let dir = TempDir::new().expect("tempdir");
    haul_with_config(&dir)
        .args(["config", "set", "transfer.attempts", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));
}

#[test]
fn test_config_set_strict_checking_false_persists() {
    let dir = TempDir::new().expect("tempdir");

    haul_with_config(&dir)
        .args(["config", "set", "ssh.strict_host_key_checking", "false"])
        .assert()
        .success();

    let content =
        std::fs::read_to_string(dir.path().join("config.yaml")).expect("config written");
    assert!(content.contains("strict_host_key_checking: false"));
}

#[test]
fn test_config_path_prints_env_override() {
    let dir = TempDir::new().expect("tempdir");
    let expected = dir.path().join("config.yaml");
    haul_with_config(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn test_config_show_json_is_valid() {
    let dir = TempDir::new().expect("tempdir");
    let output = haul_with_config(&dir)
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value =
        serde_json::from_slice(&output).expect("config --json must emit valid JSON");
    assert_eq!(value["ssh"]["user"], "root");
}

#[test]
fn test_json_error_object_on_failure() {
    let dir = TempDir::new().expect("tempdir");
    let output = haul_with_config(&dir)
        .args(["config", "set", "nope.key", "1", "--json"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value =
        serde_json::from_slice(&output).expect("failures must emit a JSON error object");
    assert_eq!(value["error"], true);
    assert!(
        value["message"]
            .as_str()
            .expect("message")
            .contains("Unknown setting")
    );
}
