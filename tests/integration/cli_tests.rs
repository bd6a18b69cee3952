//! Integration tests for the haul CLI surface: help, version, and
//! argument parsing.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn haul() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("haul"));
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_nonzero() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    haul().assert().code(2).stderr(predicate::str::contains(
        "Collect built OS images from build hosts",
    ));
}

#[test]
fn test_cli_help_flag_shows_help() {
    haul()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_cli_help_lists_collect_command() {
    haul()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("collect"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    haul()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("haul"));
}

#[test]
fn test_version_command_shows_version() {
    haul()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("haul 0.3.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = haul()
        .arg("version")
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value =
        serde_json::from_slice(&output).expect("version --json must emit valid JSON");
    assert_eq!(value["version"], "0.3.0");
}

#[test]
fn test_unknown_command_fails() {
    haul().arg("frobnicate").assert().failure();
}

// --- Argument validation ---

#[test]
fn test_collect_requires_host_and_path() {
    haul().arg("collect").assert().code(2);
}

#[test]
fn test_collect_rejects_unknown_transport() {
    haul()
        .args(["collect", "build-01", "/srv/img.raw", "--transport", "carrier-pigeon"])
        .assert()
        .code(2);
}

#[test]
fn test_collect_rejects_invalid_host_name() {
    let home = tempfile::TempDir::new().expect("tempdir");
    haul()
        .env("HOME", home.path())
        .args(["collect", "Bad_Host!", "/srv/img.raw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid build host name"));
}
