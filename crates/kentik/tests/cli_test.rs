//! Integration tests for the `kentik` CLI binary.
//!
//! These validate argument parsing, spec-file handling, credential
//! resolution, and exit codes — all without a live Kentik account.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `kentik` binary with env isolation.
///
/// Clears all `KENTIK_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn kentik_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("kentik");
    cmd.env("HOME", "/tmp/kentik-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/kentik-cli-test-nonexistent")
        .env_remove("KENTIK_EMAIL")
        .env_remove("KENTIK_TOKEN")
        .env_remove("KENTIK_REGION")
        .env_remove("KENTIK_TIMEOUT");
    cmd
}

/// Write a spec document to a named temp file with the given extension.
fn spec_file(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const MINIMAL_SPEC: &str = r#"{
    "deviceName": "edge-1",
    "planName": "Gold",
    "sendingIps": ["10.0.0.1"]
}"#;

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = kentik_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    kentik_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Reconcile Kentik device resources")
            .and(predicate::str::contains("apply"))
            .and(predicate::str::contains("validate")),
    );
}

#[test]
fn test_version_flag() {
    kentik_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kentik"));
}

// ── Validate ────────────────────────────────────────────────────────

#[test]
fn test_validate_json_spec_applies_defaults() {
    let file = spec_file(MINIMAL_SPEC, ".json");

    kentik_cmd()
        .args(["validate", "-f"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""deviceName": "edge-1""#)
                .and(predicate::str::contains(r#""deviceSubtype": "router""#))
                .and(predicate::str::contains(r#""deviceSampleRate": 1"#)),
        );
}

#[test]
fn test_validate_yaml_spec() {
    let file = spec_file(
        "deviceName: edge-1\nplanName: Gold\nsendingIps: [10.0.0.1]\nstate: absent\n",
        ".yaml",
    );

    kentik_cmd()
        .args(["validate", "-o", "yaml", "-f"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("deviceName: edge-1"));
}

#[test]
fn test_validate_rejects_unknown_fields() {
    let file = spec_file(
        r#"{ "deviceName": "edge-1", "planName": "Gold", "sendingIps": [], "bogus": 1 }"#,
        ".json",
    );

    let output = kentik_cmd()
        .args(["validate", "-f"])
        .arg(file.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("device spec"),
        "Expected spec error in stderr:\n{stderr}"
    );
}

#[test]
fn test_validate_missing_file() {
    kentik_cmd()
        .args(["validate", "-f", "/nonexistent/spec.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("/nonexistent/spec.json"));
}

// ── Apply: configuration errors (no network involved) ───────────────

#[test]
fn test_apply_without_credentials_exits_auth() {
    let file = spec_file(MINIMAL_SPEC, ".json");

    let output = kentik_cmd()
        .args(["apply", "-f"])
        .arg(file.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3), "Expected AUTH exit code");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("KENTIK_EMAIL"),
        "Expected credential hint in stderr:\n{stderr}"
    );
}

#[test]
fn test_apply_with_invalid_region_exits_usage() {
    let file = spec_file(MINIMAL_SPEC, ".json");

    let output = kentik_cmd()
        .env("KENTIK_EMAIL", "ops@example.com")
        .env("KENTIK_TOKEN", "not-a-real-token")
        .args(["apply", "--region", "APAC", "-f"])
        .arg(file.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2), "Expected USAGE exit code");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("APAC"),
        "Expected region name in stderr:\n{stderr}"
    );
}
