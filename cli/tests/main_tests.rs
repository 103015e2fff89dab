//! # Pinsry CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! Top-level behavior of the `pinsry` binary: standard flags, unknown
//! subcommands, and configuration errors surfacing as `Error: ...` with
//! exit code 1.
//!
mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    pinsry_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("rules"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_version_flag() {
    pinsry_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_subcommand_fails() {
    pinsry_cmd().arg("dance").assert().failure();
}

#[test]
fn test_missing_config_file_is_reported() {
    pinsry_cmd()
        .args(["--config", "/no/such/dir/pinsry.toml", "rules"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Failed to read configuration file"));
}

#[test]
fn test_unknown_config_field_is_rejected() {
    let (_dir, path) = config_file("[assistant]\nmood = \"cheerful\"\n");
    pinsry_cmd()
        .arg("--config")
        .arg(&path)
        .arg("rules")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse TOML"));
}

#[test]
fn test_invalid_host_in_config_is_rejected() {
    let (_dir, path) = config_file("[server]\nhost = \"localhost\"\n");
    pinsry_cmd()
        .arg("--config")
        .arg(&path)
        .args(["ask", "hello"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration validation failed"));
}

#[test]
fn test_config_from_environment_variable() {
    let (_dir, path) = config_file("[assistant]\nseed = 3\n");
    pinsry_cmd()
        .env("PINSRY_CONFIG", &path)
        .args(["ask", "--category", "thanks"])
        .assert()
        .success()
        .stdout("thanks\n");
}
