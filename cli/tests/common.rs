//! # Pinsry CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and is compiled as its own test crate.
//!

// Not every test file uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// # Get Pinsry Command (`pinsry_cmd`)
///
/// An `assert_cmd::Command` for the compiled `pinsry` binary, isolated from
/// the environment's log, color and config settings.
///
/// ## Panics
/// Panics if the `pinsry` binary cannot be found via `Command::cargo_bin`.
pub fn pinsry_cmd() -> Command {
    let mut cmd = Command::cargo_bin("pinsry").expect("Failed to find pinsry binary for testing");
    cmd.env_remove("RUST_LOG")
        .env_remove("PINSRY_CONFIG")
        .env_remove("CLICOLOR_FORCE")
        .env("NO_COLOR", "1");
    cmd
}

/// Writes `contents` to a `pinsry.toml` inside a fresh temporary directory.
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn config_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("pinsry.toml");
    std::fs::write(&path, contents).expect("Failed to write config file");
    (dir, path)
}
