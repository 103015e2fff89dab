//! # Pinsry CLI Chat Integration Tests
//!
//! File: cli/tests/chat.rs
//!
//! Drives `pinsry chat` through stdin and checks the transcript on stdout.
//!
mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_chat_welcome_reply_and_goodbye() {
    pinsry_cmd()
        .args(["chat", "--seed", "1"])
        .write_stdin("How do I follow someone?\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pinsry Assistant: Hi there!"))
        .stdout(predicate::str::contains(
            "Following authors keeps their new stories in your feed!",
        ))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_chat_bye_ends_session() {
    pinsry_cmd()
        .arg("chat")
        .write_stdin("bye\nthis line is never read\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!"))
        .stdout(predicate::str::contains("Sorry you're running").not());
}

#[test]
fn test_chat_topics_and_history() {
    pinsry_cmd()
        .arg("chat")
        .write_stdin("/topics\nthank you\n/history\n/exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Privacy & safety"))
        .stdout(predicate::str::contains("] You: thank you"))
        .stdout(predicate::str::contains("] Pinsry Assistant: You're very welcome!"));
}

#[test]
fn test_chat_uses_configured_name() {
    let (_dir, path) = config_file("[assistant]\nname = \"Pip\"\n");
    pinsry_cmd()
        .arg("--config")
        .arg(&path)
        .arg("chat")
        .write_stdin("/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pip: Hi there!"));
}

#[test]
fn test_chat_ends_at_end_of_input() {
    pinsry_cmd()
        .arg("chat")
        .write_stdin("/help\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("/topics"));
}
