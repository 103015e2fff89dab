//! # Pinsry Support Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The presentation adapters behind the `pinsry` subcommands. Each one wraps
//! the same responder and session types; they differ only in how messages
//! reach the session and how replies are shown.
//!
//! ## Command Groups
//!
//! - `ask`: one question, one reply, then exit
//! - `chat`: interactive conversation on the terminal
//! - `rules`: the rule table in dispatch order
//! - `serve`: HTTP API for the web widget
//!
use crate::core::config::Config;
use crate::responder::Responder;
use crate::session::Session;
use std::sync::Arc;

/// One-shot question from the command line.
pub mod ask;
/// Interactive terminal conversation.
pub mod chat;
/// Rule table listing.
pub mod rules;
/// HTTP adapter for the web widget.
pub mod serve;

/// Builds a session from configuration. A `seed` passed on the command line
/// wins over `assistant.seed`.
pub(crate) fn configured_session(
    config: &Config,
    responder: Arc<Responder>,
    seed: Option<u64>,
) -> Session {
    Session::builder()
        .responder(responder)
        .seed_opt(seed.or(config.assistant.seed))
        .resolve_timeout(config.assistant.resolve_timeout())
        .build()
}

/// Whether terminal output should carry ANSI styling.
pub(crate) fn use_color(config: &Config, no_color: bool) -> bool {
    config.chat.color && !no_color && console::colors_enabled()
}
