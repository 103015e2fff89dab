//! # Pinsry Support Assistant
//!
//! File: cli/src/lib.rs
//!
//! Library surface of the `pinsry` binary: the keyword-driven responder, the
//! conversation session built on it, markup rendering, and the command
//! adapters (`ask`, `chat`, `rules`, `serve`).
//!
pub mod commands;
pub mod core;
pub mod render;
pub mod responder;
pub mod session;
