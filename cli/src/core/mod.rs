//! # Pinsry Support Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Cross-cutting pieces shared by the responder, the session and every
//! command adapter:
//! - `config`: configuration loading, merging, and validation
//! - `error`: the `SupportError` type and the application `Result` alias
//!
//! ## Usage
//!
//! ```rust
//! use pinsry_support::core::config; // For loading configuration
//! use pinsry_support::core::error::{Result, SupportError}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
