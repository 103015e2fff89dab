//! # Pinsry Support Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the support assistant.
//! It follows a two-layer approach:
//! - `SupportError`: a `thiserror` enum for the failures callers need to tell apart
//! - `Result<T>`: an alias for `anyhow::Result<T>` used by command plumbing
//!
//! Session operations return `SupportError` directly. `InvalidInput` and
//! `ConcurrentSubmission` are rejections, not failures: the session is untouched
//! and remains usable. Everything else in the binary flows through `anyhow` with
//! added context.
//!
//! ## Examples
//!
//! ```rust,ignore
//! match session.submit(text).await {
//!     Ok(reply) => println!("{}", reply.text),
//!     Err(SupportError::InvalidInput) => {} // nothing to send
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the support assistant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SupportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Message is empty.")]
    InvalidInput,

    #[error("A reply is still being prepared for this session.")]
    ConcurrentSubmission,

    #[error("Could not resolve a reply: {0}")]
    Resolution(String),

    #[error("Session '{id}' not found.")]
    SessionNotFound { id: String },

    #[error("Session limit of {limit} reached.")]
    SessionLimit { limit: usize },

    #[error("Invalid trigger pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },
}

impl SupportError {
    /// True for the two rejections that leave a session unchanged.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            SupportError::InvalidInput | SupportError::ConcurrentSubmission
        )
    }
}

/// Type alias for Result using anyhow::Error for application plumbing.
pub type Result<T> = anyhow::Result<T>;
