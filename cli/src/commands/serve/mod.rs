//! # Pinsry Support HTTP Server
//!
//! File: cli/src/commands/serve/mod.rs
//!
//! ## Overview
//!
//! Serves the assistant to the web widget over a small JSON API. Every widget
//! opens its own session; the server keeps the sessions in memory until they
//! are deleted or the process stops.
//!
//! ## Architecture
//!
//! - `config.rs`: command-line arguments merged over the `[server]` section
//! - `store.rs`: the in-memory session registry with its size limit
//! - `server_logic.rs`: the Axum router, request handlers, and server lifecycle
//!
//! ## Examples
//!
//! ```bash
//! # API only, on the configured port
//! pinsry serve
//!
//! # Also serve the widget's static files, listening on all interfaces
//! pinsry serve --host 0.0.0.0 --port 9000 --static-dir ./widget
//! ```
//!
//! Server startup flow:
//! 1. Merge command-line flags over the loaded configuration
//! 2. Find an available port (if the requested one is in use)
//! 3. Build the router with the API routes and optional static fallback
//! 4. Display the server URLs and serve until Ctrl+C or SIGTERM
//!
use crate::core::config::Config;
use crate::core::error::Result;
use tracing::info;

pub use config::{ServeArgs, ServeConfig};
pub use server_logic::create_app;
pub use store::SessionStore;

/// Merges command-line flags with the `[server]` configuration.
pub mod config;

/// Contains the Axum-based HTTP server implementation.
pub mod server_logic;

/// In-memory session registry shared by the request handlers.
pub mod store;

/// # Handle Serve Command (`handle_serve`)
///
/// Entry point for `pinsry serve`: resolves the effective server settings and
/// runs the server until shutdown.
pub async fn handle_serve(args: ServeArgs, config: &Config) -> Result<()> {
    info!("Handling serve command with args: {:?}", args);

    let serve_config = config::resolve_serve_config(&args, config)?;
    info!("Effective server config: {:?}", serve_config);

    server_logic::run_server(serve_config).await?;
    Ok(())
}
