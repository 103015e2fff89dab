//! # Pinsry Support HTTP Server Implementation
//!
//! File: cli/src/commands/serve/server_logic.rs
//!
//! ## Overview
//!
//! The JSON API used by the web widget:
//!
//! | Method   | Path                          | Result                                      |
//! |----------|-------------------------------|---------------------------------------------|
//! | `POST`   | `/api/sessions`               | 201 `{id, welcome}`, 503 at the limit        |
//! | `POST`   | `/api/sessions/{id}/messages` | 200 `{reply, html, category, kind}`          |
//! | `GET`    | `/api/sessions/{id}/messages` | 200 array of messages                        |
//! | `DELETE` | `/api/sessions/{id}`          | 204                                          |
//! | `GET`    | `/api/health`                 | 200 `ok`                                     |
//!
//! Posting an empty message returns 204 and changes nothing. Posting while
//! the previous reply of the same session is still pending returns 409.
//! Unknown session ids return 404. With a static directory configured, every
//! other path is served from it.
//!
//! ## Architecture
//!
//! 1. Set up the Axum router with the API routes, static fallback and middleware
//! 2. Find an available port if the requested one is in use
//! 3. Start the server with graceful shutdown handlers
//! 4. Display connection information
//!
use super::config::ServeConfig;
use super::store::SessionStore;
use crate::core::error::{Result, SupportError};
use crate::render;
use crate::responder::Reply;
use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, error, info, warn, Level};

#[derive(Serialize, Debug)]
struct SessionCreated {
    id: String,
    welcome: &'static str,
}

#[derive(Deserialize, Debug)]
struct MessageRequest {
    text: String,
}

#[derive(Serialize, Debug)]
struct ReplyBody {
    reply: String,
    html: String,
    category: Option<&'static str>,
    kind: &'static str,
}

impl From<Reply> for ReplyBody {
    fn from(reply: Reply) -> Self {
        Self {
            html: render::to_html(&reply.text),
            category: reply.category().map(|c| c.name()),
            kind: reply.kind.name(),
            reply: reply.text,
        }
    }
}

#[derive(Serialize, Debug)]
struct ErrorBody {
    error: String,
}

/// A `SupportError` turned into an HTTP status and a JSON body.
#[derive(Debug)]
struct ApiError(SupportError);

impl From<SupportError> for ApiError {
    fn from(err: SupportError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SupportError::SessionNotFound { .. } => StatusCode::NOT_FOUND,
            SupportError::ConcurrentSubmission => StatusCode::CONFLICT,
            SupportError::SessionLimit { .. } => StatusCode::SERVICE_UNAVAILABLE,
            SupportError::InvalidInput => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!("Request failed: {}", self.0);
        } else {
            debug!("Request rejected: {}", self.0);
        }
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn create_session(
    State(store): State<SessionStore>,
) -> std::result::Result<(StatusCode, Json<SessionCreated>), ApiError> {
    let session = store.create()?;
    let body = SessionCreated {
        id: session.id().to_string(),
        welcome: session.welcome_message(),
    };
    Ok((StatusCode::CREATED, Json(body)))
}

async fn post_message(
    State(store): State<SessionStore>,
    Path(id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> std::result::Result<Response, ApiError> {
    let session = store.get(&id)?;
    match session.submit(&request.text).await {
        Ok(reply) => Ok(Json(ReplyBody::from(reply)).into_response()),
        Err(SupportError::InvalidInput) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(e) => Err(e.into()),
    }
}

async fn list_messages(
    State(store): State<SessionStore>,
    Path(id): Path<String>,
) -> std::result::Result<Response, ApiError> {
    let session = store.get(&id)?;
    Ok(Json(session.history()).into_response())
}

async fn delete_session(
    State(store): State<SessionStore>,
    Path(id): Path<String>,
) -> std::result::Result<StatusCode, ApiError> {
    store.remove(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// # Create Axum Application (`create_app`)
///
/// Builds the router with the API routes, the optional static file fallback,
/// and the tracing and CORS middleware.
pub fn create_app(config: &ServeConfig, store: SessionStore) -> Router {
    // --- Middleware ---
    let cors_layer = if config.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // --- API routes ---
    let api = Router::new()
        .route("/api/health", get(health))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", delete(delete_session))
        .route(
            "/api/sessions/{id}/messages",
            get(list_messages).post(post_message),
        )
        .with_state(store);

    // --- Static widget files ---
    let app = match &config.static_dir {
        Some(dir) => {
            info!("Serving static files from {}", dir.display());
            api.fallback_service(ServeDir::new(dir))
        }
        None => api,
    };

    app.layer(
        ServiceBuilder::new()
            .layer(trace_layer)
            .layer(cors_layer),
    )
}

/// # Run HTTP Server (`run_server`)
///
/// Binds the first free port at or after `config.port`, prints the server
/// details and serves until a shutdown signal arrives.
///
/// ## Errors
///
/// Fails if no port is available within the attempt range, if binding the
/// listener fails, or if the server itself stops with an error.
pub async fn run_server(config: ServeConfig) -> Result<()> {
    let max_port_attempts = 10;
    let addr = find_available_port(config.host, config.port, max_port_attempts).await?;

    let store = SessionStore::from_config(&config);
    let sweeper = spawn_idle_sweeper(store.clone());
    let app = create_app(&config, store);

    // --- Server banner ---
    println!("\n=================================================================");
    println!("💬 Pinsry support assistant");
    println!("🌐 Local URL:         http://localhost:{}", addr.port());
    println!("⚙️  Binding to address: {}", addr);
    match &config.static_dir {
        Some(dir) => println!("📂 Widget files:      {}", dir.display()),
        None => println!("📂 Widget files:      (none, API only)"),
    }
    println!("🔒 CORS enabled:      {}", config.enable_cors);
    println!("👥 Session limit:     {}", config.max_sessions);
    match config.session_idle {
        Some(idle) => println!("⏱️  Idle sessions close after {}s", idle.as_secs()),
        None => println!("⏱️  Idle sessions stay open"),
    }
    println!("=================================================================\n");

    info!("Starting server on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    // --- Serve until shutdown ---
    let served = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Some(handle) = sweeper {
        handle.abort();
    }
    served.context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// # Spawn Idle Sweeper (`spawn_idle_sweeper`)
///
/// Closes idle sessions on a timer so they are reclaimed even when no new
/// session is being created. Returns `None` when the store has no idle timeout.
fn spawn_idle_sweeper(store: SessionStore) -> Option<JoinHandle<()>> {
    let timeout = store.idle_timeout()?;
    let period = (timeout / 4).clamp(Duration::from_millis(10), Duration::from_secs(60));
    debug!("Sweeping idle sessions every {:?}", period);
    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            store.evict_idle();
        }
    }))
}

/// # Handle Shutdown Signal (`shutdown_signal`)
///
/// Resolves on Ctrl+C, or on SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Find Available Port (`find_available_port`)
///
/// Tries `start_port` and up to `max_attempts - 1` following ports, returning
/// the first address that can be bound.
async fn find_available_port(
    req_host: IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<SocketAddr> {
    let mut current_port = start_port;

    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(req_host, current_port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, successfully bound to available port {}.",
                        start_port, current_port
                    );
                }
                return Ok(addr);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable (Error: {}). Trying next port...",
                    attempt + 1,
                    current_port,
                    req_host,
                    e
                );
                current_port = match current_port.checked_add(1) {
                    Some(port) => port,
                    None => break,
                };
            }
        }
    }

    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        req_host,
        start_port,
        max_attempts
    )
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::{content, Category, ReplyKind, Responder};
    use std::net::Ipv4Addr;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_find_available_port_start_is_free() -> Result<()> {
        let host = Ipv4Addr::LOCALHOST.into();
        let start_port = 50123;

        let addr = find_available_port(host, start_port, 5).await?;

        assert_eq!(addr.port(), start_port);
        assert_eq!(addr.ip(), host);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_available_port_start_occupied() -> Result<()> {
        let host = Ipv4Addr::LOCALHOST.into();
        let start_port = 51123;
        let _listener = TcpListener::bind(SocketAddr::new(host, start_port)).await?;

        let addr = find_available_port(host, start_port, 5).await?;

        assert!(addr.port() > start_port);
        assert!(addr.port() < start_port + 5);
        Ok(())
    }

    #[test]
    fn test_reply_body_carries_html_and_category() {
        let body = ReplyBody::from(Reply {
            kind: ReplyKind::Matched(Category::Bookmarks),
            text: content::BOOKMARKS.to_string(),
        });
        assert_eq!(body.category, Some("bookmarks"));
        assert_eq!(body.kind, "matched");
        assert!(body.html.contains("<strong>How to Bookmark:</strong>"));
        assert!(body.html.contains("<br>"));
        assert_eq!(body.reply, content::BOOKMARKS);
    }

    #[test]
    fn test_api_error_status_codes() {
        let cases = [
            (
                SupportError::SessionNotFound { id: "x".into() },
                StatusCode::NOT_FOUND,
            ),
            (SupportError::ConcurrentSubmission, StatusCode::CONFLICT),
            (
                SupportError::SessionLimit { limit: 1 },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                SupportError::Resolution("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_idle_sweeper_closes_abandoned_sessions() {
        let store = SessionStore::new(Arc::new(Responder::standard()), 4)
            .with_idle_timeout(Duration::from_millis(20));
        store.create().unwrap();
        store.create().unwrap();

        let handle = spawn_idle_sweeper(store.clone()).unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        handle.abort();

        assert!(store.is_empty());
    }

    #[test]
    fn test_no_sweeper_without_idle_timeout() {
        let store = SessionStore::new(Arc::new(Responder::standard()), 4);
        assert!(spawn_idle_sweeper(store).is_none());
    }
}
