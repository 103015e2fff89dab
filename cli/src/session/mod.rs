//! # Pinsry Support Conversation Session
//!
//! File: cli/src/session/mod.rs
//!
//! ## Overview
//!
//! A `Session` owns one conversation: its message history and the flag that
//! marks a reply as in flight. Each accepted `submit` appends exactly one user
//! message and exactly one assistant message.
//!
//! ## Architecture
//!
//! The submit pipeline runs in three phases:
//! 1. **Accept** (synchronous): reject empty input and submissions made while
//!    another reply is pending, then append the user turn and mark the session
//!    as awaiting.
//! 2. **Resolve** (the single suspension point): ask the `Resolver` for a reply,
//!    optionally bounded by a timeout. No match falls back to the default pool;
//!    a failure or timeout becomes the apology message.
//! 3. **Complete** (synchronous): append the assistant turn and clear the flag.
//!
//! Phase 3 is also run by a drop guard, so a submit future dropped during phase 2
//! still leaves a complete user/assistant pair behind.
//!
//! ## Examples
//!
//! ```rust
//! use pinsry_support::session::Session;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let session = Session::builder().seed(42).build();
//! let reply = session.submit("Can I save it for later?").await.unwrap();
//! assert_eq!(session.history().len(), 2);
//! assert!(reply.text.contains("Bookmark"));
//! # });
//! ```
//!
pub mod message;

pub use message::{History, Message, Role};

use crate::core::error::SupportError;
use crate::responder::{content, Reply, Responder};
use futures_util::future::{self, BoxFuture, FutureExt};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Produces the reply for an accepted user message.
///
/// `Ok(None)` means nothing matched and the session falls back to its default
/// pool. An `Err` is turned into the apology message.
pub trait Resolver: Send + Sync {
    fn resolve<'a>(
        &'a self,
        text: &'a str,
        rng: &'a mut (dyn RngCore + Send),
    ) -> BoxFuture<'a, Result<Option<Reply>, SupportError>>;
}

impl Resolver for Responder {
    fn resolve<'a>(
        &'a self,
        text: &'a str,
        rng: &'a mut (dyn RngCore + Send),
    ) -> BoxFuture<'a, Result<Option<Reply>, SupportError>> {
        future::ready(Ok(self.respond(text, &mut *rng))).boxed()
    }
}

#[derive(Debug, Default)]
struct SessionState {
    history: History,
    awaiting: bool,
}

/// One conversation with the assistant.
pub struct Session {
    id: Uuid,
    responder: Arc<Responder>,
    resolver: Arc<dyn Resolver>,
    resolve_timeout: Option<Duration>,
    state: Mutex<SessionState>,
    rng: tokio::sync::Mutex<StdRng>,
}

impl Session {
    /// A session over `responder` with an entropy-seeded random source.
    pub fn new(responder: Arc<Responder>) -> Self {
        Self::builder().responder(responder).build()
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Greeting shown when the conversation opens. It is not part of the history.
    pub fn welcome_message(&self) -> &'static str {
        content::WELCOME
    }

    /// Snapshot of the conversation so far.
    pub fn history(&self) -> History {
        self.state().history.clone()
    }

    pub fn is_awaiting(&self) -> bool {
        self.state().awaiting
    }

    /// Sends a user message and returns the assistant's reply.
    ///
    /// ## Errors
    ///
    /// * `SupportError::InvalidInput` if `text` is empty or only whitespace.
    /// * `SupportError::ConcurrentSubmission` if a previous submit has not finished.
    ///
    /// Both leave the history untouched. Resolution failures are not errors:
    /// they produce the apology reply, which is appended like any other.
    pub async fn submit(&self, text: &str) -> Result<Reply, SupportError> {
        let text = text.trim();
        if text.is_empty() {
            debug!(session = %self.id, "ignoring empty message");
            return Err(SupportError::InvalidInput);
        }

        let turn = self.begin_turn(text)?;
        let reply = self.resolve(text).await;
        turn.complete(&reply);

        info!(
            session = %self.id,
            kind = reply.kind.name(),
            category = ?reply.category(),
            "reply resolved"
        );
        Ok(reply)
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_turn(&self, text: &str) -> Result<TurnGuard<'_>, SupportError> {
        let mut state = self.state();
        if state.awaiting {
            warn!(session = %self.id, "rejecting message while a reply is pending");
            return Err(SupportError::ConcurrentSubmission);
        }
        state.awaiting = true;
        state.history.push(Message::user(text));
        Ok(TurnGuard {
            session: self,
            completed: false,
        })
    }

    fn finish_turn(&self, text: &str) {
        let mut state = self.state();
        state.history.push(Message::assistant(text));
        state.awaiting = false;
    }

    async fn resolve(&self, text: &str) -> Reply {
        let mut rng = self.rng.lock().await;
        let lookup = self.resolver.resolve(text, &mut *rng);
        let outcome = match self.resolve_timeout {
            Some(limit) => match tokio::time::timeout(limit, lookup).await {
                Ok(outcome) => outcome,
                Err(_) => Err(SupportError::Resolution(format!(
                    "no reply within {} ms",
                    limit.as_millis()
                ))),
            },
            None => lookup.await,
        };

        match outcome {
            Ok(Some(reply)) => reply,
            Ok(None) => {
                debug!(session = %self.id, "no rule matched, using default pool");
                self.responder.default_reply(&mut *rng)
            }
            Err(e) => {
                warn!(session = %self.id, "resolution failed: {}", e);
                Reply::apology()
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("resolve_timeout", &self.resolve_timeout)
            .field("state", &*self.state())
            .finish_non_exhaustive()
    }
}

/// Completes an accepted turn exactly once, with the apology if dropped early.
struct TurnGuard<'a> {
    session: &'a Session,
    completed: bool,
}

impl TurnGuard<'_> {
    fn complete(mut self, reply: &Reply) {
        self.session.finish_turn(&reply.text);
        self.completed = true;
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        if !self.completed {
            warn!(
                session = %self.session.id,
                "submit dropped before a reply was resolved"
            );
            self.session.finish_turn(content::APOLOGY);
        }
    }
}

/// Configures a [`Session`].
#[derive(Default)]
pub struct SessionBuilder {
    responder: Option<Arc<Responder>>,
    resolver: Option<Arc<dyn Resolver>>,
    seed: Option<u64>,
    resolve_timeout: Option<Duration>,
}

impl SessionBuilder {
    /// Rule table and default pool. Also the resolver unless one is set.
    pub fn responder(mut self, responder: Arc<Responder>) -> Self {
        self.responder = Some(responder);
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Fixes the random source so replies are reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn seed_opt(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Bounds the resolve phase. Unbounded by default.
    pub fn resolve_timeout(mut self, limit: Option<Duration>) -> Self {
        self.resolve_timeout = limit;
        self
    }

    pub fn build(self) -> Session {
        let responder = self
            .responder
            .unwrap_or_else(|| Arc::new(Responder::standard()));
        let resolver = self
            .resolver
            .unwrap_or_else(|| Arc::clone(&responder) as Arc<dyn Resolver>);
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let session = Session {
            id: Uuid::new_v4(),
            responder,
            resolver,
            resolve_timeout: self.resolve_timeout,
            state: Mutex::new(SessionState::default()),
            rng: tokio::sync::Mutex::new(rng),
        };
        debug!(session = %session.id, seeded = self.seed.is_some(), "session created");
        session
    }
}
