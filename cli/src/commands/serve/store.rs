//! In-memory session registry for the HTTP adapter.

use super::config::ServeConfig;
use crate::core::error::SupportError;
use crate::responder::Responder;
use crate::session::{Resolver, Session};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

struct Entry {
    session: Arc<Session>,
    last_active: Instant,
}

/// Open sessions keyed by id, capped at `max_sessions`.
///
/// With an idle timeout set, sessions untouched for longer than it are closed
/// by `evict_idle`, which `create` runs before checking the cap.
///
/// Cloning is cheap; every clone shares the same map.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    responder: Arc<Responder>,
    resolver: Option<Arc<dyn Resolver>>,
    max_sessions: usize,
    idle_timeout: Option<Duration>,
    seed: Option<u64>,
    resolve_timeout: Option<Duration>,
}

impl SessionStore {
    pub fn new(responder: Arc<Responder>, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::default(),
            responder,
            resolver: None,
            max_sessions,
            idle_timeout: None,
            seed: None,
            resolve_timeout: None,
        }
    }

    pub fn from_config(config: &ServeConfig) -> Self {
        let mut store = Self::new(Arc::new(Responder::standard()), config.max_sessions);
        store.seed = config.seed;
        store.resolve_timeout = config.resolve_timeout;
        store.idle_timeout = config.session_idle;
        store
    }

    /// Closes sessions once they have been idle for `timeout`.
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Resolves replies of every new session through `resolver`.
    pub fn with_resolver(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout
    }

    /// Opens a new session.
    ///
    /// Fails with `SupportError::SessionLimit` once `max_sessions` are open
    /// after idle sessions have been closed.
    pub fn create(&self) -> Result<Arc<Session>, SupportError> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        self.evict_locked(&mut sessions);
        if sessions.len() >= self.max_sessions {
            warn!("Refusing new session: {} already open", sessions.len());
            return Err(SupportError::SessionLimit {
                limit: self.max_sessions,
            });
        }
        let mut builder = Session::builder()
            .responder(Arc::clone(&self.responder))
            .seed_opt(self.seed)
            .resolve_timeout(self.resolve_timeout);
        if let Some(resolver) = &self.resolver {
            builder = builder.resolver(Arc::clone(resolver));
        }
        let session = Arc::new(builder.build());
        sessions.insert(
            session.id(),
            Entry {
                session: Arc::clone(&session),
                last_active: Instant::now(),
            },
        );
        info!(session = %session.id(), open = sessions.len(), "Session opened");
        Ok(session)
    }

    /// Looks up a session by its textual id and marks it active.
    pub fn get(&self, id: &str) -> Result<Arc<Session>, SupportError> {
        let key = parse_id(id)?;
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        match sessions.get_mut(&key) {
            Some(entry) => {
                entry.last_active = Instant::now();
                Ok(Arc::clone(&entry.session))
            }
            None => Err(SupportError::SessionNotFound { id: id.to_string() }),
        }
    }

    /// Closes a session. Its history is discarded.
    pub fn remove(&self, id: &str) -> Result<(), SupportError> {
        let key = parse_id(id)?;
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
        match removed {
            Some(entry) => {
                info!(
                    session = %key,
                    turns = entry.session.history().turns(),
                    "Session closed"
                );
                Ok(())
            }
            None => Err(SupportError::SessionNotFound { id: id.to_string() }),
        }
    }

    /// Closes every session idle for longer than the idle timeout and returns
    /// how many were closed. Sessions awaiting a reply are kept.
    pub fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        self.evict_locked(&mut sessions)
    }

    fn evict_locked(&self, sessions: &mut HashMap<Uuid, Entry>) -> usize {
        let Some(timeout) = self.idle_timeout else {
            return 0;
        };
        let before = sessions.len();
        sessions.retain(|id, entry| {
            let keep = entry.session.is_awaiting() || entry.last_active.elapsed() <= timeout;
            if !keep {
                debug!(session = %id, "Closing idle session");
            }
            keep
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, open = sessions.len(), "Idle sessions closed");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }
}

fn parse_id(id: &str) -> Result<Uuid, SupportError> {
    Uuid::parse_str(id).map_err(|e| {
        debug!("Malformed session id '{}': {}", id, e);
        SupportError::SessionNotFound { id: id.to_string() }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(limit: usize) -> SessionStore {
        SessionStore::new(Arc::new(Responder::standard()), limit)
    }

    #[test]
    fn test_create_and_get() {
        let store = store(4);
        let session = store.create().unwrap();
        let found = store.get(&session.id().to_string()).unwrap();
        assert!(Arc::ptr_eq(&session, &found));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_limit_is_enforced() {
        let store = store(2);
        store.create().unwrap();
        let second = store.create().unwrap();
        assert_eq!(
            store.create().unwrap_err(),
            SupportError::SessionLimit { limit: 2 }
        );

        store.remove(&second.id().to_string()).unwrap();
        assert!(store.create().is_ok());
    }

    #[test]
    fn test_unknown_and_malformed_ids() {
        let store = store(1);
        let unknown = Uuid::new_v4().to_string();
        assert_eq!(
            store.get(&unknown).unwrap_err(),
            SupportError::SessionNotFound { id: unknown.clone() }
        );
        assert!(matches!(
            store.get("not-a-uuid"),
            Err(SupportError::SessionNotFound { .. })
        ));
        assert!(store.remove(&unknown).is_err());
    }

    #[test]
    fn test_clones_share_sessions() {
        let store = store(3);
        let clone = store.clone();
        store.create().unwrap();
        assert_eq!(clone.len(), 1);
        assert!(!clone.is_empty());
    }

    #[test]
    fn test_idle_sessions_free_their_slot() {
        let store = store(3).with_idle_timeout(Duration::from_millis(10));
        let abandoned: Vec<String> = (0..3)
            .map(|_| store.create().unwrap().id().to_string())
            .collect();
        std::thread::sleep(Duration::from_millis(30));

        assert!(store.create().is_ok());
        assert_eq!(store.len(), 1);
        for id in &abandoned {
            assert!(store.get(id).is_err());
        }
    }

    #[test]
    fn test_without_idle_timeout_abandoned_sessions_stay() {
        let store = store(3);
        for _ in 0..3 {
            store.create().unwrap();
        }
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(store.evict_idle(), 0);
        assert_eq!(
            store.create().unwrap_err(),
            SupportError::SessionLimit { limit: 3 }
        );
    }

    #[test]
    fn test_get_keeps_a_session_alive() {
        let store = store(2).with_idle_timeout(Duration::from_millis(200));
        let kept = store.create().unwrap().id().to_string();
        let dropped = store.create().unwrap().id().to_string();

        std::thread::sleep(Duration::from_millis(120));
        store.get(&kept).unwrap();
        std::thread::sleep(Duration::from_millis(120));

        assert_eq!(store.evict_idle(), 1);
        assert!(store.get(&kept).is_ok());
        assert!(store.get(&dropped).is_err());
    }
}
