//! In-memory implementation of the `SessionRepository` trait.
//!
//! Sessions live only as long as the process. Abandoned sessions are bounded
//! by an optional time-to-live and an optional capacity; expired entries are
//! invisible to lookups and purged whenever a new session is created.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use geoquiz_core::clock::Clock;
use geoquiz_core::error::DomainError;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::repository::{SessionHandle, SessionRepository};
use crate::domain::session::QuizSession;

/// Default lifetime of a session.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 2 * 60 * 60;

/// Default maximum number of live sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Eviction limits for [`InMemorySessionRepository`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStoreConfig {
    /// How long a session stays reachable after creation. `None` keeps
    /// sessions until they finish.
    pub ttl: Option<Duration>,
    /// Upper bound on live sessions. `None` means unbounded.
    pub max_sessions: Option<usize>,
}

impl SessionStoreConfig {
    /// No expiry and no capacity bound.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            ttl: None,
            max_sessions: None,
        }
    }
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self {
            ttl: Some(Duration::seconds(DEFAULT_SESSION_TTL_SECS)),
            max_sessions: Some(DEFAULT_MAX_SESSIONS),
        }
    }
}

#[derive(Debug)]
struct StoredSession {
    handle: SessionHandle,
    created_at: DateTime<Utc>,
}

/// Session table guarded by a read-write lock. The table lock is only held
/// for map operations; per-session work happens under the session's own
/// mutex.
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<Uuid, StoredSession>>,
    config: SessionStoreConfig,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for InMemorySessionRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemorySessionRepository")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn poisoned() -> DomainError {
    DomainError::Infrastructure("session table lock poisoned".to_owned())
}

impl InMemorySessionRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new(config: SessionStoreConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
            clock,
        }
    }

    fn is_expired(&self, stored: &StoredSession) -> bool {
        self.config
            .ttl
            .is_some_and(|ttl| self.clock.elapsed_since(stored.created_at) >= ttl)
    }

    /// Drops every expired session and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the table lock is poisoned.
    pub fn purge_expired(&self) -> Result<usize, DomainError> {
        let mut sessions = self.sessions.write().map_err(|_| poisoned())?;
        Ok(self.purge_locked(&mut sessions))
    }

    fn purge_locked(&self, sessions: &mut HashMap<Uuid, StoredSession>) -> usize {
        let before = sessions.len();
        sessions.retain(|_, stored| !self.is_expired(stored));
        let purged = before - sessions.len();
        if purged > 0 {
            warn!(purged, "expired quiz sessions evicted");
        }
        purged
    }

    /// Number of sessions in the table, including expired ones not yet purged.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the table lock is poisoned.
    pub fn len(&self) -> Result<usize, DomainError> {
        Ok(self.sessions.read().map_err(|_| poisoned())?.len())
    }

    /// Whether the table holds no sessions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the table lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: QuizSession) -> Result<SessionHandle, DomainError> {
        let session_id = session.id();
        let created_at = session.started_at();
        let mut sessions = self.sessions.write().map_err(|_| poisoned())?;

        self.purge_locked(&mut sessions);
        if let Some(max) = self.config.max_sessions.filter(|max| sessions.len() >= *max) {
            warn!(max, "quiz session limit reached");
            return Err(DomainError::SessionLimitReached(max));
        }
        if sessions.contains_key(&session_id) {
            return Err(DomainError::Infrastructure(format!(
                "duplicate session id {session_id}"
            )));
        }

        let handle: SessionHandle = Arc::new(Mutex::new(session));
        sessions.insert(
            session_id,
            StoredSession {
                handle: Arc::clone(&handle),
                created_at,
            },
        );
        debug!(%session_id, live = sessions.len(), "session stored");
        Ok(handle)
    }

    async fn get(&self, session_id: Uuid) -> Result<Option<SessionHandle>, DomainError> {
        let sessions = self.sessions.read().map_err(|_| poisoned())?;
        Ok(sessions
            .get(&session_id)
            .filter(|stored| !self.is_expired(stored))
            .map(|stored| Arc::clone(&stored.handle)))
    }

    async fn delete(&self, session_id: Uuid) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().map_err(|_| poisoned())?;
        let removed = sessions.remove(&session_id).is_some();
        debug!(%session_id, removed, "session deleted");
        Ok(removed)
    }
}
