//! Session repository abstraction.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use geoquiz_core::error::DomainError;
use uuid::Uuid;

use super::session::QuizSession;

/// Shared handle to a stored session. The mutex serializes every operation
/// on that one session.
pub type SessionHandle = Arc<Mutex<QuizSession>>;

/// Repository trait for creating, finding and removing live sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a new session and returns its handle.
    async fn create(&self, session: QuizSession) -> Result<SessionHandle, DomainError>;

    /// Finds a live session.
    async fn get(&self, session_id: Uuid) -> Result<Option<SessionHandle>, DomainError>;

    /// Removes a session. Returns `false` if it was already gone.
    async fn delete(&self, session_id: Uuid) -> Result<bool, DomainError>;
}

/// Locks a session for exclusive use.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if a previous holder panicked.
pub fn lock_session(handle: &SessionHandle) -> Result<MutexGuard<'_, QuizSession>, DomainError> {
    handle
        .lock()
        .map_err(|_| DomainError::Infrastructure("session lock poisoned".to_owned()))
}
