//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
///
/// Every variant is a caller-recoverable condition; the boundary layer decides
/// how each kind is reported over the wire.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No live session exists for the identifier.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// The session has no question with the given ordinal.
    #[error("question {ordinal} not found in session {session_id}")]
    QuestionNotFound {
        /// The session that was searched.
        session_id: Uuid,
        /// The requested 1-based ordinal.
        ordinal: u32,
    },

    /// Every question of the session has already been answered.
    #[error("all questions of session {0} have already been answered")]
    QuizCompleted(Uuid),

    /// Results were requested before every question was answered.
    #[error("quiz {session_id} is not complete: {answered} of {expected} questions answered")]
    QuizIncomplete {
        /// The session whose results were requested.
        session_id: Uuid,
        /// Number of answers recorded so far.
        answered: usize,
        /// Number of questions in the session.
        expected: usize,
    },

    /// An answer for this question was already recorded.
    #[error("question {ordinal} of session {session_id} has already been answered")]
    AlreadyAnswered {
        /// The session the answer was submitted to.
        session_id: Uuid,
        /// The 1-based ordinal of the question.
        ordinal: u32,
    },

    /// The session's hint budget is exhausted.
    #[error("no hints available in session {0}")]
    NoHintsAvailable(Uuid),

    /// The requested hint kind is not one the engine supports.
    #[error("invalid hint kind: {0}")]
    InvalidHintKind(String),

    /// The dataset cannot satisfy the requested tier and question count.
    #[error("not enough countries for difficulty {tier}: available {available}, requested {requested}")]
    InsufficientData {
        /// The difficulty tier that was filtered on.
        tier: String,
        /// Number of countries in that tier.
        available: usize,
        /// Number of questions requested.
        requested: usize,
    },

    /// A validation error in boundary input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The session store is at capacity.
    #[error("session limit reached: at most {0} active sessions")]
    SessionLimitReached(usize),

    /// An infrastructure error (for example a poisoned lock).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
