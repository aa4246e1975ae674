//! Query handlers for quiz sessions.
//!
//! These handlers read a session under its lock and return read-only view
//! DTOs. Views never expose the correct capital or the fact of an unanswered
//! question.

use chrono::{DateTime, Utc};
use geoquiz_core::error::DomainError;
use geoquiz_dataset::Difficulty;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::domain::question::Question;
use crate::domain::repository::{SessionRepository, lock_session};
use crate::domain::session::QuizPhase;

/// Client-facing view of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    /// 1-based ordinal; clients send it back as `questionId`.
    #[serde(rename = "id")]
    pub ordinal: u32,
    /// Country being asked about.
    pub country: String,
    /// Candidates in display order.
    pub alternatives: Vec<String>,
    /// Seconds allowed for the question.
    pub time_remaining: u32,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        Self {
            ordinal: question.ordinal,
            country: question.country.clone(),
            alternatives: question.candidates().to_vec(),
            time_remaining: question.time_budget,
        }
    }
}

/// The question to answer next, with progress.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentQuestionView {
    /// The question at the cursor.
    pub question: QuestionView,
    /// Progress string, e.g. `"2 of 5"`.
    pub progress: String,
    /// Remaining hint budget.
    pub hints_available: u32,
}

/// Read-only summary of a live session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSessionView {
    /// The session identifier.
    pub id: Uuid,
    /// Tier the quiz is played at.
    pub difficulty: Difficulty,
    /// Number of questions.
    pub question_quantity: usize,
    /// Remaining hint budget.
    pub hints_available: u32,
    /// Answers recorded so far.
    pub answered_count: usize,
    /// When the session started.
    pub started_at: DateTime<Utc>,
}

/// Retrieves the current question of a session.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if no live session exists and
/// `DomainError::QuizCompleted` once every question is answered.
pub async fn get_current_question(
    session_id: Uuid,
    repo: &dyn SessionRepository,
) -> Result<CurrentQuestionView, DomainError> {
    let handle = repo
        .get(session_id)
        .await?
        .ok_or(DomainError::SessionNotFound(session_id))?;
    let current = lock_session(&handle)?.current_question()?;

    debug!(%session_id, ordinal = current.question.ordinal, "current question read");
    Ok(CurrentQuestionView {
        question: QuestionView::from(&current.question),
        progress: current.progress,
        hints_available: current.hints_available,
    })
}

/// Retrieves a session summary by its ID.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if no live session exists.
pub async fn get_session_by_id(
    session_id: Uuid,
    repo: &dyn SessionRepository,
) -> Result<QuizSessionView, DomainError> {
    let handle = repo
        .get(session_id)
        .await?
        .ok_or(DomainError::SessionNotFound(session_id))?;
    let session = lock_session(&handle)?;
    if session.phase() == QuizPhase::Completed {
        return Err(DomainError::SessionNotFound(session_id));
    }

    Ok(QuizSessionView {
        id: session.id(),
        difficulty: session.difficulty(),
        question_quantity: session.question_quantity(),
        hints_available: session.hints_available(),
        answered_count: session.answers().len(),
        started_at: session.started_at(),
    })
}
