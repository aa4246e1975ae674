//! Command handlers for quiz sessions.
//!
//! Each handler looks the session up, runs one state transition under the
//! session's lock, and releases the lock before touching the repository
//! again.

use std::sync::Mutex;

use geoquiz_core::clock::Clock;
use geoquiz_core::command::Command;
use geoquiz_core::error::DomainError;
use geoquiz_core::rng::DeterministicRng;
use geoquiz_dataset::{Dataset, Difficulty};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::domain::commands::{FinishQuiz, StartQuiz, SubmitAnswer, UseHint};
use crate::domain::generator::generate_questions;
use crate::domain::hints::HintOutcome;
use crate::domain::repository::{SessionHandle, SessionRepository, lock_session};
use crate::domain::scoring::QuizResult;
use crate::domain::session::{AnswerFeedback, QuizSession};

/// Result of a successfully started quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStarted {
    /// The new session's identifier.
    pub id: Uuid,
    /// Tier the quiz is played at.
    pub difficulty: Difficulty,
    /// Number of questions generated.
    pub question_quantity: usize,
    /// Initial hint budget.
    pub hints_available: u32,
}

async fn find_session(
    session_id: Uuid,
    repo: &dyn SessionRepository,
) -> Result<SessionHandle, DomainError> {
    repo.get(session_id)
        .await?
        .ok_or(DomainError::SessionNotFound(session_id))
}

/// Handles the `StartQuiz` command: generates the questions, creates the
/// session, and stores it.
///
/// # Errors
///
/// Returns `DomainError::InsufficientData` if the dataset cannot supply the
/// requested questions, or a repository error if the session cannot be stored.
pub async fn handle_start_quiz(
    command: &StartQuiz,
    dataset: &Dataset,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    repo: &dyn SessionRepository,
) -> Result<QuizStarted, DomainError> {
    let count = command.question_quantity.get() as usize;
    let questions = {
        let mut rng = rng
            .lock()
            .map_err(|_| DomainError::Infrastructure("rng lock poisoned".to_owned()))?;
        generate_questions(dataset, command.difficulty, count, &mut *rng)?
    };

    let session = QuizSession::start(Uuid::new_v4(), command.difficulty, questions, clock.now());
    let started = QuizStarted {
        id: session.id(),
        difficulty: session.difficulty(),
        question_quantity: session.question_quantity(),
        hints_available: session.hints_available(),
    };

    repo.create(session).await?;

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        session_id = %started.id,
        difficulty = %started.difficulty,
        question_quantity = started.question_quantity,
        "quiz started"
    );
    Ok(started)
}

/// Handles the `SubmitAnswer` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound`, `DomainError::QuestionNotFound` or
/// `DomainError::AlreadyAnswered`.
pub async fn handle_submit_answer(
    command: &SubmitAnswer,
    repo: &dyn SessionRepository,
) -> Result<AnswerFeedback, DomainError> {
    let handle = find_session(command.session_id, repo).await?;
    let feedback = {
        let mut session = lock_session(&handle)?;
        session.submit_answer(
            command.question_ordinal,
            command.selected_answer.clone(),
            command.time_spent,
        )?
    };

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        session_id = %command.session_id,
        ordinal = command.question_ordinal,
        is_correct = feedback.is_correct,
        "answer recorded"
    );
    Ok(feedback)
}

/// Handles the `UseHint` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound`, `DomainError::NoHintsAvailable` or
/// `DomainError::QuestionNotFound`.
pub async fn handle_use_hint(
    command: &UseHint,
    repo: &dyn SessionRepository,
) -> Result<HintOutcome, DomainError> {
    let handle = find_session(command.session_id, repo).await?;
    let outcome = {
        let mut session = lock_session(&handle)?;
        session.use_hint(command.question_ordinal, command.hint_kind)?
    };

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        session_id = %command.session_id,
        ordinal = command.question_ordinal,
        hint_kind = %command.hint_kind,
        hints_remaining = outcome.hints_remaining,
        "hint used"
    );
    Ok(outcome)
}

/// Handles the `FinishQuiz` command: computes the result and deletes the
/// session.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session is absent or was
/// finished concurrently, and `DomainError::QuizIncomplete` while questions
/// remain unanswered.
pub async fn handle_finish_quiz(
    command: &FinishQuiz,
    clock: &dyn Clock,
    repo: &dyn SessionRepository,
) -> Result<QuizResult, DomainError> {
    let handle = find_session(command.session_id, repo).await?;
    let result = {
        let mut session = lock_session(&handle)?;
        session.finish(clock.now())?
    };

    repo.delete(command.session_id).await?;

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        session_id = %command.session_id,
        total_score = result.total_score,
        accuracy = result.accuracy_percentage,
        "quiz finished"
    );
    Ok(result)
}
