//! Routes for playing a quiz.

use std::str::FromStr;

use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::routing::{get, post};
use axum::{Json, Router};
use geoquiz_core::error::DomainError;
use geoquiz_dataset::Difficulty;
use geoquiz_quiz::application::command_handlers::{self, QuizStarted};
use geoquiz_quiz::application::query_handlers::{self, CurrentQuestionView, QuizSessionView};
use geoquiz_quiz::domain::commands;
use geoquiz_quiz::domain::hints::{HintKind, HintOutcome};
use geoquiz_quiz::domain::question::TIME_PER_QUESTION;
use geoquiz_quiz::domain::scoring::QuizResult;
use geoquiz_quiz::domain::session::{AnswerFeedback, QuestionQuantity};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /start.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartQuizRequest {
    /// `easy`, `medium` or `hard`.
    pub difficulty: String,
    /// One of 5, 10, 15 or 20.
    pub question_quantity: u32,
}

/// Request body for POST /{session_id}/answer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    /// Ordinal of the answered question.
    pub question_id: u32,
    /// Chosen capital; `null` when time ran out.
    #[serde(default)]
    pub selected_answer: Option<String>,
    /// Seconds spent, at most the question's time budget.
    pub time_spent: u32,
}

/// Request body for POST /{session_id}/hint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseHintRequest {
    /// Ordinal of the question the hint applies to.
    pub question_id: u32,
    /// `eliminate-alternative` or `show-fact`.
    pub hint_type: String,
}

/// Session id taken from the path. A malformed id is reported as a
/// validation error with the usual JSON error body.
#[derive(Debug, Clone, Copy)]
pub struct SessionId(pub Uuid);

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(session_id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                DomainError::Validation(format!(
                    "sessionId must be a UUID: {}",
                    rejection.body_text()
                ))
            })?;
        Ok(Self(session_id))
    }
}

fn parse_difficulty(raw: &str) -> Result<Difficulty, DomainError> {
    Difficulty::ALL
        .into_iter()
        .find(|d| d.as_str() == raw)
        .ok_or_else(|| {
            DomainError::Validation(format!(
                "difficulty must be one of easy, medium, hard; got {raw:?}"
            ))
        })
}

/// POST /start
#[instrument(skip(state, request), fields(difficulty = %request.difficulty, question_quantity = request.question_quantity))]
async fn start_quiz(
    State(state): State<AppState>,
    Json(request): Json<StartQuizRequest>,
) -> Result<Json<QuizStarted>, ApiError> {
    let command = commands::StartQuiz {
        correlation_id: Uuid::new_v4(),
        difficulty: parse_difficulty(&request.difficulty)?,
        question_quantity: QuestionQuantity::try_from(request.question_quantity)?,
    };

    info!(correlation_id = %command.correlation_id, "handling start_quiz command");

    let started = command_handlers::handle_start_quiz(
        &command,
        &state.dataset,
        state.clock.as_ref(),
        &state.rng,
        &*state.sessions,
    )
    .await?;

    Ok(Json(started))
}

/// GET /{session_id}
#[instrument(skip(state))]
async fn get_session(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<QuizSessionView>, ApiError> {
    let view = query_handlers::get_session_by_id(session_id, &*state.sessions).await?;
    Ok(Json(view))
}

/// GET /{session_id}/question
#[instrument(skip(state))]
async fn current_question(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<CurrentQuestionView>, ApiError> {
    let view = query_handlers::get_current_question(session_id, &*state.sessions).await?;
    Ok(Json(view))
}

/// POST /{session_id}/answer
#[instrument(skip(state, request), fields(question_id = request.question_id))]
async fn submit_answer(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(request): Json<SubmitAnswerRequest>,
) -> Result<Json<AnswerFeedback>, ApiError> {
    if request.time_spent > TIME_PER_QUESTION {
        return Err(DomainError::Validation(format!(
            "timeSpent must be between 0 and {TIME_PER_QUESTION}, got {}",
            request.time_spent
        ))
        .into());
    }

    let command = commands::SubmitAnswer {
        correlation_id: Uuid::new_v4(),
        session_id,
        question_ordinal: request.question_id,
        selected_answer: request.selected_answer,
        time_spent: request.time_spent,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_answer command");

    let feedback = command_handlers::handle_submit_answer(&command, &*state.sessions).await?;

    Ok(Json(feedback))
}

/// POST /{session_id}/hint
#[instrument(skip(state, request), fields(question_id = request.question_id, hint_type = %request.hint_type))]
async fn use_hint(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(request): Json<UseHintRequest>,
) -> Result<Json<HintOutcome>, ApiError> {
    let command = commands::UseHint {
        correlation_id: Uuid::new_v4(),
        session_id,
        question_ordinal: request.question_id,
        hint_kind: HintKind::from_str(&request.hint_type)?,
    };

    info!(correlation_id = %command.correlation_id, "handling use_hint command");

    let outcome = command_handlers::handle_use_hint(&command, &*state.sessions).await?;

    Ok(Json(outcome))
}

/// GET /{session_id}/results
#[instrument(skip(state))]
async fn results(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<QuizResult>, ApiError> {
    let command = commands::FinishQuiz {
        correlation_id: Uuid::new_v4(),
        session_id,
    };

    info!(correlation_id = %command.correlation_id, "handling finish_quiz command");

    let result =
        command_handlers::handle_finish_quiz(&command, state.clock.as_ref(), &*state.sessions)
            .await?;

    Ok(Json(result))
}

/// Returns the router for quiz sessions.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_quiz))
        .route("/{session_id}", get(get_session))
        .route("/{session_id}/question", get(current_question))
        .route("/{session_id}/answer", post(submit_answer))
        .route("/{session_id}/hint", post(use_hint))
        .route("/{session_id}/results", get(results))
}
