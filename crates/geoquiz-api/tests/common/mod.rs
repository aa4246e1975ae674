//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use geoquiz_core::clock::Clock;
use geoquiz_core::rng::DeterministicRng;
use geoquiz_dataset::Dataset;
use geoquiz_quiz::store::{InMemorySessionRepository, SessionStoreConfig};
use geoquiz_test_support::{FixedClock, MockRng, capital_for, fixture_dataset};
use http_body_util::BodyExt;
use tower::ServiceExt;

use geoquiz_api::routes;
use geoquiz_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build state over the fixture dataset (20 easy, 20 medium, 15 hard) with
/// an unbounded store and deterministic Clock/RNG.
pub fn test_state() -> AppState {
    test_state_with(fixture_dataset(20, 20, 15), SessionStoreConfig::unbounded())
}

/// Build state over a custom dataset and store configuration.
pub fn test_state_with(dataset: Dataset, store: SessionStoreConfig) -> AppState {
    let clock = fixed_clock();
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
    let sessions = Arc::new(InMemorySessionRepository::new(store, Arc::clone(&clock)));
    AppState::new(clock, rng, sessions, Arc::new(dataset))
}

/// Build the full app router. Uses the same route structure as `main.rs`.
pub fn build_test_app(state: &AppState) -> Router {
    routes::app(state.clone())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Start a quiz and return its session id as a string.
pub async fn start_quiz(state: &AppState, difficulty: &str, quantity: u32) -> String {
    let (status, json) = post_json(
        build_test_app(state),
        "/api/v1/quiz/start",
        &serde_json::json!({ "difficulty": difficulty, "questionQuantity": quantity }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "start failed: {json}");
    json["id"].as_str().unwrap().to_string()
}

/// Fetch the current question and return the body.
pub async fn current_question(state: &AppState, session_id: &str) -> serde_json::Value {
    let (status, json) = get_json(
        build_test_app(state),
        &format!("/api/v1/quiz/{session_id}/question"),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "question failed: {json}");
    json
}

/// Answer the current question, correctly or with the first wrong
/// alternative, and return the feedback body.
pub async fn answer_current(
    state: &AppState,
    session_id: &str,
    correct: bool,
) -> serde_json::Value {
    let question = current_question(state, session_id).await;
    let ordinal = question["question"]["id"].as_u64().unwrap();
    let capital = capital_for(question["question"]["country"].as_str().unwrap());
    let selected = if correct {
        capital
    } else {
        question["question"]["alternatives"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .find(|alt| *alt != capital)
            .unwrap()
    };

    let (status, json) = post_json(
        build_test_app(state),
        &format!("/api/v1/quiz/{session_id}/answer"),
        &serde_json::json!({
            "questionId": ordinal,
            "selectedAnswer": selected,
            "timeSpent": 10,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "answer failed: {json}");
    json
}
