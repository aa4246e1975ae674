//! HTTP routes.

pub mod health;
pub mod quiz;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with an explicit origin list once the web client is hosted.
    Router::new()
        .merge(health::router())
        .nest("/api/v1/quiz", quiz::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
