//! GeoQuiz API server entry point.

use std::sync::{Arc, Mutex};

use geoquiz_api::config::ApiConfig;
use geoquiz_api::error::AppError;
use geoquiz_api::state::AppState;
use geoquiz_api::{routes, telemetry};
use geoquiz_core::clock::{Clock, SystemClock};
use geoquiz_core::rng::{DeterministicRng, StdRngSource};
use geoquiz_dataset::Dataset;
use geoquiz_quiz::store::InMemorySessionRepository;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = ApiConfig::from_env()?;
    let telemetry = telemetry::init(&config)?;

    tracing::info!("Starting GeoQuiz API server");

    let dataset = Dataset::embedded()?;
    tracing::info!(countries = dataset.countries().len(), "country table loaded");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = match config.rng_seed {
        Some(seed) => {
            tracing::warn!(seed, "using a fixed RNG seed");
            Arc::new(Mutex::new(StdRngSource::seeded(seed)))
        }
        None => Arc::new(Mutex::new(StdRngSource::from_os_rng())),
    };
    let sessions = Arc::new(InMemorySessionRepository::new(
        config.session_store,
        Arc::clone(&clock),
    ));
    let app_state = AppState::new(clock, rng, sessions, Arc::new(dataset));

    let app = routes::app(app_state);

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("GeoQuiz API server stopped");
    telemetry.shutdown();

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
