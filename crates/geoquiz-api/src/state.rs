//! Shared application state.

use std::fmt;
use std::sync::{Arc, Mutex};

use geoquiz_core::clock::Clock;
use geoquiz_core::rng::DeterministicRng;
use geoquiz_dataset::Dataset;
use geoquiz_quiz::domain::repository::SessionRepository;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for session timestamps.
    pub clock: Arc<dyn Clock>,
    /// Random source for question generation.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Live quiz sessions.
    pub sessions: Arc<dyn SessionRepository>,
    /// The country table questions are drawn from.
    pub dataset: Arc<Dataset>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("countries", &self.dataset.countries().len())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        sessions: Arc<dyn SessionRepository>,
        dataset: Arc<Dataset>,
    ) -> Self {
        Self {
            clock,
            rng,
            sessions,
            dataset,
        }
    }
}
