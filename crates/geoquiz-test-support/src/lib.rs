//! Shared test mocks and fixtures for the GeoQuiz engine.

mod clock;
mod dataset;
mod rng;

pub use clock::{FixedClock, ManualClock};
pub use dataset::{capital_for, fixture_dataset};
pub use rng::{MockRng, SequenceRng};
