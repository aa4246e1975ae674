//! GeoQuiz — static country and capital dataset.
//!
//! The dataset is loaded once at process start and never mutated. Capitals
//! are guaranteed unique across the whole table.

mod country;
mod difficulty;
mod error;

pub use country::{CountryRecord, Dataset, MIN_COUNTRIES};
pub use difficulty::Difficulty;
pub use error::DatasetError;
