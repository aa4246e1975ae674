//! Dataset loading errors.

use thiserror::Error;

/// Errors raised while loading or validating a country table.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The table is not valid JSON for the record schema.
    #[error("failed to parse country table: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two records share the same capital.
    #[error("duplicate capital in country table: {0}")]
    DuplicateCapital(String),

    /// The table is too small to build a full candidate set.
    #[error("country table has {found} records, at least {minimum} are required")]
    TooSmall {
        /// Records present in the table.
        found: usize,
        /// Records required.
        minimum: usize,
    },
}
