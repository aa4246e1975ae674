//! Country records and the read-only table that holds them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::difficulty::Difficulty;
use crate::error::DatasetError;

/// Smallest table that can still produce one correct and three incorrect
/// candidates for any question.
pub const MIN_COUNTRIES: usize = 4;

const EMBEDDED_COUNTRIES: &str = include_str!("../data/countries.json");

/// A single country entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Country name.
    #[serde(rename = "country")]
    pub name: String,
    /// Capital city; unique across the table.
    pub capital: String,
    /// Tier this country is asked in.
    pub difficulty: Difficulty,
    /// Short trivia shown by the fact hint.
    pub fact: String,
}

/// Immutable country table.
#[derive(Debug, Clone)]
pub struct Dataset {
    countries: Vec<CountryRecord>,
}

impl Dataset {
    /// Loads the table compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError` if the embedded table is malformed.
    pub fn embedded() -> Result<Self, DatasetError> {
        Self::from_json(EMBEDDED_COUNTRIES)
    }

    /// Parses a JSON array of country records.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Parse` on malformed JSON and the validation
    /// errors of [`Dataset::from_records`].
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let records: Vec<CountryRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Builds a table from records, checking that capitals are unique and
    /// that there are enough records to build candidate sets.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::TooSmall` or `DatasetError::DuplicateCapital`.
    pub fn from_records(countries: Vec<CountryRecord>) -> Result<Self, DatasetError> {
        if countries.len() < MIN_COUNTRIES {
            return Err(DatasetError::TooSmall {
                found: countries.len(),
                minimum: MIN_COUNTRIES,
            });
        }

        let mut seen = HashSet::with_capacity(countries.len());
        for country in &countries {
            if !seen.insert(country.capital.as_str()) {
                return Err(DatasetError::DuplicateCapital(country.capital.clone()));
            }
        }

        debug!(countries = countries.len(), "country table loaded");
        Ok(Self { countries })
    }

    /// Every record, in table order.
    #[must_use]
    pub fn countries(&self) -> &[CountryRecord] {
        &self.countries
    }

    /// Records of a single tier, in table order.
    #[must_use]
    pub fn by_difficulty(&self, difficulty: Difficulty) -> Vec<&CountryRecord> {
        self.countries
            .iter()
            .filter(|country| country.difficulty == difficulty)
            .collect()
    }

    /// Every capital in the table, across all tiers.
    pub fn capitals(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(|country| country.capital.as_str())
    }
}
