//! Fixture country tables with predictable names.

use geoquiz_dataset::{CountryRecord, Dataset, Difficulty};

/// Builds a table with the requested number of countries per tier.
///
/// Countries are named `"<Tier> Country <n>"` and their capitals
/// `"<Tier> Capital <n>"`, so tests can derive the right answer with
/// [`capital_for`].
///
/// # Panics
///
/// Panics if the counts add up to fewer than four records.
#[must_use]
pub fn fixture_dataset(easy: usize, medium: usize, hard: usize) -> Dataset {
    let mut records = Vec::with_capacity(easy + medium + hard);
    for (difficulty, count) in [
        (Difficulty::Easy, easy),
        (Difficulty::Medium, medium),
        (Difficulty::Hard, hard),
    ] {
        let tier = match difficulty {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        for n in 1..=count {
            records.push(CountryRecord {
                name: format!("{tier} Country {n}"),
                capital: format!("{tier} Capital {n}"),
                difficulty,
                fact: format!("{tier} Country {n} is a fixture."),
            });
        }
    }
    Dataset::from_records(records).expect("fixture dataset must be valid")
}

/// Returns the capital of a fixture country.
#[must_use]
pub fn capital_for(country: &str) -> String {
    country.replace("Country", "Capital")
}
