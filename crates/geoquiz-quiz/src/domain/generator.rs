//! Question generation.
//!
//! Countries are drawn without replacement from the requested tier. Each
//! question's wrong candidates are sampled from the capitals of the whole
//! table, so a hard question may offer easy-tier capitals as distractors.

use geoquiz_core::error::DomainError;
use geoquiz_core::rng::{DeterministicRng, sample, shuffle};
use geoquiz_dataset::{CountryRecord, Dataset, Difficulty};
use tracing::debug;

use super::question::{CANDIDATES_PER_QUESTION, Question, TIME_PER_QUESTION};

/// Builds `count` questions for `difficulty`.
///
/// # Errors
///
/// Returns `DomainError::InsufficientData` if the tier has fewer than `count`
/// countries, and `DomainError::Validation` if `count` is zero.
pub fn generate_questions(
    dataset: &Dataset,
    difficulty: Difficulty,
    count: usize,
    rng: &mut dyn DeterministicRng,
) -> Result<Vec<Question>, DomainError> {
    if count == 0 {
        return Err(DomainError::Validation(
            "question count must be positive".to_owned(),
        ));
    }

    let mut eligible = dataset.by_difficulty(difficulty);
    if eligible.len() < count {
        return Err(DomainError::InsufficientData {
            tier: difficulty.to_string(),
            available: eligible.len(),
            requested: count,
        });
    }

    shuffle(&mut eligible, rng);
    eligible.truncate(count);

    let capitals: Vec<&str> = dataset.capitals().collect();
    let mut questions = Vec::with_capacity(count);
    for (country, ordinal) in eligible.into_iter().zip(1u32..) {
        let candidates = build_candidates(&country.capital, &capitals, rng);
        questions.push(to_question(country, ordinal, candidates));
    }

    debug!(%difficulty, count, "questions generated");
    Ok(questions)
}

/// Correct capital plus three distinct distractors, in random order.
fn build_candidates(
    correct: &str,
    capitals: &[&str],
    rng: &mut dyn DeterministicRng,
) -> Vec<String> {
    let distractors: Vec<&str> = capitals
        .iter()
        .copied()
        .filter(|capital| *capital != correct)
        .collect();

    let mut candidates = Vec::with_capacity(CANDIDATES_PER_QUESTION);
    candidates.push(correct.to_owned());
    candidates.extend(
        sample(&distractors, CANDIDATES_PER_QUESTION - 1, rng)
            .into_iter()
            .map(str::to_owned),
    );
    shuffle(&mut candidates, rng);
    candidates
}

fn to_question(country: &CountryRecord, ordinal: u32, candidates: Vec<String>) -> Question {
    Question {
        ordinal,
        country: country.name.clone(),
        correct_capital: country.capital.clone(),
        candidates,
        fact: country.fact.clone(),
        time_budget: TIME_PER_QUESTION,
    }
}
