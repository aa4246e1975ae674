//! Points, accuracy and the final result of a quiz.

use chrono::{DateTime, Utc};
use geoquiz_dataset::Difficulty;
use serde::Serialize;
use uuid::Uuid;

use super::question::AnswerRecord;

/// Points awarded for a correct answer in the given tier.
#[must_use]
pub fn points_for(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 5,
        Difficulty::Medium => 10,
        Difficulty::Hard => 15,
    }
}

/// Percentage of correct answers rounded to one decimal place.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn accuracy_percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (correct as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Qualitative label for a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    /// 90% or better.
    Excellent,
    /// 70% or better.
    VeryGood,
    /// 50% or better.
    Good,
    /// Anything lower.
    KeepPracticing,
}

/// Minimum accuracy for each tier, highest first.
const PERFORMANCE_THRESHOLDS: [(f64, PerformanceTier); 4] = [
    (90.0, PerformanceTier::Excellent),
    (70.0, PerformanceTier::VeryGood),
    (50.0, PerformanceTier::Good),
    (0.0, PerformanceTier::KeepPracticing),
];

impl PerformanceTier {
    /// Picks the first tier whose threshold `accuracy` reaches.
    #[must_use]
    pub fn from_accuracy(accuracy: f64) -> Self {
        PERFORMANCE_THRESHOLDS
            .iter()
            .find(|(threshold, _)| accuracy >= *threshold)
            .map_or(PerformanceTier::KeepPracticing, |(_, tier)| *tier)
    }

    /// Message shown to the player.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "Excellent!",
            PerformanceTier::VeryGood => "Very good!",
            PerformanceTier::Good => "Good job!",
            PerformanceTier::KeepPracticing => "Keep practicing!",
        }
    }
}

/// Final, derived result of a completed quiz.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    /// The finished session.
    pub session_id: Uuid,
    /// Tier the quiz was played at.
    pub difficulty: Difficulty,
    /// Number of questions in the quiz.
    pub question_quantity: usize,
    /// Sum of points over all answers.
    pub total_score: u32,
    /// Number of correct answers.
    pub correct_answers: usize,
    /// Number of incorrect or timed-out answers.
    pub incorrect_answers: usize,
    /// Accuracy in percent, one decimal place.
    pub accuracy_percentage: f64,
    /// Performance tier derived from accuracy.
    pub performance: PerformanceTier,
    /// Message for the performance tier.
    pub performance_message: String,
    /// When the result was computed.
    pub completed_at: DateTime<Utc>,
}

impl QuizResult {
    /// Aggregates a set of answers into a result.
    #[must_use]
    pub fn tally(
        session_id: Uuid,
        difficulty: Difficulty,
        question_quantity: usize,
        answers: &[AnswerRecord],
        completed_at: DateTime<Utc>,
    ) -> Self {
        let total_score = answers.iter().map(|a| a.points_earned).sum();
        let correct_answers = answers.iter().filter(|a| a.is_correct).count();
        let incorrect_answers = answers.len() - correct_answers;
        let accuracy_percentage = accuracy_percentage(correct_answers, question_quantity);
        let performance = PerformanceTier::from_accuracy(accuracy_percentage);

        Self {
            session_id,
            difficulty,
            question_quantity,
            total_score,
            correct_answers,
            incorrect_answers,
            accuracy_percentage,
            performance,
            performance_message: performance.message().to_owned(),
            completed_at,
        }
    }
}
