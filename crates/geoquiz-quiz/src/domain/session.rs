//! The quiz session aggregate and its state machine.
//!
//! A session is `Active` from the moment it is stored until its results are
//! taken, at which point it becomes `Completed` and is removed from the store.
//! Configuration never outlives the start command, so it has no stored phase.

use chrono::{DateTime, Utc};
use geoquiz_core::error::DomainError;
use geoquiz_dataset::Difficulty;
use serde::Serialize;
use uuid::Uuid;

use super::hints::{HintKind, HintOutcome, HintPayload, INITIAL_HINTS};
use super::question::{AnswerRecord, Question};
use super::scoring::{QuizResult, points_for};

/// A supported number of questions per quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionQuantity(u32);

impl QuestionQuantity {
    /// Quiz lengths a client may choose.
    pub const SUPPORTED: [u32; 4] = [5, 10, 15, 20];

    /// The number of questions.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for QuestionQuantity {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if Self::SUPPORTED.contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::Validation(format!(
                "question quantity must be one of {:?}, got {value}",
                Self::SUPPORTED
            )))
        }
    }
}

/// Lifecycle phase of a stored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    /// Questions are being answered.
    Active,
    /// Results were taken; the session is about to disappear.
    Completed,
}

/// Snapshot of the question a player should answer next.
#[derive(Debug, Clone)]
pub struct CurrentQuestion {
    /// The question at the cursor.
    pub question: Question,
    /// Human-readable progress, e.g. `"3 of 10"`.
    pub progress: String,
    /// Hint budget at the time of the read.
    pub hints_available: u32,
}

/// Feedback returned for a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerFeedback {
    /// Whether the answer was right.
    pub is_correct: bool,
    /// The right answer.
    pub correct_answer: String,
    /// Points awarded for this answer.
    pub points_earned: u32,
    /// Message for the player.
    pub message: String,
    /// Whether every question has now been answered.
    pub is_last_question: bool,
}

/// The aggregate root for one quiz attempt.
#[derive(Debug)]
pub struct QuizSession {
    id: Uuid,
    difficulty: Difficulty,
    hints_available: u32,
    questions: Vec<Question>,
    cursor: usize,
    answers: Vec<AnswerRecord>,
    phase: QuizPhase,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Creates an active session over a fixed question list.
    #[must_use]
    pub fn start(
        id: Uuid,
        difficulty: Difficulty,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            difficulty,
            hints_available: INITIAL_HINTS,
            questions,
            cursor: 0,
            answers: Vec::new(),
            phase: QuizPhase::Active,
            started_at,
        }
    }

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Tier the quiz is played at.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Number of questions in the quiz.
    #[must_use]
    pub fn question_quantity(&self) -> usize {
        self.questions.len()
    }

    /// Remaining hint budget.
    #[must_use]
    pub fn hints_available(&self) -> u32 {
        self.hints_available
    }

    /// Index of the next question to present.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The fixed question list.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Answers in submission order.
    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// When the session was created.
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// A completed session is already gone from the caller's point of view.
    fn ensure_active(&self) -> Result<(), DomainError> {
        match self.phase {
            QuizPhase::Active => Ok(()),
            QuizPhase::Completed => Err(DomainError::SessionNotFound(self.id)),
        }
    }

    fn question_index(&self, ordinal: u32) -> Result<usize, DomainError> {
        self.questions
            .iter()
            .position(|q| q.ordinal == ordinal)
            .ok_or(DomainError::QuestionNotFound {
                session_id: self.id,
                ordinal,
            })
    }

    /// Returns the question at the cursor.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::QuizCompleted` once every question is answered.
    pub fn current_question(&self) -> Result<CurrentQuestion, DomainError> {
        self.ensure_active()?;
        let question = self
            .questions
            .get(self.cursor)
            .ok_or(DomainError::QuizCompleted(self.id))?;

        Ok(CurrentQuestion {
            question: question.clone(),
            progress: format!("{} of {}", self.cursor + 1, self.questions.len()),
            hints_available: self.hints_available,
        })
    }

    /// Records the answer to question `ordinal` and advances the cursor.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::QuestionNotFound` for an unknown ordinal and
    /// `DomainError::AlreadyAnswered` if that question has an answer. The
    /// session is unchanged on error.
    pub fn submit_answer(
        &mut self,
        ordinal: u32,
        selected_answer: Option<String>,
        time_spent: u32,
    ) -> Result<AnswerFeedback, DomainError> {
        self.ensure_active()?;
        let index = self.question_index(ordinal)?;
        if self.answers.iter().any(|a| a.ordinal == ordinal) {
            return Err(DomainError::AlreadyAnswered {
                session_id: self.id,
                ordinal,
            });
        }

        let question = &self.questions[index];
        let is_correct = question.is_correct(selected_answer.as_deref());
        let points_earned = if is_correct {
            points_for(self.difficulty)
        } else {
            0
        };
        let correct_answer = question.correct_capital.clone();
        let message = if is_correct {
            "Correct!".to_owned()
        } else {
            format!("Incorrect! The correct answer is: {correct_answer}")
        };

        self.answers.push(AnswerRecord {
            ordinal,
            selected_answer,
            is_correct,
            points_earned,
            time_spent,
        });
        self.cursor += 1;

        Ok(AnswerFeedback {
            is_correct,
            correct_answer,
            points_earned,
            message,
            is_last_question: self.cursor >= self.questions.len(),
        })
    }

    /// Spends one hint on question `ordinal`.
    ///
    /// The budget is charged as soon as the checks pass, even when the hint
    /// cannot remove anything further.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoHintsAvailable` when the budget is spent and
    /// `DomainError::QuestionNotFound` for an unknown ordinal.
    pub fn use_hint(&mut self, ordinal: u32, kind: HintKind) -> Result<HintOutcome, DomainError> {
        self.ensure_active()?;
        if self.hints_available == 0 {
            return Err(DomainError::NoHintsAvailable(self.id));
        }
        let index = self.question_index(ordinal)?;

        self.hints_available -= 1;

        let question = &mut self.questions[index];
        let payload = match kind {
            HintKind::EliminateAlternative => {
                question.eliminate_incorrect_candidate();
                HintPayload::Candidates(question.candidates.clone())
            }
            HintKind::ShowFact => HintPayload::Fact(question.fact.clone()),
        };

        Ok(HintOutcome {
            kind,
            payload,
            hints_remaining: self.hints_available,
        })
    }

    /// Computes the final result and moves the session to `Completed`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::QuizIncomplete` while questions remain
    /// unanswered.
    pub fn finish(&mut self, completed_at: DateTime<Utc>) -> Result<QuizResult, DomainError> {
        self.ensure_active()?;
        if self.answers.len() != self.questions.len() {
            return Err(DomainError::QuizIncomplete {
                session_id: self.id,
                answered: self.answers.len(),
                expected: self.questions.len(),
            });
        }

        self.phase = QuizPhase::Completed;
        Ok(QuizResult::tally(
            self.id,
            self.difficulty,
            self.questions.len(),
            &self.answers,
            completed_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use geoquiz_core::rng::StdRngSource;
    use geoquiz_test_support::{MockRng, fixture_dataset};

    use super::*;
    use crate::domain::generator::generate_questions;
    use crate::domain::scoring::PerformanceTier;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
    }

    fn session(difficulty: Difficulty, count: usize) -> QuizSession {
        let dataset = fixture_dataset(20, 20, 15);
        let questions = generate_questions(&dataset, difficulty, count, &mut MockRng).unwrap();
        QuizSession::start(Uuid::new_v4(), difficulty, questions, fixed_now())
    }

    fn correct_answer(session: &QuizSession, ordinal: u32) -> String {
        session.questions()[ordinal as usize - 1].correct_capital.clone()
    }

    #[test]
    fn test_question_quantity_accepts_supported_values_only() {
        for value in [5, 10, 15, 20] {
            assert_eq!(QuestionQuantity::try_from(value).unwrap().get(), value);
        }
        for value in [0, 1, 7, 25] {
            assert!(matches!(
                QuestionQuantity::try_from(value),
                Err(DomainError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_new_session_starts_active_with_full_hint_budget() {
        let s = session(Difficulty::Easy, 5);

        assert_eq!(s.phase(), QuizPhase::Active);
        assert_eq!(s.hints_available(), INITIAL_HINTS);
        assert_eq!(s.cursor(), 0);
        assert!(s.answers().is_empty());
        assert_eq!(s.question_quantity(), 5);
    }

    #[test]
    fn test_current_question_follows_submissions() {
        // Arrange
        let mut s = session(Difficulty::Medium, 5);

        for k in 0..5u32 {
            // Act
            let current = s.current_question().unwrap();

            // Assert
            assert_eq!(current.question.ordinal, k + 1);
            assert_eq!(current.progress, format!("{} of 5", k + 1));
            s.submit_answer(k + 1, None, 30).unwrap();
            assert_eq!(s.answers().len(), s.cursor());
        }

        match s.current_question() {
            Err(DomainError::QuizCompleted(id)) => assert_eq!(id, s.id()),
            other => panic!("expected QuizCompleted, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_correct_answer_awards_tier_points() {
        let mut s = session(Difficulty::Hard, 5);
        let answer = correct_answer(&s, 1);

        let feedback = s.submit_answer(1, Some(answer.clone()), 12).unwrap();

        assert!(feedback.is_correct);
        assert_eq!(feedback.points_earned, 15);
        assert_eq!(feedback.correct_answer, answer);
        assert_eq!(feedback.message, "Correct!");
        assert!(!feedback.is_last_question);
        assert_eq!(s.answers()[0].time_spent, 12);
    }

    #[test]
    fn test_submit_wrong_or_missing_answer_awards_nothing() {
        let mut s = session(Difficulty::Easy, 5);
        let answer = correct_answer(&s, 1);

        let wrong = s.submit_answer(1, Some("Atlantis".to_owned()), 5).unwrap();
        let timeout = s.submit_answer(2, None, 30).unwrap();

        assert!(!wrong.is_correct);
        assert_eq!(wrong.points_earned, 0);
        assert_eq!(
            wrong.message,
            format!("Incorrect! The correct answer is: {answer}")
        );
        assert!(!timeout.is_correct);
        assert_eq!(timeout.points_earned, 0);
        assert_eq!(s.answers()[1].selected_answer, None);
    }

    #[test]
    fn test_second_submission_for_same_question_is_rejected_without_changes() {
        // Arrange
        let mut s = session(Difficulty::Easy, 5);
        let answer = correct_answer(&s, 1);
        s.submit_answer(1, Some("Atlantis".to_owned()), 5).unwrap();

        // Act
        let result = s.submit_answer(1, Some(answer), 5);

        // Assert
        match result {
            Err(DomainError::AlreadyAnswered { ordinal, .. }) => assert_eq!(ordinal, 1),
            other => panic!("expected AlreadyAnswered, got {other:?}"),
        }
        assert_eq!(s.cursor(), 1);
        assert_eq!(s.answers().len(), 1);
        assert!(!s.answers()[0].is_correct);
    }

    #[test]
    fn test_submit_unknown_ordinal_fails() {
        let mut s = session(Difficulty::Easy, 5);

        for ordinal in [0, 6, 99] {
            match s.submit_answer(ordinal, None, 1) {
                Err(DomainError::QuestionNotFound { ordinal: o, .. }) => assert_eq!(o, ordinal),
                other => panic!("expected QuestionNotFound, got {other:?}"),
            }
        }
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn test_last_submission_reports_last_question() {
        let mut s = session(Difficulty::Easy, 5);
        for ordinal in 1..5 {
            assert!(!s.submit_answer(ordinal, None, 1).unwrap().is_last_question);
        }

        let feedback = s.submit_answer(5, None, 1).unwrap();

        assert!(feedback.is_last_question);
    }

    #[test]
    fn test_hint_budget_allows_exactly_three_uses() {
        let mut s = session(Difficulty::Easy, 5);
        let mut previous = s.hints_available();

        for _ in 0..INITIAL_HINTS {
            let outcome = s.use_hint(1, HintKind::ShowFact).unwrap();
            assert!(outcome.hints_remaining < previous);
            previous = outcome.hints_remaining;
        }

        match s.use_hint(1, HintKind::ShowFact) {
            Err(DomainError::NoHintsAvailable(id)) => assert_eq!(id, s.id()),
            other => panic!("expected NoHintsAvailable, got {other:?}"),
        }
        assert_eq!(s.hints_available(), 0);
    }

    #[test]
    fn test_hint_on_unknown_question_keeps_budget() {
        let mut s = session(Difficulty::Easy, 5);

        let result = s.use_hint(42, HintKind::EliminateAlternative);

        assert!(matches!(result, Err(DomainError::QuestionNotFound { .. })));
        assert_eq!(s.hints_available(), INITIAL_HINTS);
    }

    #[test]
    fn test_exhausted_budget_is_reported_before_unknown_question() {
        let mut s = session(Difficulty::Easy, 5);
        for _ in 0..INITIAL_HINTS {
            s.use_hint(1, HintKind::ShowFact).unwrap();
        }

        let result = s.use_hint(42, HintKind::ShowFact);

        assert!(matches!(result, Err(DomainError::NoHintsAvailable(_))));
    }

    #[test]
    fn test_eliminate_hint_keeps_correct_capital_and_shrinks_by_one() {
        // Arrange
        let dataset = fixture_dataset(20, 20, 15);
        let mut rng = StdRngSource::seeded(9);
        let questions = generate_questions(&dataset, Difficulty::Easy, 5, &mut rng).unwrap();
        let mut s = QuizSession::start(Uuid::new_v4(), Difficulty::Easy, questions, fixed_now());
        let correct = correct_answer(&s, 2);

        for expected_len in [3usize, 2, 1] {
            // Act
            let outcome = s.use_hint(2, HintKind::EliminateAlternative).unwrap();

            // Assert
            let HintPayload::Candidates(candidates) = outcome.payload else {
                panic!("expected candidate list");
            };
            assert_eq!(candidates.len(), expected_len);
            assert!(candidates.contains(&correct));
            assert_eq!(s.questions()[1].candidates(), candidates.as_slice());
        }
    }

    #[test]
    fn test_eliminate_hint_removes_first_incorrect_in_order() {
        let mut s = session(Difficulty::Easy, 5);
        let before = s.questions()[0].candidates().to_vec();
        let correct = correct_answer(&s, 1);
        let first_incorrect = before.iter().find(|c| **c != correct).unwrap().clone();

        s.use_hint(1, HintKind::EliminateAlternative).unwrap();

        let after = s.questions()[0].candidates();
        assert!(!after.contains(&first_incorrect));
        let expected: Vec<String> = before.into_iter().filter(|c| *c != first_incorrect).collect();
        assert_eq!(after, expected.as_slice());
    }

    #[test]
    fn test_show_fact_hint_returns_fact_unchanged() {
        let mut s = session(Difficulty::Easy, 5);
        let fact = s.questions()[2].fact.clone();

        let outcome = s.use_hint(3, HintKind::ShowFact).unwrap();

        assert_eq!(outcome.kind, HintKind::ShowFact);
        assert_eq!(outcome.payload, HintPayload::Fact(fact));
        assert_eq!(outcome.hints_remaining, INITIAL_HINTS - 1);
        assert_eq!(s.questions()[2].candidates().len(), 4);
    }

    #[test]
    fn test_finish_before_all_answers_is_incomplete() {
        let mut s = session(Difficulty::Easy, 5);
        s.submit_answer(1, None, 1).unwrap();

        match s.finish(fixed_now()) {
            Err(DomainError::QuizIncomplete {
                answered, expected, ..
            }) => {
                assert_eq!(answered, 1);
                assert_eq!(expected, 5);
            }
            other => panic!("expected QuizIncomplete, got {other:?}"),
        }
        assert_eq!(s.phase(), QuizPhase::Active);
    }

    #[test]
    fn test_all_correct_easy_quiz_scores_twenty_five() {
        // Arrange
        let mut s = session(Difficulty::Easy, 5);

        // Act
        for ordinal in 1..=5 {
            let answer = correct_answer(&s, ordinal);
            s.submit_answer(ordinal, Some(answer), 10).unwrap();
        }
        let result = s.finish(fixed_now()).unwrap();

        // Assert
        assert_eq!(result.total_score, 25);
        assert_eq!(result.correct_answers, 5);
        assert_eq!(result.incorrect_answers, 0);
        assert!((result.accuracy_percentage - 100.0).abs() < f64::EPSILON);
        assert_eq!(result.performance, PerformanceTier::Excellent);
        assert_eq!(result.performance_message, "Excellent!");
        assert_eq!(result.session_id, s.id());
        assert_eq!(result.completed_at, fixed_now());
    }

    #[test]
    fn test_completed_session_rejects_every_operation_as_not_found() {
        let mut s = session(Difficulty::Easy, 5);
        for ordinal in 1..=5 {
            s.submit_answer(ordinal, None, 1).unwrap();
        }
        s.finish(fixed_now()).unwrap();

        assert_eq!(s.phase(), QuizPhase::Completed);
        assert!(matches!(
            s.finish(fixed_now()),
            Err(DomainError::SessionNotFound(_))
        ));
        assert!(matches!(
            s.current_question(),
            Err(DomainError::SessionNotFound(_))
        ));
        assert!(matches!(
            s.use_hint(1, HintKind::ShowFact),
            Err(DomainError::SessionNotFound(_))
        ));
    }

    #[test]
    fn test_score_matches_sum_of_points_and_points_imply_correctness() {
        let mut s = session(Difficulty::Medium, 10);
        for ordinal in 1..=10u32 {
            let answer = if ordinal % 3 == 0 {
                Some(correct_answer(&s, ordinal))
            } else {
                Some("Nowhere".to_owned())
            };
            s.submit_answer(ordinal, answer, 3).unwrap();
        }
        let points: u32 = s.answers().iter().map(|a| a.points_earned).sum();
        for a in s.answers() {
            assert_eq!(a.points_earned > 0, a.is_correct);
        }

        let result = s.finish(fixed_now()).unwrap();

        assert_eq!(result.total_score, points);
        assert_eq!(result.correct_answers, 3);
        assert_eq!(result.incorrect_answers, 7);
        assert!((result.accuracy_percentage - 30.0).abs() < f64::EPSILON);
        assert_eq!(result.performance, PerformanceTier::KeepPracticing);
    }
}
