//! Questions and answer records.

/// Seconds a client is given to answer one question, regardless of tier.
pub const TIME_PER_QUESTION: u32 = 30;

/// Candidates offered for a freshly generated question.
pub const CANDIDATES_PER_QUESTION: usize = 4;

/// A multiple-choice question about one country's capital.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// 1-based position within the session.
    pub ordinal: u32,
    /// The country being asked about.
    pub country: String,
    /// The right answer.
    pub correct_capital: String,
    /// Offered answers. Starts with four entries and loses one per
    /// elimination hint.
    pub(crate) candidates: Vec<String>,
    /// Trivia revealed by the fact hint.
    pub fact: String,
    /// Seconds allowed for this question.
    pub time_budget: u32,
}

impl Question {
    /// Offered answers in display order.
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Whether `answer` matches the correct capital exactly. A missing answer
    /// (timeout) is never correct.
    #[must_use]
    pub fn is_correct(&self, answer: Option<&str>) -> bool {
        answer == Some(self.correct_capital.as_str())
    }

    /// Removes the first incorrect candidate in current order and returns it.
    ///
    /// Returns `None` when only the correct capital is left.
    pub(crate) fn eliminate_incorrect_candidate(&mut self) -> Option<String> {
        let position = self
            .candidates
            .iter()
            .position(|candidate| *candidate != self.correct_capital)?;
        Some(self.candidates.remove(position))
    }
}

/// The recorded answer to one question. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    /// Ordinal of the answered question.
    pub ordinal: u32,
    /// The submitted answer, or `None` when time ran out.
    pub selected_answer: Option<String>,
    /// Whether the answer was correct.
    pub is_correct: bool,
    /// Points awarded; zero unless correct.
    pub points_earned: u32,
    /// Seconds the client reports spending.
    pub time_spent: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(candidates: &[&str]) -> Question {
        Question {
            ordinal: 1,
            country: "France".to_owned(),
            correct_capital: "Paris".to_owned(),
            candidates: candidates.iter().map(|c| (*c).to_owned()).collect(),
            fact: "fact".to_owned(),
            time_budget: TIME_PER_QUESTION,
        }
    }

    #[test]
    fn test_is_correct_requires_exact_match() {
        let q = question(&["Paris", "Rome", "Oslo", "Bern"]);

        assert!(q.is_correct(Some("Paris")));
        assert!(!q.is_correct(Some("paris")));
        assert!(!q.is_correct(Some("Paris ")));
        assert!(!q.is_correct(None));
    }

    #[test]
    fn test_eliminate_removes_first_incorrect_candidate() {
        let mut q = question(&["Paris", "Rome", "Oslo", "Bern"]);

        let removed = q.eliminate_incorrect_candidate();

        assert_eq!(removed.as_deref(), Some("Rome"));
        assert_eq!(q.candidates(), ["Paris", "Oslo", "Bern"]);
    }

    #[test]
    fn test_eliminate_is_noop_when_only_correct_remains() {
        let mut q = question(&["Paris"]);

        assert_eq!(q.eliminate_incorrect_candidate(), None);
        assert_eq!(q.candidates(), ["Paris"]);
    }
}
