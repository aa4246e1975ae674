//! Commands for quiz sessions.

use geoquiz_core::command::Command;
use geoquiz_dataset::Difficulty;
use uuid::Uuid;

use super::hints::HintKind;
use super::session::QuestionQuantity;

/// Command to start a new quiz.
#[derive(Debug, Clone)]
pub struct StartQuiz {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Tier to draw countries from.
    pub difficulty: Difficulty,
    /// Number of questions to generate.
    pub question_quantity: QuestionQuantity,
}

impl Command for StartQuiz {
    fn command_type(&self) -> &'static str {
        "quiz.start"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to answer one question.
#[derive(Debug, Clone)]
pub struct SubmitAnswer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session being played.
    pub session_id: Uuid,
    /// 1-based ordinal of the question.
    pub question_ordinal: u32,
    /// The chosen capital, or `None` when time ran out.
    pub selected_answer: Option<String>,
    /// Seconds spent on the question.
    pub time_spent: u32,
}

impl Command for SubmitAnswer {
    fn command_type(&self) -> &'static str {
        "quiz.submit_answer"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to spend a hint on a question.
#[derive(Debug, Clone)]
pub struct UseHint {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session being played.
    pub session_id: Uuid,
    /// 1-based ordinal of the question.
    pub question_ordinal: u32,
    /// Which hint to spend.
    pub hint_kind: HintKind,
}

impl Command for UseHint {
    fn command_type(&self) -> &'static str {
        "quiz.use_hint"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to take the results of a fully answered quiz, ending the session.
#[derive(Debug, Clone)]
pub struct FinishQuiz {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session to finish.
    pub session_id: Uuid,
}

impl Command for FinishQuiz {
    fn command_type(&self) -> &'static str {
        "quiz.finish"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
