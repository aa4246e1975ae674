//! Hint kinds and their outcomes.

use std::fmt;
use std::str::FromStr;

use geoquiz_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Hints every new session starts with.
pub const INITIAL_HINTS: u32 = 3;

/// The hints a player can spend on a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HintKind {
    /// Remove one wrong candidate.
    EliminateAlternative,
    /// Reveal the country's trivia fact.
    ShowFact,
}

impl HintKind {
    /// Wire name of the hint kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HintKind::EliminateAlternative => "eliminate-alternative",
            HintKind::ShowFact => "show-fact",
        }
    }
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HintKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eliminate-alternative" => Ok(HintKind::EliminateAlternative),
            "show-fact" => Ok(HintKind::ShowFact),
            other => Err(DomainError::InvalidHintKind(other.to_owned())),
        }
    }
}

/// What a hint revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HintPayload {
    /// Remaining candidates after an elimination.
    Candidates(Vec<String>),
    /// The question's fact text.
    Fact(String),
}

/// Result of spending a hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HintOutcome {
    /// Which hint was used.
    #[serde(rename = "hintType")]
    pub kind: HintKind,
    /// What the hint revealed.
    #[serde(rename = "hintData")]
    pub payload: HintPayload,
    /// Budget left after this hint.
    pub hints_remaining: u32,
}
