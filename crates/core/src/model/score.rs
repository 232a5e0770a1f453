use serde::{Deserialize, Serialize};

/// How a single question was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionOutcome {
    Correct,
    Wrong,
    Skipped,
}

/// Tally of resolved questions for one quiz session.
///
/// Counters are monotone within a session; a new session starts from zero.
/// At any point `resolved()` equals the number of questions resolved so far,
/// whether answered or skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionScore {
    correct: u32,
    wrong: u32,
    skipped: u32,
}

impl SessionScore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one resolved question.
    pub fn record(&mut self, outcome: QuestionOutcome) {
        match outcome {
            QuestionOutcome::Correct => self.correct = self.correct.saturating_add(1),
            QuestionOutcome::Wrong => self.wrong = self.wrong.saturating_add(1),
            QuestionOutcome::Skipped => self.skipped = self.skipped.saturating_add(1),
        }
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    #[must_use]
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    /// Total number of resolved questions.
    #[must_use]
    pub fn resolved(&self) -> u32 {
        self.correct
            .saturating_add(self.wrong)
            .saturating_add(self.skipped)
    }
}
