use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{FlagId, FlagRecord, QuestionOutcome, SessionScore};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// Observable phase of a quiz session.
///
/// The loading phase has no variant here: it is the time before the
/// `QuizSession` value exists, while the start request is still in flight.
/// `Finished` is terminal; no operation transitions out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    InProgress,
    Finished,
}

/// Result of a `submit_answer` or `skip` call.
///
/// `Ignored` means the current question was already resolved (or the session
/// is finished) and the call changed nothing. Duplicate UI events land here
/// instead of double-counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Recorded(QuestionOutcome),
    Ignored,
}

//
// ─── QUIZ SESSION ──────────────────────────────────────────────────────────────
//

/// In-memory state for one fixed-length quiz run.
///
/// Owns the question list, the current index, and the score counters; steps
/// through questions sequentially. At every advance boundary the score
/// invariant holds: `score.resolved()` equals the number of questions the
/// session has moved past.
pub struct QuizSession {
    questions: Vec<FlagRecord>,
    current: usize,
    current_resolved: bool,
    score: SessionScore,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a session over the given question set.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestions` if the question set is empty.
    pub fn new(
        questions: Vec<FlagRecord>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }

        Ok(Self {
            questions,
            current: 0,
            current_resolved: false,
            score: SessionScore::new(),
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.current >= self.questions.len() {
            SessionPhase::Finished
        } else {
            SessionPhase::InProgress
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase() == SessionPhase::Finished
    }

    /// Total number of questions in this session.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Zero-based index of the current question.
    #[must_use]
    pub fn question_index(&self) -> usize {
        self.current
    }

    /// The flag being asked about, or `None` once the session is finished.
    #[must_use]
    pub fn current_flag(&self) -> Option<&FlagRecord> {
        self.questions.get(self.current)
    }

    /// Running tally. Use [`final_score`](Self::final_score) for the
    /// authoritative result once the session has finished.
    #[must_use]
    pub fn score(&self) -> SessionScore {
        self.score
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        let resolved = self.score.resolved() as usize;
        SessionProgress {
            total,
            resolved,
            remaining: total.saturating_sub(self.current),
            is_complete: self.is_complete(),
        }
    }

    /// Record an answer for the current question.
    ///
    /// Correctness is judged by stable id, not by display text, so two
    /// records sharing a name cannot be confused. At most one answer counts
    /// per question; repeat calls before [`advance`](Self::advance) return
    /// `AnswerOutcome::Ignored`.
    pub fn submit_answer(&mut self, selected: FlagId) -> AnswerOutcome {
        let Some(flag) = self.questions.get(self.current) else {
            return AnswerOutcome::Ignored;
        };
        if self.current_resolved {
            return AnswerOutcome::Ignored;
        }

        let outcome = if selected == flag.id() {
            QuestionOutcome::Correct
        } else {
            QuestionOutcome::Wrong
        };
        self.score.record(outcome);
        self.current_resolved = true;
        AnswerOutcome::Recorded(outcome)
    }

    /// Skip the current question without answering.
    ///
    /// Mutually exclusive with [`submit_answer`](Self::submit_answer) for the
    /// same question; once either has resolved the question, the other is
    /// ignored.
    pub fn skip(&mut self) -> AnswerOutcome {
        if self.current >= self.questions.len() || self.current_resolved {
            return AnswerOutcome::Ignored;
        }

        self.score.record(QuestionOutcome::Skipped);
        self.current_resolved = true;
        AnswerOutcome::Recorded(QuestionOutcome::Skipped)
    }

    /// Move to the next question, finishing the session after the last one.
    ///
    /// Advancing past an unresolved question counts it as skipped, matching
    /// the app behavior where pressing "next" without answering is a skip.
    ///
    /// `now` should come from the services layer clock; it becomes
    /// `completed_at` when this advance reaches the terminal state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` if the session is already finished.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<SessionProgress, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Finished);
        }

        if !self.current_resolved {
            self.score.record(QuestionOutcome::Skipped);
        }
        self.current_resolved = false;
        self.current += 1;

        if self.current >= self.questions.len() {
            self.completed_at = Some(now);
        }

        Ok(self.progress())
    }

    /// The final tally, valid only in the terminal state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` if questions remain.
    pub fn final_score(&self) -> Result<SessionScore, SessionError> {
        if !self.is_complete() {
            return Err(SessionError::NotFinished);
        }
        Ok(self.score)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("current_resolved", &self.current_resolved)
            .field("score", &self.score)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
