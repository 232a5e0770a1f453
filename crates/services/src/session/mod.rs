mod options;
mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use options::{OPTIONS_PER_QUESTION, OptionSet, QuizOption};
pub use progress::SessionProgress;
pub use service::{AnswerOutcome, QuizSession, SessionPhase};
pub use workflow::{
    DEFAULT_DISTRACTORS_PER_QUESTION, DEFAULT_TOTAL_QUESTIONS, QuizService,
};
