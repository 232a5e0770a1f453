#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod session;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, SessionError};
pub use session::{
    AnswerOutcome, OPTIONS_PER_QUESTION, OptionSet, QuizOption, QuizService, QuizSession,
    SessionPhase, SessionProgress,
};
