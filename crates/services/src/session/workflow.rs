use std::sync::Arc;

use quiz_core::model::SessionScore;
use storage::repository::FlagRepository;

use super::options::OptionSet;
use super::progress::SessionProgress;
use super::service::QuizSession;
use crate::Clock;
use crate::error::SessionError;

/// Questions per session unless overridden.
pub const DEFAULT_TOTAL_QUESTIONS: u32 = 10;

/// Incorrect options fetched per question unless overridden.
pub const DEFAULT_DISTRACTORS_PER_QUESTION: u32 = 3;

type CompletionCallback = Arc<dyn Fn(SessionScore) + Send + Sync>;

/// Orchestrates quiz sessions over the flag store.
///
/// All store access happens here, behind `await` points; session state is
/// mutated only after a query has completed on the caller's task, so
/// dropping an in-flight future (session teardown) can never leave a partial
/// update behind. Requests are issued strictly in question order because the
/// session is exclusively borrowed across each call.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    flags: Arc<dyn FlagRepository>,
    total_questions: u32,
    distractors_per_question: u32,
    on_complete: Option<CompletionCallback>,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, flags: Arc<dyn FlagRepository>) -> Self {
        Self {
            clock,
            flags,
            total_questions: DEFAULT_TOTAL_QUESTIONS,
            distractors_per_question: DEFAULT_DISTRACTORS_PER_QUESTION,
            on_complete: None,
        }
    }

    #[must_use]
    pub fn with_total_questions(mut self, total_questions: u32) -> Self {
        self.total_questions = total_questions;
        self
    }

    #[must_use]
    pub fn with_distractors_per_question(mut self, distractors: u32) -> Self {
        self.distractors_per_question = distractors;
        self
    }

    /// Register a callback invoked once with the final score when a session
    /// driven through [`advance`](Self::advance) reaches its terminal state.
    /// This is the only thing the presentation shell exposes to the session.
    #[must_use]
    pub fn with_on_complete(
        mut self,
        on_complete: impl Fn(SessionScore) + Send + Sync + 'static,
    ) -> Self {
        self.on_complete = Some(Arc::new(on_complete));
        self
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    /// Start a new session by drawing a random question set from the store.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` when the store is unreachable and
    /// `SessionError::NoQuestions` when it is empty.
    pub async fn start(&self) -> Result<QuizSession, SessionError> {
        let questions = self.flags.random_questions(self.total_questions).await?;
        QuizSession::new(questions, self.clock.now())
    }

    /// Build the randomized option set for the session's current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` when no question remains, or
    /// `SessionError::Storage` when the distractor query fails.
    pub async fn current_options(
        &self,
        session: &QuizSession,
    ) -> Result<OptionSet, SessionError> {
        let Some(flag) = session.current_flag() else {
            return Err(SessionError::Finished);
        };
        let correct = flag.clone();

        let distractors = self
            .flags
            .random_distractors(correct.id(), self.distractors_per_question)
            .await?;

        let mut rng = rand::rng();
        Ok(OptionSet::build(correct, distractors, &mut rng))
    }

    /// Advance the session, firing the completion callback when this step
    /// reaches the terminal state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` if the session was already finished,
    /// which also guarantees the callback cannot fire twice.
    pub fn advance(&self, session: &mut QuizSession) -> Result<SessionProgress, SessionError> {
        let progress = session.advance(self.clock.now())?;
        if progress.is_complete {
            if let Some(on_complete) = &self.on_complete {
                on_complete(session.final_score()?);
            }
        }
        Ok(progress)
    }
}
