use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

use storage::repository::QuestionRepository;

use super::driver::QuizDriver;
use super::service::QuizSession;
use super::ticker::{DEFAULT_TICK_PERIOD, Tick};
use crate::Clock;
use crate::error::QuizError;

/// Loads the question bank and starts a quiz on it.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
    tick_period: Duration,
    start_index: usize,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, questions: Arc<dyn QuestionRepository>) -> Self {
        Self {
            clock,
            questions,
            tick_period: DEFAULT_TICK_PERIOD,
            start_index: 0,
        }
    }

    #[must_use]
    pub fn with_tick_period(mut self, tick_period: Duration) -> Self {
        self.tick_period = tick_period;
        self
    }

    /// Zero-based index of the first question shown.
    #[must_use]
    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    /// Load the bank and open a session on the start question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the bank cannot be loaded and
    /// `QuizError::QuestionOutOfRange` if the start index is past the end.
    pub async fn start_session(&self) -> Result<QuizSession, QuizError> {
        let bank = self.questions.load_bank().await?;
        let total = bank.len();
        let session = QuizSession::starting_at(bank, self.clock, self.start_index)?;
        tracing::info!(
            questions = total,
            start = self.start_index,
            "quiz session started"
        );
        Ok(session)
    }

    /// Start a session and the ticker driving its timer.
    ///
    /// Must be awaited from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Same as [`QuizLoopService::start_session`].
    pub async fn start_driver(
        &self,
    ) -> Result<(QuizDriver, UnboundedReceiver<Tick>), QuizError> {
        let session = self.start_session().await?;
        Ok(QuizDriver::new(session, self.tick_period))
    }
}
