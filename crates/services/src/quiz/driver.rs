use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

use quiz_core::model::Response;

use super::service::{QuizSession, Submission};
use super::ticker::{Tick, Ticker};
use crate::error::QuizError;

/// Owns a `QuizSession` and the single ticker that feeds its timer.
///
/// After every transition the ticker is re-armed for the new instance while the
/// timer is active, and cancelled once the question is submitted. The receiver
/// returned by [`QuizDriver::new`] yields the ticks to feed back through
/// [`QuizDriver::apply_tick`].
pub struct QuizDriver {
    session: QuizSession,
    ticker: Ticker,
}

impl QuizDriver {
    /// Wrap a session and start ticking for its current question.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(session: QuizSession, period: Duration) -> (Self, UnboundedReceiver<Tick>) {
        let (ticker, rx) = Ticker::new(period);
        let mut driver = Self { session, ticker };
        driver.sync_ticker();
        (driver, rx)
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// # Errors
    ///
    /// Returns `QuizError::AtFirstQuestion` on the first question.
    pub fn go_to_previous(&mut self) -> Result<(), QuizError> {
        let result = self.session.go_to_previous();
        self.after_navigation(&result);
        result
    }

    /// # Errors
    ///
    /// Returns `QuizError::AtLastQuestion` on the last question.
    pub fn go_to_next(&mut self) -> Result<(), QuizError> {
        let result = self.session.go_to_next();
        self.after_navigation(&result);
        result
    }

    /// Grade the response and stop ticking for this question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Response` when the response cannot be graded.
    pub fn submit(&mut self, response: &Response) -> Result<Submission, QuizError> {
        let question_id = self.session.current_question().id();
        let submission = match self.session.submit(response) {
            Ok(submission) => submission.clone(),
            Err(err) => {
                tracing::warn!(question = %question_id, error = %err, "submit rejected");
                return Err(err);
            }
        };
        tracing::info!(
            question = %question_id,
            correct = submission.is_correct(),
            time_taken = submission.time_taken.secs(),
            attempts = submission.attempts,
            "answer submitted"
        );
        self.sync_ticker();
        Ok(submission)
    }

    pub fn reveal_explanation(&mut self) {
        self.session.reveal_explanation();
    }

    /// Apply a tick from the receiver. Returns true if the timer advanced.
    pub fn apply_tick(&mut self, tick: Tick) -> bool {
        let counted = self.session.tick(tick.instance);
        if counted {
            tracing::debug!(
                instance = tick.instance,
                elapsed = self.session.elapsed().secs(),
                "tick"
            );
        }
        counted
    }

    fn after_navigation(&mut self, result: &Result<(), QuizError>) {
        match result {
            Ok(()) => {
                tracing::info!(
                    index = self.session.current_index(),
                    question = %self.session.current_question().id(),
                    "question shown"
                );
                self.sync_ticker();
            }
            Err(err) => tracing::warn!(error = %err, "navigation rejected"),
        }
    }

    fn sync_ticker(&mut self) {
        let instance = self.session.instance();
        if self.session.timer().is_active() {
            if self.ticker.armed_for() != Some(instance) {
                self.ticker.restart(instance);
            }
        } else {
            self.ticker.cancel();
        }
    }
}
