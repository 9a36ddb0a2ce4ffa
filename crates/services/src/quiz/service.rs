use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::Clock;
use quiz_core::model::{Question, QuestionBank, Response, Verdict};
use quiz_core::time::Elapsed;
use quiz_core::timer::QuestionTimer;

use super::progress::QuizProgress;
use crate::error::QuizError;

//
// ─── SUBMISSION ────────────────────────────────────────────────────────────────
//

/// Graded answer for the active question instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub verdict: Verdict,
    /// Frozen at the first successful submit of this instance.
    pub time_taken: Elapsed,
    pub submitted_at: DateTime<Utc>,
    /// Successful submits of this instance, first one included.
    pub attempts: u32,
    /// Answer key shown after a wrong numerical submit. Stays for the rest of
    /// the instance, even if a later re-submit is correct.
    revealed_answer: Option<f64>,
}

impl Submission {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.verdict.correct
    }

    #[must_use]
    pub fn revealed_answer(&self) -> Option<f64> {
        self.revealed_answer
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// The quiz controller: a cursor over a fixed bank plus the state of the
/// question currently on screen.
///
/// Every change of the displayed question starts a new *instance*: the timer
/// restarts from zero, the submission and explanation are cleared, and ticks
/// stamped with an older instance are ignored.
pub struct QuizSession {
    bank: QuestionBank,
    current: usize,
    instance: u64,
    timer: QuestionTimer,
    submission: Option<Submission>,
    explanation_visible: bool,
    clock: Clock,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    #[must_use]
    pub fn new(bank: QuestionBank, clock: Clock) -> Self {
        Self {
            bank,
            current: 0,
            instance: 0,
            timer: QuestionTimer::new(),
            submission: None,
            explanation_visible: false,
            started_at: clock.now(),
            clock,
        }
    }

    /// Start on a question other than the first.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::QuestionOutOfRange` if `index` is past the end of the bank.
    pub fn starting_at(bank: QuestionBank, clock: Clock, index: usize) -> Result<Self, QuizError> {
        if index >= bank.len() {
            return Err(QuizError::QuestionOutOfRange {
                index,
                total: bank.len(),
            });
        }
        let mut session = Self::new(bank, clock);
        session.current = index;
        Ok(session)
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.bank.len()
    }

    /// Generation number of the question instance on screen.
    #[must_use]
    pub fn instance(&self) -> u64 {
        self.instance
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        // `current` is kept within the non-empty bank by construction.
        &self.bank.questions()[self.current]
    }

    #[must_use]
    pub fn timer(&self) -> &QuestionTimer {
        &self.timer
    }

    #[must_use]
    pub fn elapsed(&self) -> Elapsed {
        self.timer.elapsed()
    }

    #[must_use]
    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submission.is_some()
    }

    #[must_use]
    pub fn explanation_visible(&self) -> bool {
        self.explanation_visible
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current == self.bank.last_index()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            position: self.current + 1,
            total: self.bank.len(),
            is_first: self.is_first(),
            is_last: self.is_last(),
            submitted: self.is_submitted(),
        }
    }

    /// Move to the previous question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AtFirstQuestion` on the first question; nothing changes.
    pub fn go_to_previous(&mut self) -> Result<(), QuizError> {
        if self.is_first() {
            return Err(QuizError::AtFirstQuestion);
        }
        self.current -= 1;
        self.begin_instance();
        Ok(())
    }

    /// Move to the next question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AtLastQuestion` on the last question; nothing changes.
    pub fn go_to_next(&mut self) -> Result<(), QuizError> {
        if self.is_last() {
            return Err(QuizError::AtLastQuestion);
        }
        self.current += 1;
        self.begin_instance();
        Ok(())
    }

    /// Grade a response for the active question and stop its timer.
    ///
    /// Submitting again without navigating re-grades the new response but keeps
    /// the time taken from the first submit and any answer already revealed.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Response` for empty or malformed responses; nothing changes.
    pub fn submit(&mut self, response: &Response) -> Result<&Submission, QuizError> {
        let verdict = self.current_question().grade(response)?;
        let time_taken = self.timer.stop();
        let submitted_at = self.clock.now();

        let submission = match self.submission.take() {
            Some(previous) => Submission {
                revealed_answer: verdict.revealed_answer.or(previous.revealed_answer),
                verdict,
                time_taken: previous.time_taken,
                submitted_at,
                attempts: previous.attempts.saturating_add(1),
            },
            None => Submission {
                revealed_answer: verdict.revealed_answer,
                verdict,
                time_taken,
                submitted_at,
                attempts: 1,
            },
        };

        Ok(self.submission.insert(submission))
    }

    /// Show the explanation. Grading and timing are unaffected.
    pub fn reveal_explanation(&mut self) {
        self.explanation_visible = true;
    }

    /// Count one second for `instance`.
    ///
    /// Returns false when the tick is stale or the timer is stopped.
    pub fn tick(&mut self, instance: u64) -> bool {
        if instance != self.instance {
            return false;
        }
        self.timer.tick()
    }

    fn begin_instance(&mut self) {
        self.instance = self.instance.wrapping_add(1);
        self.timer = QuestionTimer::new();
        self.submission = None;
        self.explanation_visible = false;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.bank.len())
            .field("current", &self.current)
            .field("instance", &self.instance)
            .field("elapsed", &self.timer.elapsed())
            .field("submitted", &self.submission.is_some())
            .field("explanation_visible", &self.explanation_visible)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
