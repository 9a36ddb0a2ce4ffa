//! Count-up clock for the active question.
//!
//! `Idle(0) -> Running -> Stopped(frozen)`. A stopped timer never restarts; the
//! next question instance gets a fresh timer.

use crate::time::Elapsed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionTimer {
    phase: TimerPhase,
    elapsed: Elapsed,
}

impl Default for QuestionTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionTimer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: TimerPhase::Idle,
            elapsed: Elapsed::ZERO,
        }
    }

    #[must_use]
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    #[must_use]
    pub fn elapsed(&self) -> Elapsed {
        self.elapsed
    }

    /// True while ticks still count.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != TimerPhase::Stopped
    }

    /// Count one second. Returns false if the timer is already stopped.
    pub fn tick(&mut self) -> bool {
        match self.phase {
            TimerPhase::Stopped => false,
            TimerPhase::Idle | TimerPhase::Running => {
                self.phase = TimerPhase::Running;
                self.elapsed = self.elapsed.saturating_inc();
                true
            }
        }
    }

    /// Freeze the clock and return the time taken. Idempotent.
    pub fn stop(&mut self) -> Elapsed {
        self.phase = TimerPhase::Stopped;
        self.elapsed
    }
}
