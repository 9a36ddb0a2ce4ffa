//! Cancellable one-second ticker for the question timer.
//!
//! At most one tick task exists per `Ticker`. `restart` aborts the previous task
//! before spawning the next one, and every tick carries the instance it was armed
//! for, so a tick that was already queued when the question changed is discarded
//! by the session instead of being counted twice.

use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// One elapsed period for the question instance the ticker was armed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub instance: u64,
}

pub struct Ticker {
    period: Duration,
    tx: UnboundedSender<Tick>,
    handle: Option<JoinHandle<()>>,
    armed_for: Option<u64>,
}

impl Ticker {
    #[must_use]
    pub fn new(period: Duration) -> (Self, UnboundedReceiver<Tick>) {
        let (tx, rx) = unbounded_channel();
        (
            Self {
                period,
                tx,
                handle: None,
                armed_for: None,
            },
            rx,
        )
    }

    /// Instance the running task ticks for, if any.
    #[must_use]
    pub fn armed_for(&self) -> Option<u64> {
        self.armed_for
    }

    /// Replace the running task with one ticking for `instance`.
    ///
    /// The first tick arrives one full period after the call.
    /// Must be called from within a tokio runtime.
    pub fn restart(&mut self, instance: u64) {
        self.cancel();

        let tx = self.tx.clone();
        let period = self.period;
        let first = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Tick { instance }).is_err() {
                    break;
                }
            }
        });

        tracing::debug!(instance, "ticker armed");
        self.handle = Some(handle);
        self.armed_for = Some(instance);
    }

    /// Stop ticking. Safe to call when nothing is running.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!(instance = ?self.armed_for, "ticker cancelled");
        }
        self.armed_for = None;
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::error::TryRecvError;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period_for_armed_instance() {
        let (mut ticker, mut rx) = Ticker::new(Duration::from_secs(1));
        ticker.restart(7);

        for _ in 0..3 {
            let tick = rx.recv().await.unwrap();
            assert_eq!(tick, Tick { instance: 7 });
        }
        assert_eq!(ticker.armed_for(), Some(7));
        assert!(ticker.handle.as_ref().is_some_and(|h| !h.is_finished()));
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_a_full_period() {
        let (mut ticker, mut rx) = Ticker::new(Duration::from_secs(1));
        ticker.restart(0);
        let early = tokio::time::timeout(Duration::from_millis(999), rx.recv()).await;
        assert!(early.is_err(), "tick arrived before one period");

        assert_eq!(rx.recv().await.unwrap(), Tick { instance: 0 });
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_previous_task() {
        let (mut ticker, mut rx) = Ticker::new(Duration::from_secs(1));
        ticker.restart(1);
        ticker.restart(2);

        for _ in 0..3 {
            assert_eq!(rx.recv().await.unwrap(), Tick { instance: 2 });
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticks() {
        let (mut ticker, mut rx) = Ticker::new(Duration::from_secs(1));
        ticker.restart(3);
        assert_eq!(rx.recv().await.unwrap(), Tick { instance: 3 });

        ticker.cancel();
        assert_eq!(ticker.armed_for(), None);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }
}
