//! Periodic tick driver.
//!
//! Spawns a task that calls [`Session::advance`](super::Session::advance)
//! once per clock tick interval until stopped. The period is read from the
//! session's own clock settings, so every tick moves simulated time by
//! exactly the real time that separated it from the previous one.
//! `stop()` waits for the task to finish, so no tick can land after it
//! returns.

use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::session::SharedSession;
use crate::clock::ClockSimulator;

pub struct Ticker {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<u64>>,
    period: Duration,
}

impl Ticker {
    /// Start ticking `session` at its clock's tick interval.
    ///
    /// The first tick fires one full period after the call, matching a
    /// timer that has to elapse before it emits. `ClockSettings` rules out
    /// a zero interval.
    pub async fn spawn(session: SharedSession) -> Self {
        let period = session.read().await.clock().settings().tick_interval();
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = tokio::spawn(run(session, period, stop_rx));

        info!(period_ms = period.as_millis() as u64, "Ticker started");
        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
            period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Stop ticking and wait for the task to exit.
    ///
    /// Returns the number of ticks this ticker delivered.
    pub async fn stop(mut self) -> u64 {
        if let Some(tx) = self.stop_tx.take() {
            // The task may already be gone; that is fine
            let _ = tx.send(());
        }

        let delivered = match self.handle.take() {
            Some(handle) => match handle.await {
                Ok(n) => n,
                Err(e) => {
                    warn!(error = %e, "Ticker task ended abnormally");
                    0
                }
            },
            None => 0,
        };

        info!(ticks = delivered, "Ticker stopped");
        delivered
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn run(session: SharedSession, period: Duration, mut stop_rx: oneshot::Receiver<()>) -> u64 {
    let mut interval = time::interval_at(Instant::now() + period, period);
    // A stalled runtime must not replay a burst of catch-up ticks
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut delivered = 0u64;

    loop {
        tokio::select! {
            biased;
            _ = &mut stop_rx => break,
            _ = interval.tick() => {
                let report = session.write().await.advance();
                delivered += 1;
                debug!(
                    tick = report.tick,
                    now = %ClockSimulator::format_for_display(&report.timestamp),
                    newly_past_due = report.newly_past_due,
                    past_due_total = report.past_due_total,
                    "Tick delivered"
                );
            }
        }
    }

    delivered
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
