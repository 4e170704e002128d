//! Session — one clock plus one reminder list.
//!
//! The session is the unit the ticker and the dashboard share. Every
//! mutation (a tick with its recompute, an add, a speed toggle) happens
//! under a single write lock on the shared session, so a tick and an add
//! can never interleave.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::clock::ClockSimulator;
use crate::tracker::ReminderTracker;
use crate::types::{Reminder, TimeOfDay, ValidationError};

/// A session shared between the ticker task and request handlers.
pub type SharedSession = Arc<RwLock<Session>>;

/// Outcome of a single tick-and-recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// 1-based count of ticks delivered to this session.
    pub tick: u64,
    pub timestamp: NaiveDateTime,
    pub newly_past_due: usize,
    pub past_due_total: usize,
}

#[derive(Debug, Clone)]
pub struct Session {
    clock: ClockSimulator,
    tracker: ReminderTracker,
    ticks: u64,
}

impl Session {
    pub fn new(clock: ClockSimulator) -> Self {
        Self {
            clock,
            tracker: ReminderTracker::new(),
            ticks: 0,
        }
    }

    /// Wrap the session for sharing across tasks.
    pub fn into_shared(self) -> SharedSession {
        Arc::new(RwLock::new(self))
    }

    pub fn clock(&self) -> &ClockSimulator {
        &self.clock
    }

    pub fn tracker(&self) -> &ReminderTracker {
        &self.tracker
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance the clock one tick, then re-evaluate every reminder.
    pub fn advance(&mut self) -> TickReport {
        let now = self.clock.tick();
        let newly_past_due = self.tracker.recompute(now);
        self.ticks += 1;

        TickReport {
            tick: self.ticks,
            timestamp: now,
            newly_past_due,
            past_due_total: self.tracker.past_due_count(),
        }
    }

    /// Add a reminder from raw input, stamped with the simulated time.
    pub fn add_reminder(&mut self, text: &str, target_time: &str) -> Result<Reminder, ValidationError> {
        let now = self.clock.now();
        self.tracker.add_reminder(text, target_time, now).cloned()
    }

    pub fn toggle_acceleration(&mut self) -> bool {
        self.clock.toggle_acceleration()
    }

    /// Add a reminder due one minute after the current simulated time.
    pub fn seed_reminder(&mut self, text: &str) -> Result<Reminder, ValidationError> {
        let now = self.clock.now();
        let target = TimeOfDay::from_timestamp(&now).plus_minutes(1);
        let reminder = self.tracker.add_reminder_at(text, target, now)?.clone();
        info!(due_at = %target, "Seeded initial reminder");
        Ok(reminder)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
