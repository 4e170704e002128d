//! Reminder tracker.
//!
//! Owns the ordered reminder list and keeps every entry's past-due flag in
//! line with the simulated clock. Entries are only ever appended; the order
//! they were added in is the order they are listed in.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::types::{Reminder, TimeOfDay, ValidationError};

#[derive(Debug, Clone, Default)]
pub struct ReminderTracker {
    reminders: Vec<Reminder>,
}

impl ReminderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a reminder given as raw form input.
    ///
    /// `target_time` must be `HH:MM`. On error nothing is appended.
    pub fn add_reminder(
        &mut self,
        text: &str,
        target_time: &str,
        now: NaiveDateTime,
    ) -> Result<&Reminder, ValidationError> {
        // Text is checked first so an empty form reports the text field
        let text = Self::validate_text(text)?;
        let time: TimeOfDay = target_time.parse()?;
        Ok(self.push(text, time, now))
    }

    /// Append a reminder whose time is already typed.
    pub fn add_reminder_at(
        &mut self,
        text: &str,
        time: TimeOfDay,
        now: NaiveDateTime,
    ) -> Result<&Reminder, ValidationError> {
        let text = Self::validate_text(text)?;
        Ok(self.push(text, time, now))
    }

    /// Re-derive every entry's past-due flag against `now`.
    ///
    /// Only the time of day of `now` matters. Returns the number of entries
    /// that became past-due on this call.
    pub fn recompute(&mut self, now: NaiveDateTime) -> usize {
        let current_minutes = TimeOfDay::minutes_of(&now);
        let mut newly_due = 0;

        for reminder in &mut self.reminders {
            if reminder.evaluate(current_minutes) {
                newly_due += 1;
                info!(
                    id = %reminder.id(),
                    text = %reminder.text(),
                    due_at = %reminder.target_time(),
                    "Reminder is now past due"
                );
            }
        }

        debug!(
            current_minutes,
            total = self.reminders.len(),
            newly_due,
            "Reminders recomputed"
        );
        newly_due
    }

    /// All reminders in insertion order.
    pub fn list(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    pub fn past_due_count(&self) -> usize {
        self.reminders.iter().filter(|r| r.is_past_due()).count()
    }

    fn validate_text(text: &str) -> Result<String, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(trimmed.to_string())
    }

    fn push(&mut self, text: String, time: TimeOfDay, now: NaiveDateTime) -> &Reminder {
        let reminder = Reminder::new(text, time, now);
        info!(
            id = %reminder.id(),
            text = %reminder.text(),
            due_at = %time,
            position = self.reminders.len(),
            "Reminder added"
        );
        self.reminders.push(reminder);
        &self.reminders[self.reminders.len() - 1]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
