//! Shared types for the reminder clock.
//!
//! The clock, the tracker, and the dashboard all speak in terms of these
//! types, so they live in one place with no dependencies on other modules.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Minutes in one day; minutes-since-midnight values wrap here.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

// ---------------------------------------------------------------------------
// Time of day
// ---------------------------------------------------------------------------

/// A wall-clock time of day with minute resolution, independent of the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Build a time of day, rejecting hours above 23 and minutes above 59.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::target_time(
                format!("{hour:02}:{minute:02}"),
                "hour must be between 0 and 23",
            ));
        }
        if minute > 59 {
            return Err(ValidationError::target_time(
                format!("{hour:02}:{minute:02}"),
                "minute must be between 0 and 59",
            ));
        }
        Ok(Self { hour, minute })
    }

    /// The time-of-day component of a timestamp, truncated to the minute.
    pub fn from_timestamp(ts: &NaiveDateTime) -> Self {
        // chrono guarantees hour < 24 and minute < 60
        Self {
            hour: ts.hour() as u8,
            minute: ts.minute() as u8,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight (0..1440).
    pub fn minutes_since_midnight(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Minutes-since-midnight of a full timestamp; seconds are discarded.
    pub fn minutes_of(ts: &NaiveDateTime) -> u16 {
        Self::from_timestamp(ts).minutes_since_midnight()
    }

    /// The time `minutes` later, wrapping past midnight.
    pub fn plus_minutes(&self, minutes: u16) -> Self {
        let total = (self.minutes_since_midnight() + minutes % MINUTES_PER_DAY) % MINUTES_PER_DAY;
        Self {
            hour: (total / 60) as u8,
            minute: (total % 60) as u8,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Parse `HH:MM` (a single-digit hour is tolerated, minutes need two digits).
impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let (hours, minutes) = raw
            .split_once(':')
            .ok_or_else(|| ValidationError::target_time(raw, "expected HH:MM"))?;

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(hours) || hours.len() > 2 || !all_digits(minutes) || minutes.len() != 2 {
            return Err(ValidationError::target_time(raw, "expected HH:MM"));
        }

        let hour: u8 = hours
            .parse()
            .map_err(|_| ValidationError::target_time(raw, "hour is not a number"))?;
        let minute: u8 = minutes
            .parse()
            .map_err(|_| ValidationError::target_time(raw, "minute is not a number"))?;

        Self::new(hour, minute).map_err(|e| match e {
            ValidationError::InvalidTargetTime { reason, .. } => {
                ValidationError::target_time(raw, reason)
            }
            other => other,
        })
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// Reminder
// ---------------------------------------------------------------------------

/// A single reminder entry.
///
/// `is_past_due` is derived state: only the tracker's recompute step writes
/// it, which is why the fields are private.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    id: Uuid,
    text: String,
    time: TimeOfDay,
    is_past_due: bool,
    created_at: NaiveDateTime,
}

impl Reminder {
    pub(crate) fn new(text: String, time: TimeOfDay, created_at: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            time,
            is_past_due: false,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target_time(&self) -> TimeOfDay {
        self.time
    }

    pub fn is_past_due(&self) -> bool {
        self.is_past_due
    }

    /// Simulated timestamp at which the reminder was added.
    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Re-derive the past-due flag. Returns true if the entry just became due.
    pub(crate) fn evaluate(&mut self, current_minutes: u16) -> bool {
        let was_past_due = self.is_past_due;
        self.is_past_due = current_minutes >= self.time.minutes_since_midnight();
        self.is_past_due && !was_past_due
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_past_due { "x" } else { " " };
        write!(f, "[{marker}] {} {}", self.time, self.text)
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Which reminder input failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Text,
    TargetTime,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Text => write!(f, "text"),
            Field::TargetTime => write!(f, "target_time"),
        }
    }
}

/// Rejection of a reminder add. The collection is never touched when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Reminder text must not be empty")]
    EmptyText,

    #[error("Invalid target time {value:?}: {reason}")]
    InvalidTargetTime { value: String, reason: String },
}

impl ValidationError {
    pub fn target_time(value: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidTargetTime {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// The input field this error refers to.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::EmptyText => Field::Text,
            ValidationError::InvalidTargetTime { .. } => Field::TargetTime,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
