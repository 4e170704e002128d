//! Simulated clock.
//!
//! Holds the one authoritative simulated timestamp. Each tick advances it
//! by either the real tick interval (1:1 with wall time) or a fixed
//! fast-forward step, so the reminder tracker only ever sees a timestamp
//! moving forward and never needs to know the speed.

use chrono::{Local, NaiveDateTime};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Display format for simulated timestamps.
const DISPLAY_FORMAT: &str = "%H:%M:%S";

// ---------------------------------------------------------------------------
// Time source
// ---------------------------------------------------------------------------

/// Where the clock reads the real current time from at construction.
#[cfg_attr(test, mockall::automock)]
pub trait TimeSource {
    /// Current local wall-clock date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the host's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Rejected clock settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Tick interval must be greater than zero")]
    ZeroTickInterval,

    #[error("Fast-forward step must be greater than zero")]
    ZeroFastForwardStep,
}

/// How far a tick moves the clock in each mode.
///
/// Both durations are non-zero; [`ClockSettings::new`] is the only way to
/// build one with custom values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSettings {
    tick_interval: Duration,
    fast_forward_step: Duration,
}

impl ClockSettings {
    pub fn new(tick_interval: Duration, fast_forward_step: Duration) -> Result<Self, SettingsError> {
        if tick_interval.is_zero() {
            return Err(SettingsError::ZeroTickInterval);
        }
        if fast_forward_step.is_zero() {
            return Err(SettingsError::ZeroFastForwardStep);
        }
        Ok(Self {
            tick_interval,
            fast_forward_step,
        })
    }

    /// Default fast-forward step with a custom tick interval.
    pub fn with_tick_interval(tick_interval: Duration) -> Result<Self, SettingsError> {
        Self::new(tick_interval, Self::default().fast_forward_step)
    }

    /// Real time between ticks; also the simulated advance in normal mode.
    /// The ticker runs at exactly this period.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Simulated advance per tick while accelerated.
    pub fn fast_forward_step(&self) -> Duration {
        self.fast_forward_step
    }
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(1000),
            fast_forward_step: Duration::from_secs(60),
        }
    }
}

// ---------------------------------------------------------------------------
// Clock simulator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ClockSimulator {
    current: NaiveDateTime,
    accelerated: bool,
    settings: ClockSettings,
}

impl ClockSimulator {
    /// Start a clock at the host's current local time.
    pub fn new(settings: ClockSettings) -> Self {
        Self::initialize(&SystemTimeSource, settings)
    }

    /// Start a clock at whatever `source` reports as now.
    ///
    /// The source is consulted exactly once; from here on the clock only
    /// moves through [`tick`](Self::tick).
    pub fn initialize(source: &dyn TimeSource, settings: ClockSettings) -> Self {
        Self::starting_at(source.now(), settings)
    }

    /// Start a clock at a fixed instant.
    pub fn starting_at(start: NaiveDateTime, settings: ClockSettings) -> Self {
        info!(
            start = %start,
            tick_interval_ms = settings.tick_interval.as_millis() as u64,
            fast_forward_secs = settings.fast_forward_step.as_secs(),
            "Simulated clock initialised"
        );
        Self {
            current: start,
            accelerated: false,
            settings,
        }
    }

    /// Current simulated timestamp.
    pub fn now(&self) -> NaiveDateTime {
        self.current
    }

    pub fn is_accelerated(&self) -> bool {
        self.accelerated
    }

    pub fn settings(&self) -> &ClockSettings {
        &self.settings
    }

    /// The amount of simulated time the next tick will add.
    pub fn step(&self) -> Duration {
        if self.accelerated {
            self.settings.fast_forward_step
        } else {
            self.settings.tick_interval
        }
    }

    /// Advance the simulated timestamp by one step and return the new value.
    ///
    /// The timestamp never moves backwards. If the advance would overflow
    /// the representable range the clock stays where it is.
    pub fn tick(&mut self) -> NaiveDateTime {
        let step = self.step();
        let next = chrono::Duration::from_std(step)
            .ok()
            .and_then(|delta| self.current.checked_add_signed(delta));

        match next {
            Some(ts) => {
                self.current = ts;
                debug!(
                    now = %Self::format_for_display(&ts),
                    accelerated = self.accelerated,
                    "Tick"
                );
            }
            None => {
                warn!(
                    now = %self.current,
                    step_ms = step.as_millis() as u64,
                    "Simulated clock cannot advance further"
                );
            }
        }
        self.current
    }

    /// Flip between real-time and fast-forward. Returns the new mode.
    pub fn toggle_acceleration(&mut self) -> bool {
        self.accelerated = !self.accelerated;
        info!(accelerated = self.accelerated, "Clock speed toggled");
        self.accelerated
    }

    /// Render a timestamp as zero-padded 24-hour `HH:MM:SS`.
    pub fn format_for_display(ts: &NaiveDateTime) -> String {
        ts.format(DISPLAY_FORMAT).to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn settings_secs(tick: u64) -> ClockSettings {
        ClockSettings::with_tick_interval(Duration::from_secs(tick)).unwrap()
    }

    #[test]
    fn test_initialize_reads_source_once() {
        let mut source = MockTimeSource::new();
        source.expect_now().times(1).return_const(at(8, 59, 0));

        let mut clock = ClockSimulator::initialize(&source, ClockSettings::default());
        assert_eq!(clock.now(), at(8, 59, 0));

        // Ticking must not consult the source again
        clock.tick();
        clock.tick();
        assert_eq!(clock.now(), at(8, 59, 2));
    }

    #[test]
    fn test_new_starts_near_wall_clock() {
        let before = Local::now().naive_local();
        let clock = ClockSimulator::new(ClockSettings::default());
        let after = Local::now().naive_local();
        assert!(clock.now() >= before && clock.now() <= after);
        assert!(!clock.is_accelerated());
    }

    #[test]
    fn test_zero_durations_rejected() {
        assert_eq!(
            ClockSettings::with_tick_interval(Duration::ZERO),
            Err(SettingsError::ZeroTickInterval)
        );
        assert_eq!(
            ClockSettings::new(Duration::from_secs(1), Duration::ZERO),
            Err(SettingsError::ZeroFastForwardStep)
        );

        let settings = ClockSettings::new(Duration::from_millis(500), Duration::from_secs(30)).unwrap();
        assert_eq!(settings.tick_interval(), Duration::from_millis(500));
        assert_eq!(settings.fast_forward_step(), Duration::from_secs(30));
    }

    #[test]
    fn test_normal_ticks_sum_to_interval() {
        let settings = ClockSettings::with_tick_interval(Duration::from_millis(250)).unwrap();
        let mut clock = ClockSimulator::starting_at(at(12, 0, 0), settings);
        for _ in 0..8 {
            clock.tick();
        }
        assert_eq!(clock.now(), at(12, 0, 2));
    }

    #[test]
    fn test_accelerated_tick_is_one_minute() {
        let mut clock = ClockSimulator::starting_at(at(8, 0, 0), ClockSettings::default());
        assert!(clock.toggle_acceleration());
        assert_eq!(clock.tick(), at(8, 1, 0));
        assert_eq!(clock.tick(), at(8, 2, 0));
    }

    #[test]
    fn test_accelerated_step_ignores_tick_interval() {
        let mut clock = ClockSimulator::starting_at(at(8, 0, 0), settings_secs(5));
        clock.toggle_acceleration();
        assert_eq!(clock.step(), Duration::from_secs(60));
        for _ in 0..3 {
            clock.tick();
        }
        assert_eq!(clock.now(), at(8, 3, 0));
    }

    #[test]
    fn test_toggle_pairs_restore_state() {
        let mut clock = ClockSimulator::starting_at(at(8, 0, 0), ClockSettings::default());
        clock.toggle_acceleration();
        clock.toggle_acceleration();
        assert!(!clock.is_accelerated());
        assert_eq!(clock.tick(), at(8, 0, 1));
    }

    #[test]
    fn test_tick_crosses_midnight() {
        let mut clock = ClockSimulator::starting_at(at(23, 59, 30), settings_secs(60));
        let next = clock.tick();
        assert_eq!(next.date(), NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());
        assert_eq!((next.hour(), next.minute(), next.second()), (0, 0, 30));
    }

    #[test]
    fn test_tick_never_moves_backwards_at_range_end() {
        let mut clock = ClockSimulator::starting_at(NaiveDateTime::MAX, ClockSettings::default());
        assert_eq!(clock.tick(), NaiveDateTime::MAX);
    }

    #[test]
    fn test_format_for_display() {
        assert_eq!(ClockSimulator::format_for_display(&at(8, 5, 3)), "08:05:03");
        assert_eq!(ClockSimulator::format_for_display(&at(23, 59, 59)), "23:59:59");
        assert_eq!(ClockSimulator::format_for_display(&at(0, 0, 0)), "00:00:00");
    }
}
