//! End-to-end clock and reminder scenarios.
//!
//! Drives a session tick by tick from a fixed start time and checks the
//! past-due flags the presentation layer would render.

use chrono::{NaiveDate, NaiveDateTime};
use std::time::Duration;

use tickminder::clock::{ClockSettings, ClockSimulator};
use tickminder::engine::Session;
use tickminder::types::Field;

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

fn session(start: NaiveDateTime, tick: Duration) -> Session {
    let settings = ClockSettings::with_tick_interval(tick).unwrap();
    Session::new(ClockSimulator::starting_at(start, settings))
}

fn flags(session: &Session) -> Vec<bool> {
    session.tracker().list().iter().map(|r| r.is_past_due()).collect()
}

#[test]
fn standup_becomes_due_on_the_minute() {
    let mut s = session(at(8, 59, 0), Duration::from_secs(60));
    s.add_reminder("Standup", "09:00").unwrap();

    let report = s.advance();
    assert_eq!(report.timestamp, at(9, 0, 0));
    assert_eq!(ClockSimulator::format_for_display(&report.timestamp), "09:00:00");
    assert_eq!(flags(&s), vec![true]);
}

#[test]
fn reminder_at_current_minute_is_due_immediately() {
    let mut s = session(at(10, 0, 0), Duration::from_secs(1));
    s.add_reminder("Now", "10:00").unwrap();
    s.advance();
    assert_eq!(flags(&s), vec![true]);
}

#[test]
fn fast_forward_reaches_reminders_sooner() {
    let mut s = session(at(8, 0, 0), Duration::from_secs(1));
    s.add_reminder("Soon", "08:05").unwrap();
    s.add_reminder("Later", "09:00").unwrap();

    // Real-time: five minutes of one-second ticks
    for _ in 0..300 {
        s.advance();
    }
    assert_eq!(s.clock().now(), at(8, 5, 0));
    assert_eq!(flags(&s), vec![true, false]);

    // Fast-forward: 55 ticks cover the remaining 55 minutes
    s.toggle_acceleration();
    for _ in 0..54 {
        s.advance();
    }
    assert_eq!(flags(&s), vec![true, false]);
    s.advance();
    assert_eq!(s.clock().now(), at(9, 0, 0));
    assert_eq!(flags(&s), vec![true, true]);
}

#[test]
fn invalid_adds_never_change_the_list() {
    let mut s = session(at(8, 0, 0), Duration::from_secs(1));
    s.add_reminder("Keep", "12:00").unwrap();

    let err = s.add_reminder("", "09:00").unwrap_err();
    assert_eq!(err.field(), Field::Text);
    let err = s.add_reminder("Meeting", "25:00").unwrap_err();
    assert_eq!(err.field(), Field::TargetTime);
    let err = s.add_reminder("Meeting", "9am").unwrap_err();
    assert_eq!(err.field(), Field::TargetTime);

    assert_eq!(s.tracker().len(), 1);
    assert_eq!(s.tracker().list()[0].text(), "Keep");
}

#[test]
fn flags_never_regress_within_a_day() {
    let mut s = session(at(6, 0, 0), Duration::from_secs(45));
    for (text, time) in [("a", "06:01"), ("b", "07:30"), ("c", "12:00"), ("d", "06:00")] {
        s.add_reminder(text, time).unwrap();
    }

    let mut previous = flags(&s);
    while s.clock().now() < at(13, 0, 0) {
        s.advance();
        let current = flags(&s);
        for (before, after) in previous.iter().zip(&current) {
            assert!(!(*before && !*after));
        }
        previous = current;
    }
    assert_eq!(previous, vec![true, true, true, true]);
}
