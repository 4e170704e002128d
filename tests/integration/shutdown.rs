//! Ticker lifecycle against a shared session.

use chrono::{NaiveDate, NaiveDateTime};
use std::time::Duration;

use tickminder::clock::{ClockSettings, ClockSimulator};
use tickminder::engine::{Session, Ticker};

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(8, 59, 58)
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn ticker_drives_reminders_then_stops() {
    let session = Session::new(ClockSimulator::starting_at(start(), ClockSettings::default())).into_shared();
    session.write().await.add_reminder("Standup", "09:00").unwrap();

    let ticker = Ticker::spawn(session.clone()).await;

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(!session.read().await.tracker().list()[0].is_past_due());

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(session.read().await.tracker().list()[0].is_past_due());

    assert_eq!(ticker.stop().await, 2);

    tokio::time::sleep(Duration::from_secs(30)).await;
    let s = session.read().await;
    assert_eq!(s.ticks(), 2);
    assert_eq!(ClockSimulator::format_for_display(&s.clock().now()), "09:00:00");
}

#[tokio::test(start_paused = true)]
async fn adds_interleave_with_ticks() {
    let session = Session::new(ClockSimulator::starting_at(start(), ClockSettings::default())).into_shared();
    let ticker = Ticker::spawn(session.clone()).await;

    tokio::time::sleep(Duration::from_millis(500)).await;
    session.write().await.add_reminder("First", "09:00").unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    session.write().await.add_reminder("Second", "08:00").unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    ticker.stop().await;

    let s = session.read().await;
    let texts: Vec<_> = s.tracker().list().iter().map(|r| r.text().to_string()).collect();
    assert_eq!(texts, vec!["First", "Second"]);
    assert_eq!(s.tracker().past_due_count(), 2);
}
