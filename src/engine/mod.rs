//! Core engine — the tick → advance clock → recompute reminders loop.

pub mod session;
pub mod ticker;

pub use session::{Session, SharedSession, TickReport};
pub use ticker::Ticker;

use anyhow::{Context, Result};
use tracing::info;

use crate::clock::{ClockSimulator, TimeSource};
use crate::config::AppConfig;

/// Build a session from config: start the clock at `source`'s current
/// time, apply the starting speed, and seed the initial reminder.
pub fn build_session(cfg: &AppConfig, source: &dyn TimeSource) -> Result<Session> {
    let settings = cfg.clock.settings().context("Invalid clock settings")?;
    let clock = ClockSimulator::initialize(source, settings);
    let mut session = Session::new(clock);

    if cfg.clock.start_accelerated {
        session.toggle_acceleration();
    }

    if cfg.reminders.seed_initial {
        let seeded = session
            .seed_reminder(&cfg.reminders.seed_text)
            .context("Failed to seed initial reminder")?;
        info!(text = %seeded.text(), due_at = %seeded.target_time(), "Initial reminder ready");
    }

    Ok(session)
}
