//! TICKMINDER — simulated clock with time-of-day reminders.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! builds the session, and runs the ticker (plus the dashboard API when
//! enabled) until Ctrl+C.

use anyhow::Result;
use tracing::{info, warn};

use tickminder::clock::{ClockSimulator, SystemTimeSource};
use tickminder::config::AppConfig;
use tickminder::dashboard;
use tickminder::engine::{self, Ticker};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let config_path = AppConfig::resolve_path();
    let cfg = AppConfig::load_or_default(&config_path)?;

    info!(
        config = %config_path,
        tick_interval_ms = cfg.clock.tick_interval_ms,
        fast_forward_step_secs = cfg.clock.fast_forward_step_secs,
        start_accelerated = cfg.clock.start_accelerated,
        "TICKMINDER starting up"
    );

    let session = engine::build_session(&cfg, &SystemTimeSource)?.into_shared();

    let dashboard_task = if cfg.dashboard.enabled {
        Some(dashboard::spawn_dashboard(session.clone(), cfg.dashboard.port).await?)
    } else {
        info!("Dashboard disabled");
        None
    };

    let ticker = Ticker::spawn(session.clone()).await;

    info!("Clock running. Press Ctrl+C to stop.");
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal, stopping now");
    } else {
        info!("Shutdown signal received.");
    }

    let ticks = ticker.stop().await;
    if let Some(task) = dashboard_task {
        task.abort();
    }

    let s = session.read().await;
    info!(
        ticks,
        simulated_time = %ClockSimulator::format_for_display(&s.clock().now()),
        reminders = s.tracker().len(),
        past_due = s.tracker().past_due_count(),
        "TICKMINDER shut down cleanly."
    );

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tickminder=info"));

    let json_logging = std::env::var("TICKMINDER_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
