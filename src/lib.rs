//! TICKMINDER — simulated clock with time-of-day reminders.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod clock;
pub mod tracker;
pub mod engine;
pub mod dashboard;
