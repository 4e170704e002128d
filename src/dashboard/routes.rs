//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is the shared session.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::clock::ClockSimulator;
use crate::engine::SharedSession;
use crate::types::{Field, Reminder, ValidationError};

pub type AppState = SharedSession;

/// ISO-8601 local timestamp; milliseconds keep sub-second ticks visible.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ClockResponse {
    pub timestamp: String,
    pub display: String,
    pub accelerated: bool,
    pub ticks: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewReminder {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    pub error: String,
    pub field: Field,
}

impl From<ValidationError> for ValidationResponse {
    fn from(err: ValidationError) -> Self {
        Self {
            field: err.field(),
            error: err.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/clock
pub async fn get_clock(State(state): State<AppState>) -> Json<ClockResponse> {
    let session = state.read().await;
    Json(clock_view(session.clock(), session.ticks()))
}

/// POST /api/clock/acceleration
pub async fn toggle_acceleration(State(state): State<AppState>) -> Json<ClockResponse> {
    let mut session = state.write().await;
    session.toggle_acceleration();
    Json(clock_view(session.clock(), session.ticks()))
}

/// GET /api/reminders
pub async fn get_reminders(State(state): State<AppState>) -> Json<Vec<Reminder>> {
    let session = state.read().await;
    Json(session.tracker().list().to_vec())
}

/// POST /api/reminders
pub async fn add_reminder(
    State(state): State<AppState>,
    Json(body): Json<NewReminder>,
) -> impl IntoResponse {
    let result = state.write().await.add_reminder(&body.text, &body.time);
    match result {
        Ok(reminder) => (StatusCode::CREATED, Json(reminder)).into_response(),
        Err(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationResponse::from(err)),
        )
            .into_response(),
    }
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

fn clock_view(clock: &ClockSimulator, ticks: u64) -> ClockResponse {
    let now = clock.now();
    ClockResponse {
        timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        display: ClockSimulator::format_for_display(&now),
        accelerated: clock.is_accelerated(),
        ticks,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
