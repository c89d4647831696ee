//! Health check endpoint for container orchestration.
//!
//! Returns 200 OK whenever the process can respond to HTTP; dependency
//! degradation shows up only in the body's boolean fields. Used by load
//! balancers and orchestrators to verify the service is alive.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

/// Health snapshot response body.
#[derive(Debug, Serialize)]
pub struct HealthSnapshot {
    pub status: &'static str,
    pub database_connected: bool,
    pub ai_available: bool,
    /// Current server time, ISO-8601
    pub time: String,
}

/// Health check handler.
///
/// `database_connected` reflects the point-in-time startup probe, not
/// current reachability: if the database goes away after startup the flag
/// stays stale until the process restarts. `ai_available` is weaker still,
/// a configuration-presence check only. Clients depend on both behaviors.
#[instrument(name = "health::health", skip(state))]
pub async fn health(State(state): State<AppState>) -> Json<HealthSnapshot> {
    Json(HealthSnapshot {
        status: "ok",
        database_connected: state.database_connected,
        ai_available: state.config.ai_available(),
        time: Utc::now().to_rfc3339(),
    })
}
