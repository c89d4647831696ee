//! Root status endpoint.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

/// Root status response body.
#[derive(Debug, Serialize)]
pub struct RootStatus {
    pub success: bool,
    pub message: &'static str,
    pub database_connected: bool,
    pub ai_available: bool,
}

/// Root endpoint: confirms the API is up and summarizes dependency state.
///
/// `database_connected` is the startup probe result; `ai_available` only
/// reflects whether the AI credential is configured.
#[instrument(name = "root::index", skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<RootStatus> {
    Json(RootStatus {
        success: true,
        message: "InsideOut API is running",
        database_connected: state.database_connected,
        ai_available: state.config.ai_available(),
    })
}
