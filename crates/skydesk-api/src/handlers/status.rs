//! / and /health handlers.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use skydesk_core::{SERVICE_NAME, SERVICE_VERSION};

use super::ApiState;

// ── / ───────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RootResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub active_devices: usize,
}

pub async fn handle_root(State(state): State<ApiState>) -> Json<RootResponse> {
    Json(RootResponse {
        service: SERVICE_NAME,
        version: SERVICE_VERSION,
        active_devices: state.registry.len(),
    })
}

// ── /health ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
