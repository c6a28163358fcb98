//! Health check handlers

use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use osintdeck_common::dashboard::Screen;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub screen: Screen,
}

/// Liveness probe - always returns healthy if server is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: osintdeck_common::VERSION.to_string(),
    })
}

/// Readiness probe - ready once the boot screen is over
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let screen = state.store.snapshot().await.screen;
    let booted = screen != Screen::Boot;

    let status = if booted {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadyResponse {
            status: if booted { "ready" } else { "booting" }.to_string(),
            screen,
        }),
    )
}
