//! Session handlers: entering the access code, leaving, and reading state

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::AppState;
use osintdeck_common::{
    dashboard::{Action, DashboardState, Screen},
    errors::{AppError, Result},
};

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub access_code: String,
}

/// Enter the access code
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<DashboardState>> {
    let current = state.store.snapshot().await;
    if current.screen == Screen::Boot {
        return Err(AppError::Forbidden {
            message: "Dashboard is still booting".to_string(),
        });
    }
    if current.authenticated {
        return Ok(Json(current));
    }

    state.store.dispatch(Action::LoginStarted).await;

    match state.gate.verify(&request.access_code).await {
        Ok(()) => Ok(Json(state.store.dispatch(Action::LoginSucceeded).await)),
        Err(e) => {
            state
                .store
                .dispatch(Action::LoginFailed {
                    reason: e.to_string(),
                })
                .await;
            Err(e)
        }
    }
}

/// Leave the dashboard
pub async fn logout(State(state): State<AppState>) -> Json<DashboardState> {
    state.store.dispatch(Action::RequestLogout).await;
    let next = state.store.dispatch(Action::ConfirmLogout).await;

    tracing::info!("Session closed");
    Json(next)
}

/// Current dashboard state
pub async fn get_state(State(state): State<AppState>) -> Json<DashboardState> {
    Json(state.store.snapshot().await)
}
