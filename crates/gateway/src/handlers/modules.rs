//! Module navigation handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::AppState;
use osintdeck_common::{
    dashboard::{Action, DashboardState, ModuleKind},
    errors::{AppError, Result},
};

/// Open a module screen
pub async fn open_module(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DashboardState>> {
    let kind = ModuleKind::parse(&id).ok_or_else(|| AppError::NotFound {
        resource_type: "module".to_string(),
        id: id.clone(),
    })?;

    let next = state.store.dispatch(Action::OpenModule(kind)).await;
    tracing::info!(module = %kind, "Module opened");

    Ok(Json(next))
}

/// Return to the home screen
pub async fn close_module(State(state): State<AppState>) -> Json<DashboardState> {
    Json(state.store.dispatch(Action::CloseModule).await)
}
