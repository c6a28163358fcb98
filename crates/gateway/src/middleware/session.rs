//! Session guard for routes behind the access gate

use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use osintdeck_common::errors::{AppError, Result};

/// Refuse requests until the access code has been entered
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    if !state.store.is_authenticated().await {
        return Err(AppError::Unauthorized {
            message: "Enter the access code first".to_string(),
        });
    }

    Ok(next.run(request).await)
}
