//! Keyword watchlist handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use osintdeck_common::{
    dashboard::Action,
    errors::{AppError, Result},
    watchlist::{
        Detection, Frequency, KeywordAlert, Sensitivity, WatchlistAction, WatchlistStats,
        DEFAULT_SOURCES,
    },
};

#[derive(Serialize)]
pub struct WatchlistResponse {
    pub alerts: Vec<KeywordAlert>,
    pub detections: Vec<Detection>,
    pub stats: WatchlistStats,
}

/// New keyword alert
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAlertRequest {
    #[validate(length(min = 1, max = 200))]
    pub keyword: String,

    #[serde(default)]
    pub sources: Option<Vec<String>>,

    #[serde(default)]
    pub frequency: Frequency,

    #[serde(default)]
    pub sensitivity: Sensitivity,
}

/// Alerts, detections and headline numbers
pub async fn get_watchlist(State(state): State<AppState>) -> Json<WatchlistResponse> {
    let watchlist = state.store.snapshot().await.watchlist;
    let stats = watchlist.stats(Utc::now());

    Json(WatchlistResponse {
        alerts: watchlist.alerts,
        detections: watchlist.detections,
        stats,
    })
}

/// Start monitoring a keyword
pub async fn create_alert(
    State(state): State<AppState>,
    Json(request): Json<CreateAlertRequest>,
) -> Result<(StatusCode, Json<KeywordAlert>)> {
    if request.keyword.trim().is_empty() {
        return Err(AppError::missing("keyword"));
    }
    request.validate()?;

    let id = Uuid::new_v4().to_string();
    let sources = request
        .sources
        .filter(|sources| !sources.is_empty())
        .unwrap_or_else(|| DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect());

    let next = state
        .store
        .dispatch(Action::Watchlist(WatchlistAction::Add {
            id: id.clone(),
            keyword: request.keyword,
            sources,
            frequency: request.frequency,
            sensitivity: request.sensitivity,
            at: Utc::now(),
        }))
        .await;

    let alert = next.watchlist.alert(&id).cloned().ok_or_else(|| AppError::Internal {
        message: "created alert missing from watchlist".to_string(),
    })?;

    tracing::info!(alert_id = %id, keyword = %alert.keyword, "Keyword alert created");
    Ok((StatusCode::CREATED, Json(alert)))
}

/// Pause or resume an alert
pub async fn toggle_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<KeywordAlert>> {
    let next = state
        .store
        .dispatch(Action::Watchlist(WatchlistAction::Toggle(id.clone())))
        .await;

    next.watchlist
        .alert(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Stop monitoring a keyword and drop its detections
pub async fn delete_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if state.store.snapshot().await.watchlist.alert(&id).is_none() {
        return Err(not_found(id));
    }

    state
        .store
        .dispatch(Action::Watchlist(WatchlistAction::Remove(id.clone())))
        .await;

    tracing::info!(alert_id = %id, "Keyword alert removed");
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: String) -> AppError {
    AppError::NotFound {
        resource_type: "keyword_alert".to_string(),
        id,
    }
}
