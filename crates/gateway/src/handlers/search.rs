//! Search handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use osintdeck_common::{
    dashboard::{Action, DashboardState},
    errors::{AppError, Result},
    search::{SearchReport, SearchRequest},
};

/// Run a search and publish its findings to the search panel
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchReport>> {
    state.search.guard(&request.query)?;
    request.validate()?;

    let search_id = Uuid::new_v4();
    state
        .store
        .dispatch(Action::SearchEdited {
            query: request.query.clone(),
            source: request.source,
        })
        .await;
    state
        .store
        .dispatch(Action::SearchStarted { search_id })
        .await;

    let report = match state.search.search_as(search_id, request).await {
        Ok(report) => report,
        Err(e) => {
            state
                .store
                .dispatch(Action::SearchCompleted {
                    search_id,
                    findings: Vec::new(),
                })
                .await;
            return Err(e);
        }
    };

    let next = state
        .store
        .dispatch(Action::SearchCompleted {
            search_id,
            findings: report.findings.clone(),
        })
        .await;

    if next.search.last_completed != Some(search_id) {
        tracing::info!(search_id = %search_id, "Search superseded by a newer one");
    }

    Ok(Json(report))
}

/// Preview request; no finding closes the preview
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub finding_id: Option<String>,
}

/// Open or close the profile image preview of a displayed finding
pub async fn preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<DashboardState>> {
    let image = match request.finding_id {
        None => None,
        Some(id) => {
            let snapshot = state.store.snapshot().await;
            let finding = snapshot
                .search
                .results
                .iter()
                .find(|finding| finding.id == id)
                .ok_or_else(|| AppError::NotFound {
                    resource_type: "finding".to_string(),
                    id: id.clone(),
                })?;

            let image = finding.profile_image.clone().ok_or_else(|| AppError::NotFound {
                resource_type: "profile_image".to_string(),
                id: id.clone(),
            })?;
            Some(image)
        }
    };

    Ok(Json(state.store.dispatch(Action::PreviewImage(image)).await))
}
