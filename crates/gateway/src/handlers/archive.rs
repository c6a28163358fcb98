//! Public records archive handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use osintdeck_common::{
    archive::{ArchiveQuery, ArchiveRecord, ArchiveSource},
    errors::Result,
};

#[derive(Serialize)]
pub struct ArchiveSearchResponse {
    pub total: usize,
    pub records: Vec<ArchiveRecord>,
}

/// Archive sources
pub async fn list_sources(State(state): State<AppState>) -> Json<Vec<ArchiveSource>> {
    Json(state.archive.sources.clone())
}

/// Search archive records
pub async fn search(
    State(state): State<AppState>,
    Json(query): Json<ArchiveQuery>,
) -> Result<Json<ArchiveSearchResponse>> {
    let latency = state.config.search.latency();
    let records: Vec<ArchiveRecord> = state
        .archive
        .search(&query)?
        .into_iter()
        .cloned()
        .collect();

    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    tracing::info!(
        category = ?query.category,
        source_id = ?query.source_id,
        records = records.len(),
        "Archive search completed"
    );

    Ok(Json(ArchiveSearchResponse {
        total: records.len(),
        records,
    }))
}
