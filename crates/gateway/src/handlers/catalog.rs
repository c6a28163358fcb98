//! Static catalogues: source filters and module tiles

use axum::Json;
use osintdeck_common::{
    dashboard::{catalog, ModuleTile},
    search::SourceFilter,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct SourceEntry {
    pub id: &'static str,
    pub label: &'static str,
}

/// Every search source filter with its display label
pub async fn list_sources() -> Json<Vec<SourceEntry>> {
    Json(
        SourceFilter::ALL
            .into_iter()
            .map(|filter| SourceEntry {
                id: filter.id(),
                label: filter.source_label(),
            })
            .collect(),
    )
}

/// Home screen module tiles
pub async fn list_modules() -> Json<Vec<ModuleTile>> {
    Json(catalog())
}
