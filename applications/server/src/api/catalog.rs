/// Catalog API routes
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use patchbay_core::CatalogPreset;
use patchbay_storage::{catalog, CatalogFilter};
use serde::Deserialize;

/// Raw catalog query parameters. Absent or blank filter parameters leave the
/// query unconstrained; the filter module handles parsing.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default, rename = "searchTerm")]
    pub search_term: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default, rename = "vstTypes")]
    pub vst_types: Option<String>,
    #[serde(default, rename = "presetTypes")]
    pub preset_types: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// GET /api/catalog
pub async fn search_catalog(
    State(app_state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<CatalogPreset>>> {
    let filter = CatalogFilter::from_params(
        query.search_term.as_deref(),
        query.genres.as_deref(),
        query.vst_types.as_deref(),
        query.preset_types.as_deref(),
    );

    let presets = catalog::search(&app_state.db, &filter, query.limit, query.offset).await?;
    Ok(Json(presets))
}
