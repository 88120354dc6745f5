/// Preset and pack item API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use patchbay_core::{CatalogPreset, Pack, PackId, PresetId};
use patchbay_storage::catalog;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// GET /api/presets/:id
pub async fn get_preset(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<CatalogPreset>> {
    let preset = catalog::get_preset(&app_state.db, &PresetId::new(id))
        .await?
        .ok_or_else(|| ServerError::NotFound("Preset not found".to_string()))?;
    Ok(Json(preset))
}

/// GET /api/packs
pub async fn list_packs(
    State(app_state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<Pack>>> {
    let packs = catalog::list_packs(&app_state.db, query.limit, query.offset).await?;
    Ok(Json(packs))
}

/// GET /api/packs/:id
pub async fn get_pack(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Pack>> {
    let pack = catalog::get_pack(&app_state.db, &PackId::new(id))
        .await?
        .ok_or_else(|| ServerError::NotFound("Pack not found".to_string()))?;
    Ok(Json(pack))
}

/// DELETE /api/presets/:id
pub async fn delete_preset(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    catalog::delete_preset(&app_state.db, &PresetId::new(id)).await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}

/// DELETE /api/packs/:id
pub async fn delete_pack(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    catalog::delete_pack(&app_state.db, &PackId::new(id)).await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
