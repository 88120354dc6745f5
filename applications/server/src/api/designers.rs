/// Designer (seller) API routes
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use patchbay_core::{CatalogPreset, DesignerId, Pack};
use patchbay_storage::catalog;

/// GET /api/designers/:id/presets - a designer's standalone presets
pub async fn list_presets(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<CatalogPreset>>> {
    let presets = catalog::designer_presets(&app_state.db, &DesignerId::new(id)).await?;
    Ok(Json(presets))
}

/// GET /api/designers/:id/packs - a designer's packs
pub async fn list_packs(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Pack>>> {
    let packs = catalog::designer_packs(&app_state.db, &DesignerId::new(id)).await?;
    Ok(Json(packs))
}
