/// Cart and wishlist API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use patchbay_core::{CartEntry, CartKind, ItemRef};
use patchbay_storage::carts;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct EntriesQuery {
    pub owner: String,
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct CartMutation {
    pub owner_id: String,
    #[serde(flatten)]
    pub item: ItemRef,
    pub cart_type: CartKind,
}

#[derive(Debug, Deserialize)]
pub struct CartMove {
    pub owner_id: String,
    #[serde(flatten)]
    pub item: ItemRef,
    pub from: CartKind,
}

/// GET /api/cart?owner=..&kind=..
pub async fn list_entries(
    State(app_state): State<AppState>,
    Query(query): Query<EntriesQuery>,
) -> Result<Json<Vec<CartEntry>>> {
    let kind: CartKind = query
        .kind
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("Unknown cart kind: {}", query.kind)))?;

    let entries = carts::entries(&app_state.db, &query.owner, kind).await?;
    Ok(Json(entries))
}

/// POST /api/cart
pub async fn add_entry(
    State(app_state): State<AppState>,
    Json(body): Json<CartMutation>,
) -> Result<Json<serde_json::Value>> {
    carts::add(&app_state.db, &body.owner_id, body.cart_type, &body.item).await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}

/// PUT /api/cart/move
pub async fn move_entry(
    State(app_state): State<AppState>,
    Json(body): Json<CartMove>,
) -> Result<Json<serde_json::Value>> {
    carts::move_item(&app_state.db, &body.owner_id, &body.item, body.from).await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}

/// DELETE /api/cart
pub async fn remove_entry(
    State(app_state): State<AppState>,
    Json(body): Json<CartMutation>,
) -> Result<Json<serde_json::Value>> {
    carts::remove(&app_state.db, &body.owner_id, body.cart_type, &body.item).await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
