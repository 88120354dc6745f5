//! Patchbay Server Library
//!
//! HTTP API for the Patchbay preset marketplace: catalog search, cart and
//! wishlist mutations, and owner item management.
//!
//! This library exposes the router and core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

/// Build the API router with all routes attached.
pub fn create_router(app_state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        // Catalog
        .route("/catalog", get(api::catalog::search_catalog))
        // Items
        .route("/presets/:id", get(api::items::get_preset))
        .route("/presets/:id", delete(api::items::delete_preset))
        .route("/packs", get(api::items::list_packs))
        .route("/packs/:id", get(api::items::get_pack))
        .route("/packs/:id", delete(api::items::delete_pack))
        // Cart / wishlist
        .route("/cart", get(api::cart::list_entries))
        .route("/cart", post(api::cart::add_entry))
        .route("/cart", delete(api::cart::remove_entry))
        .route("/cart/move", put(api::cart::move_entry))
        // Designers
        .route("/designers/:id/presets", get(api::designers::list_presets))
        .route("/designers/:id/packs", get(api::designers::list_packs));

    Router::new()
        .nest("/api", api_routes)
        .with_state(app_state)
}
