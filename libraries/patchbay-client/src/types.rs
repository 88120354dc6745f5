//! Types for Patchbay server API requests and client-side state.

use patchbay_core::{CartKind, ItemRef, ItemType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for connecting to a Patchbay server.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the server (e.g., "https://store.example.com")
    pub url: String,
}

impl StoreConfig {
    /// Create a new store config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

// =============================================================================
// Catalog Types
// =============================================================================

/// Raw catalog search parameters, forwarded to the server as-is.
///
/// List parameters are comma-separated identifier lists; the server skips
/// absent or empty dimensions, so a default `CatalogParams` returns the full
/// catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogParams {
    pub search_term: Option<String>,
    pub genres: Option<String>,
    pub vst_types: Option<String>,
    pub preset_types: Option<String>,
}

impl CatalogParams {
    /// Query pairs for the request URL, skipping absent parameters
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(term) = self.search_term.as_deref() {
            pairs.push(("searchTerm", term));
        }
        if let Some(genres) = self.genres.as_deref() {
            pairs.push(("genres", genres));
        }
        if let Some(vst_types) = self.vst_types.as_deref() {
            pairs.push(("vstTypes", vst_types));
        }
        if let Some(preset_types) = self.preset_types.as_deref() {
            pairs.push(("presetTypes", preset_types));
        }
        pairs
    }
}

// =============================================================================
// Cart Mutation Types
// =============================================================================

/// Request body for add and remove operations.
#[derive(Debug, Clone, Serialize)]
pub struct CartMutationRequest {
    pub owner_id: String,
    #[serde(flatten)]
    pub item: ItemRef,
    pub cart_type: CartKind,
}

/// Request body for the atomic move between the two collections.
#[derive(Debug, Clone, Serialize)]
pub struct MoveRequest {
    pub owner_id: String,
    #[serde(flatten)]
    pub item: ItemRef,
    /// Source collection; the destination is implied
    pub from: CartKind,
}

/// Error payload returned by the server.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

// =============================================================================
// Client-side State Types
// =============================================================================

/// Toast notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastKind::Success => f.write_str("success"),
            ToastKind::Error => f.write_str("error"),
            ToastKind::Info => f.write_str("info"),
        }
    }
}

/// A queued user-facing notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Client-side navigation target.
///
/// The action layer only needs to distinguish the owned-items view (delete
/// navigates away from it) and the edit/dashboard destinations; everything
/// else is [`Route::Storefront`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Catalog browsing
    Storefront,
    /// The viewer's uploaded/owned items of one type
    Uploaded(ItemType),
    /// Owner dashboard listing for one item type
    Dashboard(ItemType),
    /// Edit screen for one item
    Edit { kind: ItemType, id: String },
}

impl Default for Route {
    fn default() -> Self {
        Route::Storefront
    }
}
