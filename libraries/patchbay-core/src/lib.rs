//! Patchbay Core
//!
//! Shared domain types and error handling for the Patchbay preset marketplace.
//!
//! This crate provides the building blocks used by the storage layer, the
//! storefront client, and the server:
//! - **Domain Types**: `CatalogPreset`, `Pack`, `CartEntry`, `Designer`, etc.
//! - **Identifiers**: `PresetId`, `PackId`, `CartId`, and friends
//! - **Error Handling**: Unified `MarketError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use patchbay_core::types::{CartKind, ItemRef, ItemType};
//!
//! let item = ItemRef::preset("prst-123");
//! assert_eq!(item.kind, ItemType::Preset);
//! assert_eq!(ItemType::Preset.collection(), "presets");
//! assert_eq!(CartKind::Wishlist.other(), CartKind::Cart);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{MarketError, Result};

pub use types::{
    // Identifiers
    CartId, DesignerId, EntryId, GenreId, PackId, PresetId, VstId,
    // Catalog
    CatalogPreset, CreateDesigner, CreatePack, CreatePreset, Designer, Genre, Pack, PackPreset,
    Vst,
    // Cart / wishlist
    CartEntry, CartKind, ItemRef, ItemType,
};
