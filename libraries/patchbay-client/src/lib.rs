//! Patchbay Storefront Client
//!
//! HTTP client and client-side state for the Patchbay storefront.
//!
//! # Features
//!
//! - **Catalog**: search presets and browse packs
//! - **Cart/Wishlist actions**: add, move, remove, delete - each with
//!   optimistic local updates, cache invalidation, and toast notifications
//! - **Session store**: explicit application-state container holding the two
//!   entry collections, per-item loading flags, and navigation state
//! - **Catalog cards**: view models for rendering items with audio previews
//!
//! # Example
//!
//! ```ignore
//! use patchbay_client::{CartActions, SessionStore, StoreConfig, StorefrontClient};
//! use patchbay_core::ItemRef;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(StorefrontClient::new(StoreConfig::new(
//!         "https://store.example.com",
//!     ))?);
//!     let store = SessionStore::new();
//!     let actions = CartActions::new(client, store.clone(), "user-1");
//!
//!     actions
//!         .add_to_cart(&ItemRef::preset("prst-1"), "Acid Lead", 499)
//!         .await?;
//!
//!     for toast in store.drain_toasts().await {
//!         println!("{}: {}", toast.kind, toast.message);
//!     }
//!     Ok(())
//! }
//! ```

mod actions;
mod card;
mod client;
mod error;
mod store;
mod types;

// Re-export main types
pub use actions::CartActions;
pub use card::{CatalogCard, CatalogItem, MAX_PACK_ROWS};
pub use client::StorefrontClient;
pub use error::{ClientError, Result};
pub use store::SessionStore;
pub use types::{CartMutationRequest, CatalogParams, MoveRequest, Route, StoreConfig, Toast, ToastKind};
