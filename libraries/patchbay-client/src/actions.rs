//! Cart and wishlist action handlers.
//!
//! Each handler performs one user-initiated mutation end to end: guard the
//! per-item loading flag, apply any optimistic local update, call the server,
//! invalidate the affected cached collections, queue a toast, and clear the
//! flag. Failures leave the [`SessionStore`] consistent with the server.

use crate::client::StorefrontClient;
use crate::error::{ClientError, Result};
use crate::store::SessionStore;
use crate::types::{CartMutationRequest, MoveRequest, Route, ToastKind};
use chrono::Utc;
use patchbay_core::{CartEntry, CartId, CartKind, EntryId, ItemRef};
use std::sync::Arc;
use tracing::warn;

/// Action handlers binding one viewer's session to the server.
pub struct CartActions {
    client: Arc<StorefrontClient>,
    store: SessionStore,
    owner_id: String,
}

impl CartActions {
    pub fn new(
        client: Arc<StorefrontClient>,
        store: SessionStore,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            store,
            owner_id: owner_id.into(),
        }
    }

    /// The session store these actions mutate.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Add an item to the cart.
    ///
    /// The entry appears locally before the server responds; on failure the
    /// cart is re-synced from the server and an error toast is queued. The
    /// re-sync replaces the whole collection, so an optimistic entry for a
    /// different item that is still in flight at that moment is overwritten
    /// with server state.
    pub async fn add_to_cart(&self, item: &ItemRef, title: &str, price_cents: i64) -> Result<()> {
        if !self.store.begin_mutation(item).await {
            return Err(ClientError::MutationInFlight(item.clone()));
        }

        self.store
            .insert_optimistic(CartKind::Cart, local_entry(item, title, price_cents))
            .await;

        let result = self
            .client
            .add_entry(&self.mutation(item, CartKind::Cart))
            .await;

        match &result {
            Ok(()) => {
                self.store.invalidate(CartKind::Cart.as_str()).await;
                self.store
                    .push_toast(
                        ToastKind::Success,
                        format!("{} added to cart", item.kind.display_name()),
                    )
                    .await;
            }
            Err(err) => {
                warn!(item = %item, error = %err, "Add to cart failed, re-syncing");
                self.revert(CartKind::Cart, item).await;
                let message = err.server_message().map_or_else(
                    || format!("Failed to add {} to cart", item.kind.display_name()),
                    str::to_string,
                );
                self.store.push_toast(ToastKind::Error, message).await;
            }
        }

        self.store.end_mutation(item).await;
        result
    }

    /// Add an item to the wishlist.
    ///
    /// No optimistic update; the wishlist cache is invalidated on success and
    /// refetched by its consumer.
    pub async fn add_to_wishlist(&self, item: &ItemRef) -> Result<()> {
        if !self.store.begin_mutation(item).await {
            return Err(ClientError::MutationInFlight(item.clone()));
        }

        let result = self
            .client
            .add_entry(&self.mutation(item, CartKind::Wishlist))
            .await;

        match &result {
            Ok(()) => {
                self.store.invalidate(CartKind::Wishlist.as_str()).await;
                self.store
                    .push_toast(
                        ToastKind::Success,
                        format!("{} added to wishlist", item.kind.display_name()),
                    )
                    .await;
            }
            Err(err) => {
                let message = err.server_message().map_or_else(
                    || format!("Failed to add {} to wishlist", item.kind.display_name()),
                    str::to_string,
                );
                self.store.push_toast(ToastKind::Error, message).await;
            }
        }

        self.store.end_mutation(item).await;
        result
    }

    /// Move an item between the cart and the wishlist in a single server
    /// call, then invalidate both collections.
    pub async fn move_item(&self, item: &ItemRef, from: CartKind) -> Result<()> {
        if !self.store.begin_mutation(item).await {
            return Err(ClientError::MutationInFlight(item.clone()));
        }

        let request = MoveRequest {
            owner_id: self.owner_id.clone(),
            item: item.clone(),
            from,
        };
        let result = self.client.move_entry(&request).await;

        match &result {
            Ok(()) => {
                // Both collections changed; each consumer refetches once
                self.store.invalidate(from.as_str()).await;
                self.store.invalidate(from.other().as_str()).await;
                self.store
                    .push_toast(
                        ToastKind::Success,
                        format!(
                            "{} moved to {}",
                            item.kind.display_name(),
                            from.other()
                        ),
                    )
                    .await;
            }
            Err(err) => {
                let message = err.server_message().map_or_else(
                    || format!("Failed to move {}", item.kind.display_name()),
                    str::to_string,
                );
                self.store.push_toast(ToastKind::Error, message).await;
            }
        }

        self.store.end_mutation(item).await;
        result
    }

    /// Remove an item from one collection. Only that collection's cache is
    /// invalidated.
    pub async fn remove(&self, item: &ItemRef, from: CartKind) -> Result<()> {
        if !self.store.begin_mutation(item).await {
            return Err(ClientError::MutationInFlight(item.clone()));
        }

        let result = self.client.remove_entry(&self.mutation(item, from)).await;

        match &result {
            Ok(()) => {
                self.store.invalidate(from.as_str()).await;
                self.store
                    .push_toast(
                        ToastKind::Success,
                        format!("{} removed from {}", item.kind.display_name(), from),
                    )
                    .await;
            }
            Err(err) => {
                let message = err.server_message().map_or_else(
                    || format!("Failed to remove {}", item.kind.display_name()),
                    str::to_string,
                );
                self.store.push_toast(ToastKind::Error, message).await;
            }
        }

        self.store.end_mutation(item).await;
        result
    }

    /// Delete an owned catalog item.
    ///
    /// On success the item's collection cache is invalidated, and if the
    /// viewer is looking at their uploaded-items view for that type they are
    /// navigated to the dashboard, since the deleted item no longer exists
    /// there.
    pub async fn delete_item(&self, item: &ItemRef) -> Result<()> {
        if !self.store.begin_mutation(item).await {
            return Err(ClientError::MutationInFlight(item.clone()));
        }

        let result = self.client.delete_item(item).await;

        match &result {
            Ok(()) => {
                self.store.invalidate(item.kind.collection()).await;
                self.store
                    .push_toast(
                        ToastKind::Success,
                        format!("{} deleted", item.kind.display_name()),
                    )
                    .await;
                if self.store.route().await == Route::Uploaded(item.kind) {
                    self.store.navigate(Route::Dashboard(item.kind)).await;
                }
            }
            Err(err) => {
                let message = err.server_message().map_or_else(
                    || format!("Failed to delete {}", item.kind.display_name()),
                    str::to_string,
                );
                self.store.push_toast(ToastKind::Error, message).await;
            }
        }

        self.store.end_mutation(item).await;
        result
    }

    /// Navigate to the edit screen for an item. Pure navigation, no server
    /// call.
    pub async fn edit(&self, item: &ItemRef) {
        self.store
            .navigate(Route::Edit {
                kind: item.kind,
                id: item.id.clone(),
            })
            .await;
    }

    /// Refetch one collection from the server and replace the local copy.
    pub async fn refresh(&self, kind: CartKind) -> Result<()> {
        let entries = self.client.fetch_entries(&self.owner_id, kind).await?;
        self.store.replace(kind, entries).await;
        Ok(())
    }

    /// Re-sync a collection after a failed optimistic mutation. If the
    /// refetch itself fails, fall back to removing the optimistic entry so
    /// the local state never shows an item the server rejected.
    async fn revert(&self, kind: CartKind, item: &ItemRef) {
        if let Err(err) = self.refresh(kind).await {
            warn!(kind = %kind, error = %err, "Revert refetch failed, dropping local entry");
            self.store.remove_local(kind, item).await;
        }
    }

    fn mutation(&self, item: &ItemRef, cart_type: CartKind) -> CartMutationRequest {
        CartMutationRequest {
            owner_id: self.owner_id.clone(),
            item: item.clone(),
            cart_type,
        }
    }
}

/// Build the placeholder entry shown while an add is in flight. The server
/// assigns real ids; the refetch after invalidation replaces this.
fn local_entry(item: &ItemRef, title: &str, price_cents: i64) -> CartEntry {
    let now = Utc::now();
    CartEntry {
        id: EntryId::generate(),
        cart_id: CartId::new("local"),
        item: item.clone(),
        quantity: 1,
        title: title.to_string(),
        price_cents,
        created_at: now,
        updated_at: now,
    }
}
