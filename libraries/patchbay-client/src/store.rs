//! Client-side session state.
//!
//! [`SessionStore`] is the single explicit container for everything the
//! storefront UI reads: the two entry collections, per-item loading flags,
//! cache invalidation counters, queued toasts, and the current route. Action
//! handlers mutate it; views read it. All state flows through here rather
//! than module-level globals.

use crate::types::{Route, Toast, ToastKind};
use patchbay_core::{CartEntry, CartKind, ItemRef};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Inner {
    cart: Vec<CartEntry>,
    wishlist: Vec<CartEntry>,
    /// Items with a mutation currently in flight
    loading: HashSet<ItemRef>,
    /// Collections whose cached data is out of date
    stale: HashSet<String>,
    /// Invalidation counts per collection name, for change detection
    invalidations: HashMap<String, usize>,
    toasts: Vec<Toast>,
    route: Route,
}

/// Shared, cloneable session state.
///
/// Cloning is cheap; all clones observe the same state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Inner>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                route: Route::Storefront,
                ..Inner::default()
            })),
        }
    }

    // -------------------------------------------------------------------------
    // Entry collections
    // -------------------------------------------------------------------------

    /// Snapshot of one collection's entries.
    pub async fn collection(&self, kind: CartKind) -> Vec<CartEntry> {
        let inner = self.inner.read().await;
        match kind {
            CartKind::Cart => inner.cart.clone(),
            CartKind::Wishlist => inner.wishlist.clone(),
        }
    }

    /// Whether a collection currently holds an entry for the item.
    pub async fn contains(&self, kind: CartKind, item: &ItemRef) -> bool {
        let inner = self.inner.read().await;
        entries_of(&inner, kind).iter().any(|e| &e.item == item)
    }

    /// Insert a locally-built entry ahead of server confirmation.
    ///
    /// Skipped if the collection already holds the item, matching the
    /// server's idempotent add.
    pub async fn insert_optimistic(&self, kind: CartKind, entry: CartEntry) {
        let mut inner = self.inner.write().await;
        let entries = entries_of_mut(&mut inner, kind);
        if entries.iter().any(|e| e.item == entry.item) {
            return;
        }
        debug!(item = %entry.item, kind = %kind, "Optimistically inserting entry");
        entries.insert(0, entry);
    }

    /// Remove the entry for an item from one collection, if present.
    pub async fn remove_local(&self, kind: CartKind, item: &ItemRef) {
        let mut inner = self.inner.write().await;
        entries_of_mut(&mut inner, kind).retain(|e| &e.item != item);
    }

    /// Replace a collection with authoritative server data and clear its
    /// stale flag.
    pub async fn replace(&self, kind: CartKind, entries: Vec<CartEntry>) {
        let mut inner = self.inner.write().await;
        *entries_of_mut(&mut inner, kind) = entries;
        inner.stale.remove(kind.as_str());
    }

    // -------------------------------------------------------------------------
    // Cache invalidation
    // -------------------------------------------------------------------------

    /// Mark a named collection's cached data as out of date.
    ///
    /// Consumers watching [`invalidation_count`](Self::invalidation_count)
    /// refetch on the next read.
    pub async fn invalidate(&self, collection: &str) {
        let mut inner = self.inner.write().await;
        debug!(collection, "Invalidating cached collection");
        inner.stale.insert(collection.to_string());
        *inner.invalidations.entry(collection.to_string()).or_insert(0) += 1;
    }

    /// How many times a collection has been invalidated this session.
    pub async fn invalidation_count(&self, collection: &str) -> usize {
        let inner = self.inner.read().await;
        inner.invalidations.get(collection).copied().unwrap_or(0)
    }

    /// Whether a collection is flagged for refetch.
    pub async fn is_stale(&self, collection: &str) -> bool {
        let inner = self.inner.read().await;
        inner.stale.contains(collection)
    }

    // -------------------------------------------------------------------------
    // Per-item loading flags
    // -------------------------------------------------------------------------

    /// Flag an item as having a mutation in flight.
    ///
    /// Returns false if the item is already flagged, in which case the caller
    /// must not dispatch another mutation.
    pub async fn begin_mutation(&self, item: &ItemRef) -> bool {
        let mut inner = self.inner.write().await;
        inner.loading.insert(item.clone())
    }

    /// Clear an item's in-flight flag once its mutation settles.
    pub async fn end_mutation(&self, item: &ItemRef) {
        let mut inner = self.inner.write().await;
        inner.loading.remove(item);
    }

    /// Whether an item has a mutation in flight (drives per-button spinners).
    pub async fn is_loading(&self, item: &ItemRef) -> bool {
        let inner = self.inner.read().await;
        inner.loading.contains(item)
    }

    // -------------------------------------------------------------------------
    // Toasts
    // -------------------------------------------------------------------------

    /// Queue a user-facing notification.
    pub async fn push_toast(&self, kind: ToastKind, message: impl Into<String>) {
        let mut inner = self.inner.write().await;
        inner.toasts.push(Toast {
            kind,
            message: message.into(),
        });
    }

    /// Take all queued toasts, leaving the queue empty.
    pub async fn drain_toasts(&self) -> Vec<Toast> {
        let mut inner = self.inner.write().await;
        std::mem::take(&mut inner.toasts)
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// The current route.
    pub async fn route(&self) -> Route {
        let inner = self.inner.read().await;
        inner.route.clone()
    }

    /// Navigate to a new route.
    pub async fn navigate(&self, route: Route) {
        let mut inner = self.inner.write().await;
        debug!(?route, "Navigating");
        inner.route = route;
    }
}

fn entries_of(inner: &Inner, kind: CartKind) -> &Vec<CartEntry> {
    match kind {
        CartKind::Cart => &inner.cart,
        CartKind::Wishlist => &inner.wishlist,
    }
}

fn entries_of_mut(inner: &mut Inner, kind: CartKind) -> &mut Vec<CartEntry> {
    match kind {
        CartKind::Cart => &mut inner.cart,
        CartKind::Wishlist => &mut inner.wishlist,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use patchbay_core::{CartId, EntryId};

    fn entry(item: ItemRef) -> CartEntry {
        let now = Utc::now();
        CartEntry {
            id: EntryId::generate(),
            cart_id: CartId::new("local"),
            item,
            quantity: 1,
            title: "Test".to_string(),
            price_cents: 100,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn optimistic_insert_is_idempotent() {
        let store = SessionStore::new();
        let item = ItemRef::preset("p1");
        store
            .insert_optimistic(CartKind::Cart, entry(item.clone()))
            .await;
        store
            .insert_optimistic(CartKind::Cart, entry(item.clone()))
            .await;
        assert_eq!(store.collection(CartKind::Cart).await.len(), 1);
        assert!(store.contains(CartKind::Cart, &item).await);
        assert!(!store.contains(CartKind::Wishlist, &item).await);
    }

    #[tokio::test]
    async fn replace_clears_stale_flag() {
        let store = SessionStore::new();
        store.invalidate("cart").await;
        assert!(store.is_stale("cart").await);
        assert_eq!(store.invalidation_count("cart").await, 1);

        store.replace(CartKind::Cart, vec![]).await;
        assert!(!store.is_stale("cart").await);
        // The counter keeps history even after the refetch
        assert_eq!(store.invalidation_count("cart").await, 1);
    }

    #[tokio::test]
    async fn begin_mutation_rejects_concurrent_flag() {
        let store = SessionStore::new();
        let item = ItemRef::pack("pk1");
        assert!(store.begin_mutation(&item).await);
        assert!(!store.begin_mutation(&item).await);
        assert!(store.is_loading(&item).await);

        store.end_mutation(&item).await;
        assert!(!store.is_loading(&item).await);
        assert!(store.begin_mutation(&item).await);
    }

    #[tokio::test]
    async fn drain_toasts_empties_queue() {
        let store = SessionStore::new();
        store.push_toast(ToastKind::Success, "done").await;
        store.push_toast(ToastKind::Error, "oops").await;

        let toasts = store.drain_toasts().await;
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert!(store.drain_toasts().await.is_empty());
    }

    #[tokio::test]
    async fn navigation_round_trip() {
        let store = SessionStore::new();
        assert_eq!(store.route().await, Route::Storefront);
        store
            .navigate(Route::Uploaded(patchbay_core::ItemType::Pack))
            .await;
        assert_eq!(
            store.route().await,
            Route::Uploaded(patchbay_core::ItemType::Pack)
        );
    }
}
