//! Carts slice: the cart and wishlist collections and their entries.
//!
//! Each owner has at most one cart row per [`CartKind`]; rows are created
//! lazily by [`ensure`]. An entry references exactly one preset or pack and
//! appears at most once per collection (quantity is fixed at 1 for digital
//! items). Moving an entry between the two collections is a single UPDATE
//! inside a transaction, so the item is never absent from both.

use crate::error::{Result, StorageError};
use chrono::{DateTime, Utc};
use patchbay_core::types::*;
use sqlx::{Row, SqlitePool};

/// Get the cart id for `(owner, kind)`, creating the cart row if needed
pub async fn ensure(pool: &SqlitePool, owner_id: &str, kind: CartKind) -> Result<CartId> {
    sqlx::query("INSERT OR IGNORE INTO carts (id, owner_id, kind, created_at) VALUES (?, ?, ?, ?)")
        .bind(CartId::generate().as_str())
        .bind(owner_id)
        .bind(kind.as_str())
        .bind(Utc::now().timestamp())
        .execute(pool)
        .await?;

    let id: String = sqlx::query_scalar("SELECT id FROM carts WHERE owner_id = ? AND kind = ?")
        .bind(owner_id)
        .bind(kind.as_str())
        .fetch_one(pool)
        .await?;

    Ok(CartId::new(id))
}

/// Entries in one collection, newest first, with item title and price attached
pub async fn entries(pool: &SqlitePool, owner_id: &str, kind: CartKind) -> Result<Vec<CartEntry>> {
    let cart_id = ensure(pool, owner_id, kind).await?;

    let rows = sqlx::query(
        "SELECT e.id, e.cart_id, e.preset_id, e.pack_id, e.quantity, e.created_at, e.updated_at, \
                COALESCE(pr.title, pk.title) AS title, \
                COALESCE(pr.price_cents, pk.price_cents) AS price_cents \
         FROM cart_entries e \
         LEFT JOIN presets pr ON e.preset_id = pr.id \
         LEFT JOIN packs pk ON e.pack_id = pk.id \
         WHERE e.cart_id = ? \
         ORDER BY e.created_at DESC",
    )
    .bind(cart_id.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let item = match row.get::<Option<String>, _>("preset_id") {
                Some(id) => ItemRef::preset(id),
                None => ItemRef::pack(row.get::<String, _>("pack_id")),
            };
            Ok(CartEntry {
                id: EntryId::new(row.get::<String, _>("id")),
                cart_id: CartId::new(row.get::<String, _>("cart_id")),
                item,
                quantity: row.get("quantity"),
                title: row.get("title"),
                price_cents: row.get("price_cents"),
                created_at: timestamp(row.get("created_at"))?,
                updated_at: timestamp(row.get("updated_at"))?,
            })
        })
        .collect()
}

/// Add an item to a collection. Adding an item already present is a no-op
/// success; quantity stays at 1.
pub async fn add(pool: &SqlitePool, owner_id: &str, kind: CartKind, item: &ItemRef) -> Result<()> {
    ensure_item_exists(pool, item).await?;
    let cart_id = ensure(pool, owner_id, kind).await?;
    let now = Utc::now().timestamp();

    let sql = match item.kind {
        ItemType::Preset => {
            "INSERT INTO cart_entries (id, cart_id, preset_id, quantity, created_at, updated_at) \
             VALUES (?, ?, ?, 1, ?, ?) \
             ON CONFLICT (cart_id, preset_id) DO NOTHING"
        }
        ItemType::Pack => {
            "INSERT INTO cart_entries (id, cart_id, pack_id, quantity, created_at, updated_at) \
             VALUES (?, ?, ?, 1, ?, ?) \
             ON CONFLICT (cart_id, pack_id) DO NOTHING"
        }
    };

    sqlx::query(sql)
        .bind(EntryId::generate().as_str())
        .bind(cart_id.as_str())
        .bind(&item.id)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

    Ok(())
}

/// Move an item between the two collections in one logical operation.
///
/// The source entry row is re-pointed at the destination cart inside a
/// transaction; there is no window where the item is absent from both. An
/// existing duplicate in the destination is dropped first so the per-cart
/// uniqueness constraint cannot fail the move.
pub async fn move_item(
    pool: &SqlitePool,
    owner_id: &str,
    item: &ItemRef,
    from: CartKind,
) -> Result<()> {
    let src = ensure(pool, owner_id, from).await?;
    let dest = ensure(pool, owner_id, from.other()).await?;
    let column = item_column(item.kind);

    let mut tx = pool.begin().await?;

    sqlx::query(&format!(
        "DELETE FROM cart_entries WHERE cart_id = ? AND {column} = ?"
    ))
    .bind(dest.as_str())
    .bind(&item.id)
    .execute(&mut *tx)
    .await?;

    let result = sqlx::query(&format!(
        "UPDATE cart_entries SET cart_id = ?, updated_at = ? WHERE cart_id = ? AND {column} = ?"
    ))
    .bind(dest.as_str())
    .bind(Utc::now().timestamp())
    .bind(src.as_str())
    .bind(&item.id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Cart entry", item.to_string()));
    }

    tx.commit().await?;
    Ok(())
}

/// Remove an item from a collection
pub async fn remove(
    pool: &SqlitePool,
    owner_id: &str,
    kind: CartKind,
    item: &ItemRef,
) -> Result<()> {
    let cart_id = ensure(pool, owner_id, kind).await?;
    let column = item_column(item.kind);

    let result = sqlx::query(&format!(
        "DELETE FROM cart_entries WHERE cart_id = ? AND {column} = ?"
    ))
    .bind(cart_id.as_str())
    .bind(&item.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Cart entry", item.to_string()));
    }
    Ok(())
}

fn item_column(kind: ItemType) -> &'static str {
    match kind {
        ItemType::Preset => "preset_id",
        ItemType::Pack => "pack_id",
    }
}

async fn ensure_item_exists(pool: &SqlitePool, item: &ItemRef) -> Result<()> {
    let sql = match item.kind {
        ItemType::Preset => "SELECT 1 FROM presets WHERE id = ?",
        ItemType::Pack => "SELECT 1 FROM packs WHERE id = ?",
    };

    let found: Option<i64> = sqlx::query_scalar(sql)
        .bind(&item.id)
        .fetch_optional(pool)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(StorageError::not_found(
            item.kind.display_name(),
            item.id.as_str(),
        )),
    }
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| StorageError::invalid_data(format!("Invalid timestamp: {secs}")))
}
