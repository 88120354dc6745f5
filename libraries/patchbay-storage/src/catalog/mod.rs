//! Catalog slice: presets, packs, designers, genres, and VSTs.
//!
//! [`search`] runs the dynamic filter query; the rest are the straight
//! lookups, creates (upload flows, seeding, tests), and owner deletes.

use crate::error::{Result, StorageError};
use crate::filter::CatalogFilter;
use chrono::{DateTime, Utc};
use patchbay_core::types::*;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

const PRESET_SELECT: &str = "SELECT p.id, p.title, p.description, p.price_cents, p.preset_type, \
     p.preview_url, p.created_at, \
     d.id AS designer_id, d.username AS designer_username, \
     d.profile_image_url AS designer_image, \
     g.id AS genre_id, g.name AS genre_name, \
     v.id AS vst_id, v.name AS vst_name \
 FROM presets p \
 LEFT JOIN designers d ON p.designer_id = d.id \
 LEFT JOIN genres g ON p.genre_id = g.id \
 LEFT JOIN vsts v ON p.vst_id = v.id";

/// Run the catalog search: conjunctive filter, newest first.
///
/// An unfiltered [`CatalogFilter`] yields the full catalog; see the filter
/// module for how each dimension contributes its clause.
pub async fn search(
    pool: &SqlitePool,
    filter: &CatalogFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<CatalogPreset>> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(PRESET_SELECT);
    filter.apply(&mut qb);
    qb.push(" ORDER BY p.created_at DESC LIMIT ");
    qb.push_bind(limit);
    qb.push(" OFFSET ");
    qb.push_bind(offset);

    let rows = qb.build().fetch_all(pool).await?;
    rows.iter().map(map_preset_row).collect()
}

/// Fetch a single preset with its designer/genre/VST summaries
pub async fn get_preset(pool: &SqlitePool, id: &PresetId) -> Result<Option<CatalogPreset>> {
    let sql = format!("{PRESET_SELECT} WHERE p.id = ?");
    let row = sqlx::query(&sql)
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(map_preset_row).transpose()
}

/// Fetch a pack with its ordered child preset rows
pub async fn get_pack(pool: &SqlitePool, id: &PackId) -> Result<Option<Pack>> {
    let row = sqlx::query(
        "SELECT k.id, k.title, k.description, k.price_cents, k.created_at, \
                d.id AS designer_id, d.username AS designer_username, \
                d.profile_image_url AS designer_image, \
                g.id AS genre_id, g.name AS genre_name \
         FROM packs k \
         LEFT JOIN designers d ON k.designer_id = d.id \
         LEFT JOIN genres g ON k.genre_id = g.id \
         WHERE k.id = ?",
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let presets = pack_children(pool, id).await?;
    Ok(Some(map_pack_row(&row, presets)?))
}

/// List packs, newest first, each with its child rows attached
pub async fn list_packs(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<Pack>> {
    let rows = sqlx::query(
        "SELECT k.id, k.title, k.description, k.price_cents, k.created_at, \
                d.id AS designer_id, d.username AS designer_username, \
                d.profile_image_url AS designer_image, \
                g.id AS genre_id, g.name AS genre_name \
         FROM packs k \
         LEFT JOIN designers d ON k.designer_id = d.id \
         LEFT JOIN genres g ON k.genre_id = g.id \
         ORDER BY k.created_at DESC LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let mut packs = Vec::with_capacity(rows.len());
    for row in &rows {
        let id = PackId::new(row.get::<String, _>("id"));
        let presets = pack_children(pool, &id).await?;
        packs.push(map_pack_row(row, presets)?);
    }
    Ok(packs)
}

/// Standalone presets uploaded by a designer (pack children excluded)
pub async fn designer_presets(pool: &SqlitePool, id: &DesignerId) -> Result<Vec<CatalogPreset>> {
    let sql = format!("{PRESET_SELECT} WHERE p.designer_id = ? AND p.pack_id IS NULL ORDER BY p.created_at DESC");
    let rows = sqlx::query(&sql).bind(id.as_str()).fetch_all(pool).await?;
    rows.iter().map(map_preset_row).collect()
}

/// Packs uploaded by a designer
pub async fn designer_packs(pool: &SqlitePool, id: &DesignerId) -> Result<Vec<Pack>> {
    let rows = sqlx::query(
        "SELECT k.id, k.title, k.description, k.price_cents, k.created_at, \
                d.id AS designer_id, d.username AS designer_username, \
                d.profile_image_url AS designer_image, \
                g.id AS genre_id, g.name AS genre_name \
         FROM packs k \
         LEFT JOIN designers d ON k.designer_id = d.id \
         LEFT JOIN genres g ON k.genre_id = g.id \
         WHERE k.designer_id = ? \
         ORDER BY k.created_at DESC",
    )
    .bind(id.as_str())
    .fetch_all(pool)
    .await?;

    let mut packs = Vec::with_capacity(rows.len());
    for row in &rows {
        let pack_id = PackId::new(row.get::<String, _>("id"));
        let presets = pack_children(pool, &pack_id).await?;
        packs.push(map_pack_row(row, presets)?);
    }
    Ok(packs)
}

/// Delete a preset. Cart entries referencing it cascade.
pub async fn delete_preset(pool: &SqlitePool, id: &PresetId) -> Result<()> {
    let result = sqlx::query("DELETE FROM presets WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Preset", id.as_str()));
    }
    Ok(())
}

/// Delete a pack. Child presets and cart entries cascade.
pub async fn delete_pack(pool: &SqlitePool, id: &PackId) -> Result<()> {
    let result = sqlx::query("DELETE FROM packs WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Pack", id.as_str()));
    }
    Ok(())
}

/// Create a designer
pub async fn create_designer(pool: &SqlitePool, input: CreateDesigner) -> Result<Designer> {
    let id = DesignerId::generate();

    sqlx::query(
        "INSERT INTO designers (id, username, profile_image_url, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(id.as_str())
    .bind(&input.username)
    .bind(&input.profile_image_url)
    .bind(Utc::now().timestamp())
    .execute(pool)
    .await?;

    Ok(Designer {
        id,
        username: input.username,
        profile_image_url: input.profile_image_url,
    })
}

/// Create a genre tag
pub async fn create_genre(pool: &SqlitePool, name: &str) -> Result<Genre> {
    let result = sqlx::query("INSERT INTO genres (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;

    Ok(Genre {
        id: result.last_insert_rowid(),
        name: name.to_string(),
    })
}

/// Create a VST entry
pub async fn create_vst(pool: &SqlitePool, name: &str) -> Result<Vst> {
    let result = sqlx::query("INSERT INTO vsts (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;

    Ok(Vst {
        id: result.last_insert_rowid(),
        name: name.to_string(),
    })
}

/// Create a preset and return it enriched
pub async fn create_preset(pool: &SqlitePool, input: CreatePreset) -> Result<CatalogPreset> {
    let id = PresetId::generate();
    let now = Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO presets (id, title, description, price_cents, preset_type, preview_url, \
                              designer_id, genre_id, vst_id, pack_id, pack_position, \
                              created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id.as_str())
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.price_cents)
    .bind(&input.preset_type)
    .bind(&input.preview_url)
    .bind(input.designer_id.as_ref().map(DesignerId::as_str))
    .bind(input.genre_id)
    .bind(input.vst_id)
    .bind(input.pack_id.as_ref().map(PackId::as_str))
    .bind(input.pack_position)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_preset(pool, &id)
        .await?
        .ok_or_else(|| StorageError::invalid_data("Failed to retrieve created preset"))
}

/// Create a pack (children are added as presets with `pack_id` set)
pub async fn create_pack(pool: &SqlitePool, input: CreatePack) -> Result<Pack> {
    let id = PackId::generate();
    let now = Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO packs (id, title, description, price_cents, designer_id, genre_id, \
                            created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id.as_str())
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.price_cents)
    .bind(input.designer_id.as_ref().map(DesignerId::as_str))
    .bind(input.genre_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_pack(pool, &id)
        .await?
        .ok_or_else(|| StorageError::invalid_data("Failed to retrieve created pack"))
}

async fn pack_children(pool: &SqlitePool, pack_id: &PackId) -> Result<Vec<PackPreset>> {
    let rows = sqlx::query(
        "SELECT id, title, preview_url, pack_position \
         FROM presets WHERE pack_id = ? \
         ORDER BY pack_position",
    )
    .bind(pack_id.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| PackPreset {
            id: PresetId::new(row.get::<String, _>("id")),
            title: row.get("title"),
            preview_url: row.get("preview_url"),
            position: row.get::<Option<i64>, _>("pack_position").unwrap_or(0),
        })
        .collect())
}

fn map_preset_row(row: &SqliteRow) -> Result<CatalogPreset> {
    Ok(CatalogPreset {
        id: PresetId::new(row.get::<String, _>("id")),
        title: row.get("title"),
        description: row.get("description"),
        price_cents: row.get("price_cents"),
        preset_type: row.get("preset_type"),
        preview_url: row.get("preview_url"),
        designer: map_designer(row)?,
        genre: map_genre(row),
        vst: row
            .get::<Option<i64>, _>("vst_id")
            .map(|vst_id| Vst {
                id: vst_id,
                name: row.get("vst_name"),
            }),
        created_at: timestamp(row.get("created_at"))?,
    })
}

fn map_pack_row(row: &SqliteRow, presets: Vec<PackPreset>) -> Result<Pack> {
    Ok(Pack {
        id: PackId::new(row.get::<String, _>("id")),
        title: row.get("title"),
        description: row.get("description"),
        price_cents: row.get("price_cents"),
        designer: map_designer(row)?,
        genre: map_genre(row),
        presets,
        created_at: timestamp(row.get("created_at"))?,
    })
}

fn map_designer(row: &SqliteRow) -> Result<Option<Designer>> {
    Ok(row
        .get::<Option<String>, _>("designer_id")
        .map(|id| Designer {
            id: DesignerId::new(id),
            username: row.get("designer_username"),
            profile_image_url: row.get("designer_image"),
        }))
}

fn map_genre(row: &SqliteRow) -> Option<Genre> {
    row.get::<Option<i64>, _>("genre_id").map(|id| Genre {
        id,
        name: row.get("genre_name"),
    })
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| StorageError::invalid_data(format!("Invalid timestamp: {secs}")))
}
