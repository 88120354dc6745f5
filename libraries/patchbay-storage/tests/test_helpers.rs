//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using real SQLite files (not
//! in-memory) to match production behavior and properly test migrations
//! and constraints.

#![allow(dead_code)]

use patchbay_core::types::*;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = patchbay_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        patchbay_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: create a designer
pub async fn create_test_designer(pool: &SqlitePool, username: &str) -> Designer {
    patchbay_storage::catalog::create_designer(
        pool,
        CreateDesigner {
            username: username.to_string(),
            profile_image_url: None,
        },
    )
    .await
    .expect("Failed to create test designer")
}

/// Test fixture: create a preset with the given title and defaults elsewhere
pub async fn create_test_preset(pool: &SqlitePool, title: &str) -> CatalogPreset {
    create_preset_with(pool, title, |_| {}).await
}

/// Test fixture: create a preset, letting the caller adjust the input
pub async fn create_preset_with(
    pool: &SqlitePool,
    title: &str,
    adjust: impl FnOnce(&mut CreatePreset),
) -> CatalogPreset {
    let mut input = CreatePreset {
        title: title.to_string(),
        description: None,
        price_cents: 499,
        preset_type: "lead".to_string(),
        preview_url: Some(format!("https://cdn.test/previews/{title}.mp3")),
        designer_id: None,
        genre_id: None,
        vst_id: None,
        pack_id: None,
        pack_position: None,
    };
    adjust(&mut input);

    patchbay_storage::catalog::create_preset(pool, input)
        .await
        .expect("Failed to create test preset")
}

/// Test fixture: create a pack with `children` child presets
pub async fn create_test_pack(pool: &SqlitePool, title: &str, children: usize) -> Pack {
    let pack = patchbay_storage::catalog::create_pack(
        pool,
        CreatePack {
            title: title.to_string(),
            description: None,
            price_cents: 1999,
            designer_id: None,
            genre_id: None,
        },
    )
    .await
    .expect("Failed to create test pack");

    for i in 0..children {
        create_preset_with(pool, &format!("{title} child {i}"), |input| {
            input.pack_id = Some(pack.id.clone());
            input.pack_position = Some(i as i64);
        })
        .await;
    }

    patchbay_storage::catalog::get_pack(pool, &pack.id)
        .await
        .expect("Failed to reload test pack")
        .expect("Test pack missing after creation")
}

/// Backdate a preset so ordering tests see distinct creation times
pub async fn set_preset_created_at(pool: &SqlitePool, id: &PresetId, secs: i64) {
    sqlx::query("UPDATE presets SET created_at = ? WHERE id = ?")
        .bind(secs)
        .bind(id.as_str())
        .execute(pool)
        .await
        .expect("Failed to backdate preset");
}
