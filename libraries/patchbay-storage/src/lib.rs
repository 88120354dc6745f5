//! Patchbay Storage
//!
//! `SQLite` persistence layer for the Patchbay preset marketplace.
//!
//! Each feature owns its own queries ("vertical slicing"):
//! - [`catalog`]: presets, packs, designers, genres, VSTs, and the dynamic
//!   catalog filter query
//! - [`carts`]: cart and wishlist entries, including the atomic move between
//!   the two collections
//!
//! # Example
//!
//! ```rust,no_run
//! use patchbay_storage::{create_pool, run_migrations, CatalogFilter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://patchbay.db").await?;
//! run_migrations(&pool).await?;
//!
//! // Unfiltered catalog, newest first
//! let items = patchbay_storage::catalog::search(&pool, &CatalogFilter::default(), 50, 0).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod filter;

// Vertical slices
pub mod carts;
pub mod catalog;

pub use error::{Result, StorageError};
pub use filter::CatalogFilter;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into the binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Called once at application startup to bring the schema up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://patchbay.db`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    Ok(pool)
}
