//! Database operations for the storefront `SQLite` database.
//!
//! # Database: `tiendita.db`
//!
//! ## Tables
//!
//! - `invoices` - Completed checkouts, indexed by name, email and phone
//! - `tower_sessions` - Session storage (carts), created by the session store
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/`. They are embedded
//! in the binary and applied by [`open`], so the schema is created on the
//! first open and upgraded when a new migration ships. They can also be run
//! on their own via:
//! ```bash
//! cargo run -p tiendita-cli -- migrate
//! ```

pub mod invoices;

use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use invoices::InvoiceRepository;

/// Embedded storefront migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., no free invoice number).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Whether a connection string points at a private in-memory database.
fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// An in-memory database lives only as long as its connection, so it gets a
/// single connection that is never recycled.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the database cannot be opened.
pub async fn create_pool(database_url: &SecretString) -> Result<SqlitePool, sqlx::Error> {
    let url = database_url.expose_secret();
    let options = SqliteConnectOptions::from_str(url)?;

    if is_in_memory(url) {
        return SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await;
    }

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(
            options
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal),
        )
        .await
}

/// Open the storefront database and bring its schema up to date.
///
/// This is the only way the rest of the crate obtains a pool; failure is
/// returned to the caller instead of leaving an unusable handle behind.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the database cannot be opened and
/// `RepositoryError::Migration` if the schema cannot be applied.
pub async fn open(database_url: &SecretString) -> Result<SqlitePool, RepositoryError> {
    let pool = create_pool(database_url).await?;
    MIGRATOR.run(&pool).await?;
    tracing::debug!("Storefront migrations applied");
    Ok(pool)
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_in_memory() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://shop.db?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://tiendita.db?mode=rwc"));
    }

    #[tokio::test]
    async fn test_open_creates_indexed_schema() {
        let pool = test_support::memory_pool().await;

        let indexes: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'invoices' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        assert_eq!(
            indexes,
            vec!["invoices_email_idx", "invoices_name_idx", "invoices_phone_idx"]
        );
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = test_support::memory_pool().await;
        MIGRATOR.run(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_open_rejects_bad_url() {
        let result = open(&SecretString::from("sqlite:///no/such/dir/shop.db")).await;
        assert!(matches!(result, Err(RepositoryError::Database(_))));
    }
}
