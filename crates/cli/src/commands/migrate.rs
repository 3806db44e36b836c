//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! td-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `SQLite` connection string
//!   (default: `sqlite://tiendita.db?mode=rwc`)
//!
//! The storefront also migrates on startup; this command is for preparing a
//! database ahead of a deploy.

use tiendita_storefront::db;

use super::{CommandError, load_config};

/// Open the storefront database, applying any pending migrations.
pub async fn run() -> Result<(), CommandError> {
    let config = load_config()?;

    tracing::info!("Running storefront migrations...");
    let pool = db::open(&config.database_url).await?;
    pool.close().await;

    tracing::info!("Storefront migrations complete!");
    Ok(())
}
