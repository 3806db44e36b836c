//! CLI subcommands.

pub mod catalog;
pub mod invoices;
pub mod migrate;

use thiserror::Error;

use tiendita_storefront::config::{ConfigError, StorefrontConfig};
use tiendita_storefront::db::RepositoryError;

/// Errors shared by the commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Load the same configuration the storefront server uses.
fn load_config() -> Result<StorefrontConfig, CommandError> {
    Ok(StorefrontConfig::from_env()?)
}
