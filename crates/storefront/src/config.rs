//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `STOREFRONT_DATABASE_URL` - `SQLite` connection string
//!   (default: `sqlite://tiendita.db?mode=rwc`, falls back to `DATABASE_URL`)
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `CATALOG_URL` - Product catalog endpoint (default: <https://fakestoreapi.com/products>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default on-disk database, created on first open.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://tiendita.db?mode=rwc";

/// Default product catalog endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

/// A variable was set to something unusable.
#[derive(Debug, Error)]
#[error("Invalid environment variable {name}: {reason}")]
pub struct ConfigError {
    pub name: &'static str,
    pub reason: String,
}

impl ConfigError {
    fn new(name: &'static str, reason: impl ToString) -> Self {
        Self {
            name,
            reason: reason.to_string(),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `SQLite` connection URL
    pub database_url: SecretString,
    /// Bind address
    pub host: IpAddr,
    pub port: u16,
    /// Where shoppers reach the storefront; `https` turns on secure cookies
    pub base_url: String,
    pub catalog: CatalogConfig,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

/// Remote catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Endpoint returning a JSON array of products
    pub url: Url,
}

impl CatalogConfig {
    /// Parse a catalog endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `url` is not an absolute `http` or `https` URL.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(url).map_err(|e| ConfigError::new("CATALOG_URL", e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::new(
                "CATALOG_URL",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        Ok(Self { url })
    }
}

impl StorefrontConfig {
    /// Read the configuration from the environment, after loading `.env`
    /// if there is one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first variable that is set but
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is normal
        let _ = dotenvy::dotenv();

        let database_url = env_var("STOREFRONT_DATABASE_URL")
            .or_else(|| env_var("DATABASE_URL"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        Ok(Self {
            database_url: SecretString::from(database_url),
            host: parse_env("STOREFRONT_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: parse_env("STOREFRONT_PORT", 3000)?,
            base_url: env_var("STOREFRONT_BASE_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            catalog: CatalogConfig::parse(
                env_var("CATALOG_URL").as_deref().unwrap_or(DEFAULT_CATALOG_URL),
            )?,
            sentry_dsn: env_var("SENTRY_DSN"),
            sentry_environment: env_var("SENTRY_ENVIRONMENT"),
        })
    }

    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// A set, non-empty variable.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Parse `name` if set, else use `default`.
fn parse_env<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    env_var(name).map_or(Ok(default), |raw| {
        raw.parse().map_err(|e| ConfigError::new(name, e))
    })
}
