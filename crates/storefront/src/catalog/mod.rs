//! Remote product catalog client.
//!
//! # Architecture
//!
//! - One read-only `GET` to a fixed endpoint returning a JSON array of products
//! - No authentication, no query parameters, no pagination
//! - No caching and no retry: every load hits the endpoint once, and a failed
//!   load is final for that attempt
//!
//! # Example
//!
//! ```rust,ignore
//! use tiendita_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//!
//! // Loader contract: failures are logged and yield an empty catalog
//! let products = client.load_products().await;
//! ```

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;
use url::Url;

use tiendita_core::Product;

use crate::config::CatalogConfig;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Catalog returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body was not a JSON product list.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the remote catalog API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                endpoint: config.url.clone(),
            }),
        }
    }

    /// The endpoint this client reads from.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Fetch and decode the product list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` on transport failure, `CatalogError::Status`
    /// on a non-success response and `CatalogError::Parse` if the body is not
    /// a JSON array of products.
    #[instrument(skip(self), fields(endpoint = %self.inner.endpoint))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(CatalogError::Status {
                status,
                body: response_text.chars().take(200).collect(),
            });
        }

        match serde_json::from_str::<Vec<Product>>(&response_text) {
            Ok(products) => {
                tracing::debug!(count = products.len(), "Catalog loaded");
                Ok(products)
            }
            Err(e) => {
                tracing::debug!(
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Catalog body is not a product list"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }

    /// Load the catalog for display.
    ///
    /// Any failure is logged and produces an empty list; callers never see
    /// an error.
    pub async fn load_products(&self) -> Vec<Product> {
        match self.fetch_products().await {
            Ok(products) => products,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching products");
                Vec::new()
            }
        }
    }
}
