//! Integration tests for Tiendita.
//!
//! Each test starts the real storefront router on an ephemeral port, backed
//! by a throwaway `SQLite` file and a stub product catalog, and drives it
//! over HTTP with a cookie-keeping client (one client is one shopper).
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tiendita-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;

use axum::{Json, Router, routing::get};
use reqwest::{Client, Response};
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tokio::net::TcpListener;

use tiendita_storefront::config::{CatalogConfig, StorefrontConfig};
use tiendita_storefront::state::AppState;
use tiendita_storefront::{build_router, db, middleware};

/// Two products in the shape the public catalog API returns.
#[must_use]
pub fn sample_products() -> Value {
    json!([
        {
            "id": 1,
            "title": "Shirt",
            "price": 20,
            "description": "Cotton shirt",
            "category": "men's clothing",
            "image": "https://example.com/shirt.png",
            "rating": { "rate": 4.1, "count": 259 }
        },
        {
            "id": 2,
            "title": "Mug",
            "price": 7.5,
            "description": "Ceramic mug",
            "category": "home",
            "image": "https://example.com/mug.png",
            "rating": { "rate": 3.9, "count": 70 }
        }
    ])
}

/// Serve `router` on an ephemeral local port.
async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    addr
}

/// Start a stub catalog answering `GET /products` with `products`.
pub async fn spawn_catalog(products: Value) -> String {
    let router = Router::new().route("/products", get(move || async move { Json(products) }));
    let addr = serve(router).await;
    format!("http://{addr}/products")
}

/// A catalog URL nothing listens on.
pub async fn unreachable_catalog() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    drop(listener);
    format!("http://{addr}/products")
}

/// A running storefront with its own database.
pub struct TestApp {
    pub base_url: String,
    pub pool: SqlitePool,
    _data_dir: TempDir,
}

impl TestApp {
    /// Start a storefront whose catalog lives at `catalog_url`.
    pub async fn spawn(catalog_url: &str) -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let database_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.path().join("tiendita.db").display()
        );

        let config = StorefrontConfig {
            database_url: SecretString::from(database_url),
            host: "127.0.0.1".parse().expect("Valid address"),
            port: 0,
            base_url: "http://127.0.0.1".to_string(),
            catalog: CatalogConfig::parse(catalog_url).expect("Valid catalog URL"),
            sentry_dsn: None,
            sentry_environment: None,
        };

        let pool = db::open(&config.database_url)
            .await
            .expect("Failed to open test database");
        let session_layer = middleware::create_session_layer(&pool, &config)
            .await
            .expect("Failed to create session store");

        let router = build_router(AppState::new(config, pool.clone()), session_layer);
        let addr = serve(router).await;

        Self {
            base_url: format!("http://{addr}"),
            pool,
            _data_dir: data_dir,
        }
    }

    /// Start a storefront backed by [`sample_products`].
    pub async fn with_sample_catalog() -> Self {
        Self::spawn(&spawn_catalog(sample_products()).await).await
    }

    /// A new shopper: a client with its own cookie jar.
    #[must_use]
    pub fn shopper(&self) -> Shopper {
        Shopper {
            base_url: self.base_url.clone(),
            client: Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Number of stored invoices.
    pub async fn invoice_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count invoices")
    }
}

/// One browser session against a [`TestApp`].
pub struct Shopper {
    base_url: String,
    client: Client,
}

impl Shopper {
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("GET request failed")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(format!("{}{path}", self.base_url))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    /// Add a catalog product to the cart.
    pub async fn add_to_cart(&self, product_id: &str, name: &str, price: &str) -> Value {
        let resp = self
            .post_form(
                "/cart/add",
                &[("product_id", product_id), ("name", name), ("price", price)],
            )
            .await;
        assert!(resp.status().is_success(), "add failed: {}", resp.status());
        resp.json().await.expect("Invalid cart JSON")
    }

    pub async fn checkout(&self, name: &str, email: &str, phone: &str) -> Response {
        self.post_form(
            "/checkout",
            &[("name", name), ("email", email), ("phone", phone)],
        )
        .await
    }

    /// Search invoices, returning the response body.
    pub async fn search(&self, query: &str) -> Value {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/invoices/search", self.base_url),
            &[("q", query)],
        )
        .expect("Valid search URL");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .expect("Search request failed");
        assert!(resp.status().is_success(), "search failed: {}", resp.status());
        resp.json().await.expect("Invalid search JSON")
    }
}
