//! HTTP route handlers for storefront.
//!
//! All responses are JSON; the rendering layer is a separate client.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Catalog
//! GET  /products               - Product listing (empty if the catalog is down)
//!
//! # Cart (session)
//! GET  /cart                   - Cart lines, count and total
//! POST /cart/add               - Append a line (form: product_id, name, price)
//! POST /cart/clear             - Remove all lines
//!
//! # Checkout
//! POST /checkout               - Save invoice and clear cart (form: name, email, phone)
//!
//! # Invoices
//! GET  /invoices/search?q=     - Search by name, email or phone
//! GET  /invoices/{id}          - Invoice detail
//! ```

pub mod cart;
pub mod checkout;
pub mod health;
pub mod invoices;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/clear", post(cart::clear))
}

/// Create the invoice routes router.
pub fn invoice_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(invoices::search))
        .route("/{id}", get(invoices::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/products", get(products::index))
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::create))
        .nest("/invoices", invoice_routes())
}
