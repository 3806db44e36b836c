//! Product route handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use tiendita_core::Product;

use crate::state::AppState;

/// Product listing response.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// List the catalog.
///
/// Loads from the remote catalog on every request. A failed load is logged
/// and shows as an empty list.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<ProductsResponse> {
    Json(ProductsResponse {
        products: state.catalog().load_products().await,
    })
}
