//! Cart route handlers.
//!
//! Cart lines are stored in the session. Every mutation answers with the
//! full cart so the client can redraw the list and total.

use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use tiendita_core::{CartLine, Price, ProductId};

use crate::error::{Result, add_breadcrumb};
use crate::models::Notice;
use crate::services::{CartManager, CartView};

/// Add to cart form data, as posted by the product list's buy button.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
    pub name: String,
    pub price: Price,
}

/// Cart mutation response.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: CartView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// Display the cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    Ok(Json(CartManager::new(&session).view().await?))
}

/// Add an item to the cart.
#[instrument(skip(session))]
pub async fn add(session: Session, Form(form): Form<AddToCartForm>) -> Result<Json<CartResponse>> {
    let product_id = form.product_id.to_string();
    let line = CartLine::new(ProductId::new(form.product_id), form.name, form.price);
    let cart = CartManager::new(&session).add_line(line).await?;

    add_breadcrumb("cart", "Added product", &[("product_id", product_id.as_str())]);

    Ok(Json(CartResponse {
        cart,
        notice: Some(Notice::product_added()),
    }))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartResponse>> {
    let cart = CartManager::new(&session).clear().await?;
    Ok(Json(CartResponse { cart, notice: None }))
}
