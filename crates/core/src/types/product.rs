//! Catalog products as returned by the remote catalog API.

use serde::{Deserialize, Serialize};

use super::cart::CartLine;
use super::id::ProductId;
use super::price::Price;

/// A purchasable product. Read-only; never persisted locally.
///
/// Unknown fields in the upstream JSON (ratings and the like) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
}

impl Product {
    /// The cart line added when this product is bought.
    #[must_use]
    pub fn to_cart_line(&self) -> CartLine {
        CartLine::new(self.id, self.title.clone(), self.price)
    }
}
