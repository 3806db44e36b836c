//! Cart line items.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// One entry in a shopping cart.
///
/// Adding the same product twice yields two lines; there is no quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
}

impl CartLine {
    /// Create a cart line.
    #[must_use]
    pub fn new(product_id: ProductId, name: impl Into<String>, unit_price: Price) -> Self {
        Self {
            product_id,
            name: name.into(),
            unit_price,
        }
    }
}
