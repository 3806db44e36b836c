//! Cart manager.
//!
//! The cart is an ordered list of [`CartLine`]s stored under one session key.
//! It supports append and full clear only; the total is recomputed from the
//! lines every time it is asked for.

use serde::Serialize;
use thiserror::Error;
use tower_sessions::Session;
use tracing::instrument;

use tiendita_core::{CartLine, Price};

use crate::models::session_keys;

/// Errors that can occur when reading or writing the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// The session store failed, or the stored cart could not be decoded.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Cart display data, returned after every mutation so the caller can
/// re-render the list and total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub count: usize,
    pub total: Price,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            lines: Vec::new(),
            count: 0,
            total: Price::ZERO,
        }
    }

    fn from_lines(lines: Vec<CartLine>) -> Self {
        Self {
            count: lines.len(),
            total: total_of(&lines),
            lines,
        }
    }
}

fn total_of(lines: &[CartLine]) -> Price {
    lines.iter().map(|line| line.unit_price).sum()
}

/// Cart operations over a visitor's session.
pub struct CartManager<'a> {
    session: &'a Session,
}

impl<'a> CartManager<'a> {
    /// Create a cart manager backed by `session`.
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Current lines, in the order they were added. Empty if none stored.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Session` if the session cannot be read.
    pub async fn lines(&self) -> Result<Vec<CartLine>, CartError> {
        Ok(self
            .session
            .get::<Vec<CartLine>>(session_keys::CART_ITEMS)
            .await?
            .unwrap_or_default())
    }

    /// Append a line. Adding the same product twice yields two lines.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Session` if the session cannot be read or written.
    #[instrument(skip(self), fields(product_id = %line.product_id))]
    pub async fn add_line(&self, line: CartLine) -> Result<CartView, CartError> {
        let mut lines = self.lines().await?;
        lines.push(line);
        self.session
            .insert(session_keys::CART_ITEMS, &lines)
            .await?;
        tracing::debug!(count = lines.len(), "Cart line added");
        Ok(CartView::from_lines(lines))
    }

    /// Remove the stored cart entirely.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Session` if the session cannot be written.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<CartView, CartError> {
        self.session.remove_value(session_keys::CART_ITEMS).await?;
        Ok(CartView::empty())
    }

    /// Sum of the unit prices of all lines.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Session` if the session cannot be read.
    pub async fn current_total(&self) -> Result<Price, CartError> {
        Ok(total_of(&self.lines().await?))
    }

    /// Lines, count and total.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Session` if the session cannot be read.
    pub async fn view(&self) -> Result<CartView, CartError> {
        Ok(CartView::from_lines(self.lines().await?))
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use tiendita_core::ProductId;

    use super::test_support::memory_session;
    use super::*;

    fn line(id: i64, name: &str, cents: i64) -> CartLine {
        CartLine::new(ProductId::new(id), name, Price::new(Decimal::new(cents, 2)))
    }

    #[tokio::test]
    async fn test_new_cart_is_empty() {
        let session = memory_session();
        let cart = CartManager::new(&session);

        assert!(cart.lines().await.unwrap().is_empty());
        assert_eq!(cart.current_total().await.unwrap(), Price::ZERO);
        assert_eq!(cart.view().await.unwrap(), CartView::empty());
    }

    #[tokio::test]
    async fn test_total_is_sum_of_added_lines() {
        let session = memory_session();
        let cart = CartManager::new(&session);
        let prices = [1999, 500, 1];

        for (i, cents) in prices.iter().enumerate() {
            cart.add_line(line(i64::try_from(i).unwrap(), "Item", *cents))
                .await
                .unwrap();
        }

        let view = cart.view().await.unwrap();
        assert_eq!(view.count, 3);
        assert_eq!(view.total, Price::new(Decimal::new(2500, 2)));
        assert_eq!(cart.current_total().await.unwrap(), view.total);
    }

    #[tokio::test]
    async fn test_same_product_twice_gives_two_lines_in_order() {
        let session = memory_session();
        let cart = CartManager::new(&session);

        cart.add_line(line(1, "Shirt", 2000)).await.unwrap();
        cart.add_line(line(2, "Mug", 750)).await.unwrap();
        let view = cart.add_line(line(1, "Shirt", 2000)).await.unwrap();

        let names: Vec<_> = view.lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Shirt", "Mug", "Shirt"]);
        assert_eq!(view.total, Price::new(Decimal::new(4750, 2)));
    }

    #[tokio::test]
    async fn test_clear_empties_cart() {
        let session = memory_session();
        let cart = CartManager::new(&session);
        cart.add_line(line(1, "Shirt", 2000)).await.unwrap();

        let view = cart.clear().await.unwrap();

        assert_eq!(view, CartView::empty());
        assert_eq!(cart.current_total().await.unwrap(), Price::ZERO);
        assert!(
            session
                .get::<Vec<CartLine>>(session_keys::CART_ITEMS)
                .await
                .unwrap()
                .is_none()
        );
    }
}
