//! Invoices: the durable record of one completed checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cart::CartLine;
use super::customer::Customer;
use super::id::InvoiceId;
use super::price::Price;

/// Errors that can occur when building an invoice.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvoiceError {
    /// An invoice needs at least one line.
    #[error("invoice has no items")]
    NoItems,
}

/// An invoice that has not been stored yet, so it has no number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    customer: Customer,
    items: Vec<CartLine>,
    total: Price,
    created_at: DateTime<Utc>,
}

impl NewInvoice {
    /// Fold cart lines into an invoice. The total is the sum of the line
    /// prices at this moment.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::NoItems` if `items` is empty.
    pub fn from_cart(
        customer: Customer,
        items: Vec<CartLine>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, InvoiceError> {
        if items.is_empty() {
            return Err(InvoiceError::NoItems);
        }

        let total = items.iter().map(|line| line.unit_price).sum();

        Ok(Self {
            customer,
            items,
            total,
            created_at,
        })
    }

    #[must_use]
    pub const fn customer(&self) -> &Customer {
        &self.customer
    }

    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attach the number assigned by the store.
    #[must_use]
    pub fn with_id(self, id: InvoiceId) -> Invoice {
        Invoice {
            id,
            customer: self.customer,
            items: self.items,
            total: self.total,
            created_at: self.created_at,
        }
    }
}

/// A stored invoice. Never updated or deleted once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    #[serde(flatten)]
    pub customer: Customer,
    pub items: Vec<CartLine>,
    pub total: Price,
    pub created_at: DateTime<Utc>,
}
