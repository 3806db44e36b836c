//! Checkout: fold the cart into an invoice.
//!
//! Validation happens before any storage access. The cart is cleared only
//! after the invoice write has committed, so a failed save leaves the
//! shopper's cart intact and produces no confirmation.

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use tiendita_core::{Customer, CustomerError, Invoice, NewInvoice};

use super::cart::{CartError, CartManager};
use crate::db::{InvoiceRepository, RepositoryError};

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to buy.
    #[error("cart is empty")]
    EmptyCart,

    /// Name, email or phone missing.
    #[error("incomplete customer data: {0}")]
    IncompleteCustomer(#[from] CustomerError),

    /// Cart storage failed.
    #[error("cart error: {0}")]
    Cart(#[from] CartError),

    /// Writing the invoice failed.
    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

impl CheckoutError {
    /// Whether this is a validation failure the shopper can fix.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyCart | Self::IncompleteCustomer(_))
    }
}

/// Customer details as entered at checkout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Complete a purchase.
///
/// Returns the stored invoice. On any error nothing has been written and
/// the cart is unchanged.
///
/// # Errors
///
/// - `CheckoutError::EmptyCart` if the cart has no lines
/// - `CheckoutError::IncompleteCustomer` if a contact field is blank
/// - `CheckoutError::Cart` if the cart cannot be read
/// - `CheckoutError::Storage` if the invoice cannot be saved
#[instrument(skip(cart, invoices, form))]
pub async fn checkout(
    cart: &CartManager<'_>,
    invoices: &InvoiceRepository<'_>,
    form: &CustomerForm,
) -> Result<Invoice, CheckoutError> {
    let items = cart.lines().await?;
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let customer = Customer::new(&form.name, &form.email, &form.phone)?;
    let draft =
        NewInvoice::from_cart(customer, items, Utc::now()).map_err(|_| CheckoutError::EmptyCart)?;

    let invoice = invoices.save(draft).await?;

    // The purchase is recorded; a stale cart is not worth failing it over.
    if let Err(e) = cart.clear().await {
        tracing::error!(invoice_id = %invoice.id, error = %e, "Failed to clear cart after checkout");
    }

    Ok(invoice)
}
