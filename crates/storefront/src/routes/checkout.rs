//! Checkout route handler.

use axum::{Form, Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use tiendita_core::Invoice;

use crate::db::InvoiceRepository;
use crate::error::Result;
use crate::models::Notice;
use crate::services::{self, CartManager, CartView, CustomerForm};
use crate::state::AppState;

/// Successful checkout response.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub invoice: Invoice,
    pub cart: CartView,
    pub notice: Notice,
}

/// Pay for the cart (simulated) and record the invoice.
///
/// The confirmation is only sent once the invoice is stored. Validation
/// problems come back as 422 with a warning notice and change nothing.
#[instrument(skip(state, session, form))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CustomerForm>,
) -> Result<Json<CheckoutResponse>> {
    let cart = CartManager::new(&session);
    let invoices = InvoiceRepository::new(state.pool());

    let invoice = services::checkout(&cart, &invoices, &form).await?;

    Ok(Json(CheckoutResponse {
        notice: Notice::purchase_complete(&invoice),
        cart: CartView::empty(),
        invoice,
    }))
}
