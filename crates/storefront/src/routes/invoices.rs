//! Invoice lookup route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tiendita_core::{Invoice, InvoiceId};

use crate::db::InvoiceRepository;
use crate::error::{AppError, Result};
use crate::models::Notice;
use crate::services::{SearchOutcome, search_invoices};
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search response. `invoices` is empty when nothing matched.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub invoices: Vec<Invoice>,
    pub notice: Notice,
}

/// Search invoices by name, email or phone.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    let repo = InvoiceRepository::new(state.pool());

    let response = match search_invoices(&repo, &query.q).await? {
        SearchOutcome::Found(invoices) => SearchResponse {
            notice: Notice::invoices_found(&invoices),
            invoices,
        },
        SearchOutcome::NotFound => SearchResponse {
            invoices: Vec::new(),
            notice: Notice::invoice_not_found(),
        },
    };

    Ok(Json(response))
}

/// Show one invoice.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Invoice>> {
    let not_found = || AppError::NotFound(format!("invoice {id}"));

    let id = InvoiceId::checked(id).map_err(|_| not_found())?;
    InvoiceRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}
