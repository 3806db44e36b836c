//! Invoice lookup.

use thiserror::Error;
use tracing::instrument;

use tiendita_core::Invoice;

use crate::db::{InvoiceRepository, RepositoryError};

/// Errors that can occur during an invoice search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Query was empty or whitespace.
    #[error("search query is empty")]
    EmptyQuery,

    /// A lookup failed.
    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// Result of a search. Finding nothing is an outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Vec<Invoice>),
    NotFound,
}

/// Search invoices by name, email or phone.
///
/// # Errors
///
/// Returns `SearchError::EmptyQuery` before touching storage if `query` is
/// blank, or `SearchError::Storage` if the lookup fails.
#[instrument(skip(invoices))]
pub async fn search_invoices(
    invoices: &InvoiceRepository<'_>,
    query: &str,
) -> Result<SearchOutcome, SearchError> {
    if query.trim().is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let found = invoices.search(query).await?;
    if found.is_empty() {
        Ok(SearchOutcome::NotFound)
    } else {
        Ok(SearchOutcome::Found(found))
    }
}
