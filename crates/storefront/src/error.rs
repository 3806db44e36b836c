//! HTTP error mapping.
//!
//! Handlers return [`Result`]. Shopper mistakes come back as a 422 carrying
//! the [`Notice`] to display; storage failures are reported to Sentry and
//! answered without internal detail.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::Notice;
use crate::services::{CartError, CheckoutError, SearchError};

/// Everything a storefront handler can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invoice storage failed outside of checkout.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Session (cart) storage failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// The invoice could not be written; the cart was left as it was.
    #[error("Checkout failed: {0}")]
    CheckoutFailed(RepositoryError),

    /// Input rejected before any state change.
    #[error("Rejected: {}", .0.title)]
    Rejected(Notice),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Cart(_) | Self::CheckoutFailed(_)
        )
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyCart => Self::Rejected(Notice::empty_cart()),
            CheckoutError::IncompleteCustomer(_) => Self::Rejected(Notice::incomplete_customer()),
            CheckoutError::Cart(e) => Self::Cart(e),
            CheckoutError::Storage(e) => Self::CheckoutFailed(e),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::EmptyQuery => Self::Rejected(Notice::empty_search_query()),
            SearchError::Storage(e) => Self::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "Request failed");
        }

        match self {
            Self::Rejected(notice) => (StatusCode::UNPROCESSABLE_ENTITY, Json(notice)).into_response(),
            Self::CheckoutFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(Notice::purchase_failed())).into_response()
            }
            Self::Database(_) | Self::Cart(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            Self::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
        }
    }
}

/// Handler result.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record a shopper action as a Sentry breadcrumb.
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added product", &[("product_id", "1")]);
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_owned()),
        message: Some(message.to_owned()),
        level: sentry::Level::Info,
        data: data
            .iter()
            .map(|(key, value)| ((*key).to_owned(), serde_json::Value::from(*value)))
            .collect(),
        ..Default::default()
    });
}
