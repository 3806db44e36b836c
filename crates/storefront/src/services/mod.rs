//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Cart manager over session storage
//! - `checkout` - Fold the cart into an invoice and store it
//! - `invoices` - Invoice lookup by contact field

pub mod cart;
pub mod checkout;
pub mod invoices;

pub use cart::{CartError, CartManager, CartView};
pub use checkout::{CheckoutError, CustomerForm, checkout};
pub use invoices::{SearchError, SearchOutcome, search_invoices};
