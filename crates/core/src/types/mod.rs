//! Core types for Tiendita.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod customer;
pub mod id;
pub mod invoice;
pub mod price;
pub mod product;

pub use cart::CartLine;
pub use customer::{Customer, CustomerError, normalize_contact};
pub use id::*;
pub use invoice::{Invoice, InvoiceError, NewInvoice};
pub use price::Price;
pub use product::Product;
