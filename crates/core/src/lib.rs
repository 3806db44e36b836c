//! Tiendita Core - Shared types library.
//!
//! This crate provides common types used across all Tiendita components:
//! - `storefront` - Catalog, cart, checkout and invoice lookup service
//! - `cli` - Command-line tools for migrations and invoice lookup
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, customer contact data, cart lines,
//!   products and invoices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
