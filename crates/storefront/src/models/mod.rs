//! Domain models for storefront.
//!
//! Product, cart line and invoice types live in `tiendita-core`; this module
//! holds the storefront-only pieces.

pub mod notice;
pub mod session;

pub use notice::{Notice, NoticeKind};
pub use session::keys as session_keys;
