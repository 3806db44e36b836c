//! Session-related types.
//!
//! The session is the storefront's ephemeral per-visitor key-value storage.

/// Session keys.
pub mod keys {
    /// Key for the serialized cart line sequence.
    pub const CART_ITEMS: &str = "cart_items";
}
