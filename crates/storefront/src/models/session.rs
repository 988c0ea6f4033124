//! Session-related types.
//!
//! Each browser session owns exactly one cart and one wishlist. Both are
//! stored as JSON under the keys below and default to empty.

/// Session keys for shopper lists.
pub mod keys {
    /// Key for the shopper's cart lines.
    pub const CART: &str = "cart";

    /// Key for the shopper's wishlist entries.
    pub const WISHLIST: &str = "wishlist";
}
