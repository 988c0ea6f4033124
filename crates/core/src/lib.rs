//! Shopfront Core - Cart, wishlist and pricing.
//!
//! This crate provides the shopper-facing list management used across all
//! Shopfront components:
//! - `storefront` - JSON API that keeps one cart and one wishlist per session
//! - `cli` - Offline quoting of cart and wishlist documents
//!
//! # Architecture
//!
//! The core crate contains only types and in-memory operations - no I/O, no
//! database access, no HTTP. Fetching initial contents and persisting changes
//! is the job of whoever owns a [`Cart`] or [`Wishlist`].
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for item IDs and money
//! - [`cart`] - Ordered cart lines with quantity adjustment
//! - [`pricing`] - Subtotal, shipping, tax and total breakdown
//! - [`wishlist`] - Saved items with like toggle and move-to-cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod pricing;
pub mod types;
pub mod wishlist;

pub use cart::{Cart, CartError, CartLine, QuantityChange};
pub use pricing::{CartTotals, PricingError, PricingPolicy};
pub use types::*;
pub use wishlist::{MoveToCart, Wishlist, WishlistEntry, WishlistError};
