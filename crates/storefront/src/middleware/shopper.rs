//! Shopper extractor.
//!
//! Gives route handlers access to the cart and wishlist stored in the
//! current session.

use axum::{extract::FromRequestParts, http::request::Parts};
use shopfront_core::{Cart, Wishlist};
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::models::session_keys;

/// Extractor for the current shopper's lists.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(shopper: Shopper) -> Result<String> {
///     let cart = shopper.cart().await?;
///     Ok(format!("{} lines", cart.len()))
/// }
/// ```
pub struct Shopper(Session);

impl<S> FromRequestParts<S> for Shopper
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        // Set by SessionManagerLayer
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Self)
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))
    }
}

impl Shopper {
    /// Load the cart, or an empty one if none was stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails or the stored cart is invalid.
    pub async fn cart(&self) -> Result<Cart> {
        Ok(self
            .0
            .get::<Cart>(session_keys::CART)
            .await?
            .unwrap_or_default())
    }

    /// Store the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn save_cart(&self, cart: &Cart) -> Result<()> {
        self.0.insert(session_keys::CART, cart).await?;
        Ok(())
    }

    /// Load the wishlist, or an empty one if none was stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails or the stored wishlist is invalid.
    pub async fn wishlist(&self) -> Result<Wishlist> {
        Ok(self
            .0
            .get::<Wishlist>(session_keys::WISHLIST)
            .await?
            .unwrap_or_default())
    }

    /// Store the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn save_wishlist(&self, wishlist: &Wishlist) -> Result<()> {
        self.0.insert(session_keys::WISHLIST, wishlist).await?;
        Ok(())
    }
}
