//! Cart and line item types.
//!
//! A [`Cart`] is an insertion-ordered list of [`CartLine`]s keyed by
//! [`ItemId`]. Quantities are always at least one: a request to drop a
//! quantity below one is rejected and leaves the cart untouched, it never
//! removes the line. Removing a line is an explicit, separate operation.

use std::collections::HashSet;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::{CartTotals, PricingError, PricingPolicy};
use crate::types::{ItemId, Money};

/// Errors that can occur when building a cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Line quantities must be at least one.
    #[error("quantity must be at least 1 (got {0})")]
    InvalidQuantity(u32),
    /// Merging a line would push its quantity past `u32::MAX`.
    #[error("quantity overflow for item {0}")]
    QuantityOverflow(ItemId),
    /// Two lines share the same item.
    #[error("duplicate cart line for item {0}")]
    DuplicateItem(ItemId),
}

/// Outcome of [`Cart::set_quantity`].
///
/// Rejections are reported as values, not errors: the caller decides whether
/// they are worth surfacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now has the requested quantity.
    Applied,
    /// The requested quantity was below one; nothing changed.
    Rejected,
    /// No line exists for the item; nothing changed.
    NotFound,
}

/// One product entry with a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog item this line refers to.
    pub item_id: ItemId,
    /// Product name (denormalized for display).
    pub display_name: String,
    /// Price of a single unit.
    pub unit_price: Money,
    /// Number of units, never zero.
    pub quantity: NonZeroU32,
}

impl CartLine {
    /// Create a new line item.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` is zero.
    pub fn new(
        item_id: ItemId,
        display_name: impl Into<String>,
        unit_price: Money,
        quantity: u32,
    ) -> Result<Self, CartError> {
        let quantity = NonZeroU32::new(quantity).ok_or(CartError::InvalidQuantity(quantity))?;
        Ok(Self {
            item_id,
            display_name: display_name.into(),
            unit_price,
            quantity,
        })
    }

    /// Number of units as a plain integer.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Unit price times quantity, or `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.checked_times(self.quantity())
    }
}

/// A shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add a line to the cart.
    ///
    /// If a line for the same item exists, its quantity grows by the new
    /// line's quantity and keeps its position. Otherwise the line is appended.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] if the merged quantity does not
    /// fit in a `u32`.
    pub fn add(&mut self, line: CartLine) -> Result<(), CartError> {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.item_id == line.item_id) {
            existing.quantity = existing
                .quantity
                .checked_add(line.quantity.get())
                .ok_or(CartError::QuantityOverflow(line.item_id))?;
            return Ok(());
        }

        self.lines.push(line);
        Ok(())
    }

    /// Remove the line for an item.
    ///
    /// Returns `true` if a line was removed. Removing an unknown item is a
    /// no-op.
    pub fn remove(&mut self, item_id: ItemId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.item_id != item_id);
        self.lines.len() < len_before
    }

    /// Replace the quantity of a line.
    ///
    /// Quantities below one are rejected without touching the cart.
    pub fn set_quantity(&mut self, item_id: ItemId, quantity: i64) -> QuantityChange {
        let Some(quantity) = u32::try_from(quantity).ok().and_then(NonZeroU32::new) else {
            return QuantityChange::Rejected;
        };

        match self.lines.iter_mut().find(|l| l.item_id == item_id) {
            Some(line) => {
                line.quantity = quantity;
                QuantityChange::Applied
            }
            None => QuantityChange::NotFound,
        }
    }

    /// Price the current lines.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the totals exceed the decimal range.
    pub fn totals(&self, policy: &PricingPolicy) -> Result<CartTotals, PricingError> {
        CartTotals::compute(&self.lines, policy)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for an item.
    #[must_use]
    pub fn get(&self, item_id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item_id == item_id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity())).sum()
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CartError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(lines.len());
        if let Some(line) = lines.iter().find(|line| !seen.insert(line.item_id)) {
            return Err(CartError::DuplicateItem(line.item_id));
        }
        Ok(Self { lines })
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
