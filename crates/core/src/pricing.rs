//! Order pricing breakdown.
//!
//! Totals are derived from the current cart lines on every read and are never
//! cached on the cart. All amounts stay exact; see [`Money::display`] for the
//! presentation rounding.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartLine;
use crate::types::Money;

/// Flat shipping charge applied by [`PricingPolicy::default`] (5.99).
pub const DEFAULT_SHIPPING_CENTS: u32 = 599;

/// Tax rate applied by [`PricingPolicy::default`], in percent.
pub const DEFAULT_TAX_PERCENT: i64 = 10;

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("tax rate cannot be negative (got {0})")]
    NegativeTaxRate(Decimal),
    #[error("price calculation overflowed")]
    Overflow,
}

/// Shipping and tax parameters used to price a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    shipping_flat: Money,
    tax_rate: Decimal,
}

impl PricingPolicy {
    /// Create a pricing policy.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NegativeTaxRate`] if `tax_rate` is below zero.
    pub fn new(shipping_flat: Money, tax_rate: Decimal) -> Result<Self, PricingError> {
        if tax_rate.is_sign_negative() && !tax_rate.is_zero() {
            return Err(PricingError::NegativeTaxRate(tax_rate));
        }
        Ok(Self {
            shipping_flat,
            tax_rate,
        })
    }

    /// Flat shipping charge added to every order.
    #[must_use]
    pub const fn shipping_flat(&self) -> Money {
        self.shipping_flat
    }

    /// Fraction of the subtotal charged as tax (0.10 = 10%).
    #[must_use]
    pub const fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            shipping_flat: Money::from_cents(DEFAULT_SHIPPING_CENTS),
            tax_rate: Decimal::new(DEFAULT_TAX_PERCENT, 2),
        }
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of unit price times quantity over all lines.
    pub subtotal: Money,
    /// Flat shipping charge.
    pub shipping: Money,
    /// Subtotal times the tax rate.
    pub tax: Money,
    /// Subtotal + shipping + tax.
    pub total: Money,
}

impl CartTotals {
    /// Price a sequence of cart lines.
    ///
    /// Shipping is charged even when there are no lines.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if any intermediate amount exceeds
    /// the decimal range.
    pub fn compute<'a, I>(lines: I, policy: &PricingPolicy) -> Result<Self, PricingError>
    where
        I: IntoIterator<Item = &'a CartLine>,
    {
        let subtotal = lines.into_iter().try_fold(Money::ZERO, |acc, line| {
            line.line_total()
                .and_then(|line_total| acc.checked_add(line_total))
                .ok_or(PricingError::Overflow)
        })?;

        let shipping = policy.shipping_flat();
        let tax = subtotal
            .checked_scale(policy.tax_rate())
            .ok_or(PricingError::Overflow)?;
        let total = subtotal
            .checked_add(shipping)
            .and_then(|sum| sum.checked_add(tax))
            .ok_or(PricingError::Overflow)?;

        Ok(Self {
            subtotal,
            shipping,
            tax,
            total,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ItemId;

    fn line(id: i32, cents: u32, quantity: u32) -> CartLine {
        CartLine::new(ItemId::new(id), format!("Item {id}"), Money::from_cents(cents), quantity)
            .unwrap()
    }

    #[test]
    fn test_default_policy() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.shipping_flat(), Money::from_cents(599));
        assert_eq!(policy.tax_rate(), Decimal::new(10, 2));
    }

    #[test]
    fn test_policy_rejects_negative_tax_rate() {
        let result = PricingPolicy::new(Money::ZERO, Decimal::new(-5, 2));
        assert_eq!(result, Err(PricingError::NegativeTaxRate(Decimal::new(-5, 2))));
    }

    #[test]
    fn test_reference_order_totals() {
        let lines = [line(1, 9999, 1), line(2, 19999, 2), line(3, 5999, 1)];
        let totals = CartTotals::compute(&lines, &PricingPolicy::default()).unwrap();

        assert_eq!(totals.subtotal.amount(), Decimal::new(55_996, 2));
        assert_eq!(totals.shipping.amount(), Decimal::new(599, 2));
        assert_eq!(totals.tax.amount(), Decimal::new(55_996, 3));
        assert_eq!(totals.total.amount(), Decimal::new(621_946, 3));
        assert_eq!(totals.total.to_string(), "621.95");
    }

    #[test]
    fn test_empty_cart_still_pays_shipping() {
        let totals = CartTotals::compute(&Vec::<CartLine>::new(), &PricingPolicy::default()).unwrap();
        assert!(totals.subtotal.is_zero());
        assert!(totals.tax.is_zero());
        assert_eq!(totals.total, Money::from_cents(599));
    }

    #[test]
    fn test_custom_policy() {
        let policy = PricingPolicy::new(Money::ZERO, Decimal::new(25, 2)).unwrap();
        let totals = CartTotals::compute(&[line(1, 400, 3)], &policy).unwrap();
        assert_eq!(totals.subtotal, Money::from_cents(1200));
        assert_eq!(totals.tax, Money::from_cents(300));
        assert_eq!(totals.total, Money::from_cents(1500));
    }

    #[test]
    fn test_overflow_is_reported() {
        let huge = Money::new(Decimal::MAX).unwrap();
        let lines = [CartLine::new(ItemId::new(1), "Huge", huge, 2).unwrap()];
        assert_eq!(
            CartTotals::compute(&lines, &PricingPolicy::default()),
            Err(PricingError::Overflow)
        );
    }
}
