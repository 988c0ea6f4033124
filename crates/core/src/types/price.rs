//! Type-safe money representation using decimal arithmetic.
//!
//! Amounts are kept exact. Rounding to the currency's minor unit happens only
//! when a value is formatted for display, never when it is stored.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places shown for presented amounts.
const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Errors that can occur when constructing [`Money`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount is below zero.
    #[error("amount cannot be negative (got {0})")]
    Negative(Decimal),
    /// The input is not a decimal number.
    #[error("invalid amount: {0}")]
    Invalid(String),
}

/// A non-negative monetary amount in the currency's standard unit
/// (dollars, not cents).
///
/// ## Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use shopfront_core::{CurrencyCode, Money};
///
/// let price = Money::new(Decimal::new(621_946, 3)).unwrap();
/// assert_eq!(price.display(CurrencyCode::USD), "$621.95");
///
/// assert!(Money::new(Decimal::new(-1, 2)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Zero in any currency.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a money amount.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a money amount from minor units (e.g. cents).
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), DISPLAY_DECIMAL_PLACES))
    }

    /// The exact, unrounded amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Add two amounts, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Multiply by a quantity, returning `None` on overflow.
    #[must_use]
    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    /// Multiply by a non-negative rate, returning `None` on overflow or if
    /// the rate is negative.
    #[must_use]
    pub fn checked_scale(self, rate: Decimal) -> Option<Self> {
        if rate.is_sign_negative() && !rate.is_zero() {
            return None;
        }
        self.0.checked_mul(rate).map(Self)
    }

    /// The amount rounded to two decimal places, midpoint away from zero.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self, currency: CurrencyCode) -> String {
        format!("{}{:.2}", currency.symbol(), self.rounded())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim()).map_err(|e| MoneyError::Invalid(e.to_string()))?;
        Self::new(amount)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol placed before amounts.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{00a3}",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(format!("unsupported currency: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_money_rejects_negative() {
        let err = Money::new(Decimal::new(-599, 2)).unwrap_err();
        assert_eq!(err, MoneyError::Negative(Decimal::new(-599, 2)));
    }

    #[test]
    fn test_money_accepts_zero() {
        assert!(Money::new(Decimal::ZERO).unwrap().is_zero());
    }

    #[test]
    fn test_money_from_cents() {
        assert_eq!(Money::from_cents(599).amount(), Decimal::new(599, 2));
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        let tax = Money::new(Decimal::new(55_996, 3)).unwrap();
        assert_eq!(tax.display(CurrencyCode::USD), "$56.00");

        let half = Money::new(Decimal::new(1005, 3)).unwrap();
        assert_eq!(half.display(CurrencyCode::USD), "$1.01");
    }

    #[test]
    fn test_display_pads_to_two_places() {
        let whole = Money::new(Decimal::from(5)).unwrap();
        assert_eq!(whole.to_string(), "5.00");
        assert_eq!(whole.display(CurrencyCode::GBP), "\u{00a3}5.00");
    }

    #[test]
    fn test_rounding_does_not_change_stored_amount() {
        let total = Money::new(Decimal::new(621_946, 3)).unwrap();
        assert_eq!(total.rounded(), Decimal::new(62_195, 2));
        assert_eq!(total.amount(), Decimal::new(621_946, 3));
    }

    #[test]
    fn test_checked_scale_rejects_negative_rate() {
        let money = Money::from_cents(1000);
        assert!(money.checked_scale(Decimal::new(-1, 1)).is_none());
        assert_eq!(
            money.checked_scale(Decimal::new(1, 1)).unwrap().amount(),
            Decimal::new(1, 0)
        );
    }

    #[test]
    fn test_money_deserialize_validates() {
        let ok: Money = serde_json::from_str("\"99.99\"").unwrap();
        assert_eq!(ok, Money::from_cents(9999));
        assert!(serde_json::from_str::<Money>("\"-1.00\"").is_err());
    }

    #[test]
    fn test_money_from_str() {
        assert_eq!(" 5.99 ".parse::<Money>().unwrap(), Money::from_cents(599));
        assert!(matches!("abc".parse::<Money>(), Err(MoneyError::Invalid(_))));
    }

    #[test]
    fn test_currency_code_parse() {
        assert_eq!("eur".parse::<CurrencyCode>().unwrap(), CurrencyCode::EUR);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }
}
