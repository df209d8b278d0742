//! Type-safe price representation using decimal arithmetic.
//!
//! All amounts are held as [`Decimal`] so that subtotals, tax and delivery
//! fees add up exactly; rounding only happens when a price is displayed.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the store's default currency.
    #[must_use]
    pub fn store(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::default())
    }
}

impl fmt::Display for Price {
    /// Formats as symbol plus two decimal places (e.g., "₹321.40"), rounding
    /// halves away from zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        )
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display_two_decimals() {
        let price = Price::store(Decimal::new(32140, 2));
        assert_eq!(price.to_string(), "₹321.40");

        let price = Price::store(Decimal::from(25));
        assert_eq!(price.to_string(), "₹25.00");
    }

    #[test]
    fn test_price_display_rounds() {
        let price = Price::new(Decimal::new(12_345, 3), CurrencyCode::USD);
        assert_eq!(price.to_string(), "$12.35");

        // Halves round up even when the kept digit is even.
        let price = Price::store(Decimal::new(40_125, 3));
        assert_eq!(price.to_string(), "₹40.13");

        let price = Price::store(Decimal::new(12_344, 3));
        assert_eq!(price.to_string(), "₹12.34");
    }

    #[test]
    fn test_default_currency_is_rupee() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::INR);
        assert_eq!(CurrencyCode::INR.code(), "INR");
    }
}
