//! Tax, delivery fee and grand total derived from a cart subtotal.
//!
//! Default rules: 18% GST on the subtotal, free delivery from a 500 subtotal,
//! otherwise a flat 50 fee. Amounts are exact decimals; round only for
//! display.

use medmart_core::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;

/// Business rules for deriving the amount due from a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRules {
    /// Flat tax rate as a fraction (0.18 = 18%).
    pub tax_rate: Decimal,
    /// Subtotal at or above which delivery is free.
    pub free_delivery_threshold: Decimal,
    /// Fee charged below the threshold.
    pub delivery_fee: Decimal,
}

impl PricingRules {
    pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);
    pub const DEFAULT_FREE_DELIVERY_THRESHOLD: Decimal = Decimal::from_parts(500, 0, 0, false, 0);
    pub const DEFAULT_DELIVERY_FEE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

    #[must_use]
    pub fn tax(&self, subtotal: Decimal) -> Decimal {
        subtotal * self.tax_rate
    }

    #[must_use]
    pub fn delivery_fee(&self, subtotal: Decimal) -> Decimal {
        if subtotal >= self.free_delivery_threshold {
            Decimal::ZERO
        } else {
            self.delivery_fee
        }
    }

    /// Full breakdown for a subtotal.
    #[must_use]
    pub fn summarize(&self, subtotal: Decimal) -> PriceSummary {
        let tax = self.tax(subtotal);
        let delivery_fee = self.delivery_fee(subtotal);
        let free_delivery_shortfall =
            (!delivery_fee.is_zero()).then(|| self.free_delivery_threshold - subtotal);

        PriceSummary {
            subtotal,
            tax_rate: self.tax_rate,
            tax,
            delivery_fee,
            total: subtotal + tax + delivery_fee,
            free_delivery_shortfall,
        }
    }

    /// Breakdown for a cart's current contents.
    #[must_use]
    pub fn summarize_cart(&self, cart: &Cart) -> PriceSummary {
        self.summarize(cart.total())
    }
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            tax_rate: Self::DEFAULT_TAX_RATE,
            free_delivery_threshold: Self::DEFAULT_FREE_DELIVERY_THRESHOLD,
            delivery_fee: Self::DEFAULT_DELIVERY_FEE,
        }
    }
}

/// Order summary shown beside the cart and at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax: Decimal,
    pub delivery_fee: Decimal,
    /// Subtotal plus tax plus delivery fee.
    pub total: Decimal,
    /// How much more would unlock free delivery, when a fee applies.
    pub free_delivery_shortfall: Option<Decimal>,
}

impl PriceSummary {
    #[must_use]
    pub fn has_free_delivery(&self) -> bool {
        self.delivery_fee.is_zero()
    }

    /// Human-readable lines for display.
    #[must_use]
    pub fn display_lines(&self) -> Vec<(String, String)> {
        let tax_label = format!(
            "Tax ({}% GST)",
            (self.tax_rate * Decimal::ONE_HUNDRED).normalize()
        );
        let delivery = if self.has_free_delivery() {
            "Free".to_string()
        } else {
            Price::store(self.delivery_fee).to_string()
        };
        vec![
            ("Subtotal".to_string(), Price::store(self.subtotal).to_string()),
            (tax_label, Price::store(self.tax).to_string()),
            ("Delivery".to_string(), delivery),
            ("Total".to_string(), Price::store(self.total).to_string()),
        ]
    }
}
