//! Order records.
//!
//! An [`Order`] is an immutable snapshot taken at checkout. Line prices are
//! copied from the cart at that moment, so later catalog changes never alter
//! a stored order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::address::ShippingAddress;
use super::id::{OrderId, ProductId};
use super::status::{OrderStatus, PaymentMethod};

/// One product line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    /// Product name at the time of ordering.
    pub product_name: String,
    pub quantity: u32,
    /// Unit price at the time of ordering.
    pub unit_price: Decimal,
}

impl OrderLine {
    /// Stored unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderLine>,
    pub shipping: ShippingAddress,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub requires_prescription: bool,
    #[serde(default)]
    pub status: OrderStatus,
    /// Grand total charged: items subtotal plus tax and delivery fee.
    pub total: Decimal,
}

impl Order {
    /// Sum of stored line totals, before tax and delivery.
    #[must_use]
    pub fn items_subtotal(&self) -> Decimal {
        self.items.iter().map(OrderLine::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}
