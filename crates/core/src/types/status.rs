//! Status enums for products and orders.

use serde::{Deserialize, Serialize};

/// Threshold below which a product counts as low on stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Order status.
///
/// Orders are recorded as `Confirmed` and never transitioned; the other
/// values exist so stored data from the order service round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    #[default]
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Human-readable label for badges.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    Cod,
    Upi,
    Card,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cod => write!(f, "cod"),
            Self::Upi => write!(f, "upi"),
            Self::Card => write!(f, "card"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cod" => Ok(Self::Cod),
            "upi" => Ok(Self::Upi),
            "card" => Ok(Self::Card),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// Stock availability of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockStatus {
    OutOfStock,
    /// Fewer than [`LOW_STOCK_THRESHOLD`] units left.
    LowStock(u32),
    InStock(u32),
}

impl StockStatus {
    /// Classify a stock level.
    #[must_use]
    pub const fn from_stock(stock: u32) -> Self {
        if stock == 0 {
            Self::OutOfStock
        } else if stock < LOW_STOCK_THRESHOLD {
            Self::LowStock(stock)
        } else {
            Self::InStock(stock)
        }
    }

    /// Whether any units can be ordered.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        !matches!(self, Self::OutOfStock)
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfStock => write!(f, "Out of Stock"),
            Self::LowStock(n) => write!(f, "Low Stock ({n} left)"),
            Self::InStock(n) => write!(f, "In Stock ({n} available)"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_round_trip() {
        for method in [PaymentMethod::Cod, PaymentMethod::Upi, PaymentMethod::Card] {
            assert_eq!(method.to_string().parse::<PaymentMethod>().unwrap(), method);
        }
        assert_eq!("UPI".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_serde_is_lowercase() {
        let json = serde_json::to_string(&PaymentMethod::Card).unwrap();
        assert_eq!(json, "\"card\"");
    }

    #[test]
    fn test_order_status_defaults_to_confirmed() {
        assert_eq!(OrderStatus::default(), OrderStatus::Confirmed);
        assert_eq!(
            serde_json::to_string(&OrderStatus::Confirmed).unwrap(),
            "\"confirmed\""
        );
    }

    #[test]
    fn test_stock_status_boundaries() {
        assert_eq!(StockStatus::from_stock(0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_stock(9), StockStatus::LowStock(9));
        assert_eq!(StockStatus::from_stock(10), StockStatus::InStock(10));
        assert!(!StockStatus::OutOfStock.is_available());
        assert_eq!(StockStatus::LowStock(3).to_string(), "Low Stock (3 left)");
    }
}
