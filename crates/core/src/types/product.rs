//! Catalog product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::status::StockStatus;

/// Upper bound on the quantity picker, regardless of stock.
pub const MAX_QUANTITY_PER_PICK: u32 = 10;

/// A product in the catalog.
///
/// Products are static seed data and are never mutated at runtime; carts
/// and orders keep their own snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub manufacturer: String,
    /// Current selling price.
    pub price: Decimal,
    /// Price before discount, when the product is on offer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    pub description: String,
    /// Image URL.
    pub image: String,
    pub requires_prescription: bool,
    pub stock: u32,
    pub ingredients: Vec<String>,
    pub dosage: String,
    pub side_effects: Vec<String>,
    pub warnings: Vec<String>,
}

impl Product {
    /// Whether the product is on offer.
    #[must_use]
    pub const fn is_discounted(&self) -> bool {
        self.original_price.is_some()
    }

    /// Amount saved against the original price, if any.
    #[must_use]
    pub fn savings(&self) -> Option<Decimal> {
        self.original_price.map(|original| original - self.price)
    }

    #[must_use]
    pub const fn stock_status(&self) -> StockStatus {
        StockStatus::from_stock(self.stock)
    }

    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Largest quantity offered by the quantity picker.
    #[must_use]
    pub fn max_selectable_quantity(&self) -> u32 {
        self.stock.min(MAX_QUANTITY_PER_PICK)
    }

    /// Case-insensitive substring match over name, category, manufacturer
    /// and description. `needle` must already be lowercase.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        [
            &self.name,
            &self.category,
            &self.manufacturer,
            &self.description,
        ]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}
