//! Filtering, sorting and pagination over catalog products.
//!
//! Every active filter narrows the result; filters are combined with logical
//! AND, so the order in which they are applied never changes the outcome.
//! An empty result is a normal outcome, not an error.

use std::cmp::Ordering;

use medmart_core::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category name that disables the category filter.
pub const ALL_CATEGORIES: &str = "All";

/// Products shown per listing page.
pub const PRODUCTS_PER_PAGE: usize = 12;

/// Upper end of the default price slider.
const DEFAULT_MAX_PRICE: i64 = 500;

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortKey {
    /// Name, ascending.
    #[default]
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "price-low")]
    PriceLowToHigh,
    #[serde(rename = "price-high")]
    PriceHighToLow,
    /// Stock level, descending, as a popularity proxy.
    #[serde(rename = "popularity")]
    Popularity,
}

impl SortKey {
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::PriceLowToHigh => a.price.cmp(&b.price),
            Self::PriceHighToLow => b.price.cmp(&a.price),
            Self::Popularity => b.stock.cmp(&a.stock),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::PriceLowToHigh => write!(f, "price-low"),
            Self::PriceHighToLow => write!(f, "price-high"),
            Self::Popularity => write!(f, "popularity"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "price-low" => Ok(Self::PriceLowToHigh),
            "price-high" => Ok(Self::PriceHighToLow),
            "popularity" => Ok(Self::Popularity),
            _ => Err(format!("invalid sort key: {s}")),
        }
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    #[must_use]
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// A range that admits every price.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(Decimal::ZERO, Decimal::MAX)
    }

    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    /// The storefront slider's initial position: 0 to 500.
    fn default() -> Self {
        Self::new(Decimal::ZERO, Decimal::from(DEFAULT_MAX_PRICE))
    }
}

/// A combination of listing filters plus a sort order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Category to keep; `None` or [`ALL_CATEGORIES`] keeps every category.
    pub category: Option<String>,
    /// Free-text search; blank disables the filter.
    pub search: Option<String>,
    pub price_range: PriceRange,
    pub prescription_only: bool,
    pub in_stock_only: bool,
    pub sort: SortKey,
}

impl CatalogQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    #[must_use]
    pub const fn price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    #[must_use]
    pub const fn prescription_only(mut self, enabled: bool) -> Self {
        self.prescription_only = enabled;
        self
    }

    #[must_use]
    pub const fn in_stock_only(mut self, enabled: bool) -> Self {
        self.in_stock_only = enabled;
        self
    }

    #[must_use]
    pub const fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    fn active_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| *category != ALL_CATEGORIES)
    }

    fn active_search(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether a product passes every active filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.active_search();
        self.matches_with(product, needle.as_deref())
    }

    fn matches_with(&self, product: &Product, needle: Option<&str>) -> bool {
        self.active_category()
            .is_none_or(|category| product.category == category)
            && needle.is_none_or(|needle| product.matches_lowercase(needle))
            && self.price_range.contains(product.price)
            && (!self.prescription_only || product.requires_prescription)
            && (!self.in_stock_only || product.is_in_stock())
    }

    /// Matching products in sort order. Ties keep catalog order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let needle = self.active_search();
        let mut result: Vec<&Product> = products
            .iter()
            .filter(|product| self.matches_with(product, needle.as_deref()))
            .collect();
        result.sort_by(|a, b| self.sort.compare(a, b));
        result
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was requested.
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slice `items` into 1-based pages of `per_page`.
///
/// Page 0 is treated as page 1; pages past the end are empty.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let number = page.max(1);
    let start = (number - 1).saturating_mul(per_page);
    let page_items = items
        .iter()
        .skip(start)
        .take(per_page)
        .cloned()
        .collect();

    Page {
        items: page_items,
        number,
        total_pages: items.len().div_ceil(per_page),
        total_items: items.len(),
    }
}
