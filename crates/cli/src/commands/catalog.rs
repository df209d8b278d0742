//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! medmart catalog list --search amox
//! medmart catalog list --prescription-only --sort price-high --page 2
//! medmart catalog show 2
//! medmart catalog categories
//! ```

use medmart_core::{Price, Product, ProductId};
use medmart_storefront::AppError;
use medmart_storefront::catalog::{
    CatalogQuery, PRODUCTS_PER_PAGE, Page, PriceRange, SortKey, paginate,
};
use medmart_storefront::Catalog;
use rust_decimal::Decimal;
use tracing::info;

/// Filters accepted by `catalog list`.
pub struct ListFilters {
    pub category: String,
    pub search: Option<String>,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub prescription_only: bool,
    pub in_stock_only: bool,
    pub sort: SortKey,
}

impl ListFilters {
    fn to_query(&self) -> CatalogQuery {
        let mut query = CatalogQuery::new()
            .category(self.category.clone())
            .price_range(PriceRange::new(self.min_price, self.max_price))
            .prescription_only(self.prescription_only)
            .in_stock_only(self.in_stock_only)
            .sort(self.sort);
        if let Some(term) = &self.search {
            query = query.search(term.clone());
        }
        query
    }
}

/// Apply filters and cut out the requested page.
fn listing<'a>(catalog: &'a Catalog, filters: &ListFilters, page: usize) -> Page<&'a Product> {
    let matches = catalog.query(&filters.to_query());
    paginate(&matches, page, PRODUCTS_PER_PAGE)
}

/// One-line summary used in listings.
fn summary_line(product: &Product) -> String {
    let mut line = format!(
        "#{:<3} {:<28} {:<16} {:>9}",
        product.id,
        product.name,
        product.category,
        Price::store(product.price).to_string()
    );
    if let Some(original) = product.original_price {
        line.push_str(&format!(" (was {})", Price::store(original)));
    }
    if product.requires_prescription {
        line.push_str(" [Rx]");
    }
    line.push_str(&format!(" - {}", product.stock_status()));
    line
}

/// List products matching filters.
pub fn list(filters: &ListFilters, page: usize) {
    let catalog = Catalog::seed();
    let page = listing(&catalog, filters, page);

    info!(
        "Showing page {} of {} ({} products)",
        page.number,
        page.total_pages.max(1),
        page.total_items
    );
    if page.items.is_empty() {
        info!("No products found");
        return;
    }
    for product in &page.items {
        info!("{}", summary_line(product));
    }
    if page.has_next() {
        info!("More results: --page {}", page.number + 1);
    }
}

/// Show one product in detail.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product does not exist.
pub fn show(id: ProductId) -> Result<(), AppError> {
    let catalog = Catalog::seed();
    let product = catalog
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    info!("{}", product.name);
    info!("  Category:     {}", product.category);
    info!("  Manufacturer: {}", product.manufacturer);
    info!("  Price:        {}", Price::store(product.price));
    if let Some(savings) = product.savings() {
        info!("  You save:     {}", Price::store(savings));
    }
    info!("  Availability: {}", product.stock_status());
    if product.requires_prescription {
        info!("  Prescription required");
    }
    info!("  {}", product.description);
    info!("  Dosage:       {}", product.dosage);
    info!("  Ingredients:  {}", product.ingredients.join(", "));
    info!("  Side effects: {}", product.side_effects.join(", "));
    for warning in &product.warnings {
        info!("  Warning: {warning}");
    }
    Ok(())
}

/// List categories in catalog order.
pub fn categories() {
    for category in Catalog::seed().categories() {
        info!("{category}");
    }
}
