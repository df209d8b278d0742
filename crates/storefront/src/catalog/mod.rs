//! Product catalog.
//!
//! The catalog is a fixed, in-memory list of products loaded from the
//! built-in seed data. Listings are derived on demand through
//! [`CatalogQuery`]; nothing is cached.

mod query;
mod seed;

pub use query::{
    ALL_CATEGORIES, CatalogQuery, PRODUCTS_PER_PAGE, Page, PriceRange, SortKey, paginate,
};

use medmart_core::{Product, ProductId};

/// The set of purchasable products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from an explicit product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in product list.
    #[must_use]
    pub fn seed() -> Self {
        Self::new(seed::products())
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// `"All"` followed by each distinct category in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![ALL_CATEGORIES];
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }

    /// Products in a category; `"All"` returns everything.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| category == ALL_CATEGORIES || product.category == category)
            .collect()
    }

    /// Case-insensitive search over name, category, manufacturer and description.
    ///
    /// Surrounding whitespace is ignored; a blank term matches everything.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let needle = term.trim().to_lowercase();
        self.products
            .iter()
            .filter(|product| product.matches_lowercase(&needle))
            .collect()
    }

    /// Run a listing query.
    #[must_use]
    pub fn query(&self, query: &CatalogQuery) -> Vec<&Product> {
        query.apply(&self.products)
    }

    /// The first `limit` discounted products, for the home page offers strip.
    #[must_use]
    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.is_discounted())
            .take(limit)
            .collect()
    }

    /// The first `limit` products in catalog order.
    #[must_use]
    pub fn new_arrivals(&self, limit: usize) -> Vec<&Product> {
        self.products.iter().take(limit).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_unique_ids() {
        let catalog = Catalog::seed();
        let mut ids: Vec<_> = catalog.products().iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_get() {
        let catalog = Catalog::seed();
        assert_eq!(
            catalog.get(ProductId::new(2)).unwrap().name,
            "Amoxicillin 500mg"
        );
        assert!(catalog.get(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_categories_in_first_appearance_order() {
        let catalog = Catalog::seed();
        assert_eq!(
            catalog.categories(),
            vec![
                "All",
                "Pain Relief",
                "Antibiotics",
                "Vitamins",
                "Digestive Health",
                "Allergy Relief",
                "Diabetes",
                "Supplements",
                "Cardiovascular",
            ]
        );
    }

    #[test]
    fn test_by_category() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.by_category("Vitamins").len(), 2);
        assert_eq!(catalog.by_category("All").len(), 12);
        assert!(catalog.by_category("Cosmetics").is_empty());
    }

    #[test]
    fn test_search_matches_manufacturer() {
        let catalog = Catalog::seed();
        let result = catalog.search("allercare");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Cetirizine 10mg");
    }

    #[test]
    fn test_featured_are_discounted() {
        let catalog = Catalog::seed();
        let featured = catalog.featured(4);
        let ids: Vec<i32> = featured.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3, 6]);
    }

    #[test]
    fn test_new_arrivals() {
        let catalog = Catalog::seed();
        let ids: Vec<i32> = catalog
            .new_arrivals(4)
            .iter()
            .map(|p| p.id.as_i32())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
