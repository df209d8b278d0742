//! Admin dashboard aggregates over stored orders and the catalog.

use std::collections::HashMap;

use medmart_core::{LOW_STOCK_THRESHOLD, Order, Price, Product, ProductId};
use rust_decimal::Decimal;

use crate::catalog::Catalog;

/// Number of products listed under top sellers.
pub const TOP_SELLING_LIMIT: usize = 5;

/// Sum of stored order totals.
#[must_use]
pub fn total_revenue(orders: &[Order]) -> Decimal {
    orders.iter().map(|order| order.total).sum()
}

#[must_use]
pub const fn total_orders(orders: &[Order]) -> usize {
    orders.len()
}

/// Catalog products with fewer than [`LOW_STOCK_THRESHOLD`] units, in
/// catalog order.
#[must_use]
pub fn low_stock(catalog: &Catalog) -> Vec<&Product> {
    catalog
        .products()
        .iter()
        .filter(|product| product.stock < LOW_STOCK_THRESHOLD)
        .collect()
}

/// A product with the number of units sold across all orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopSeller<'a> {
    pub product: &'a Product,
    pub units_sold: u64,
}

/// Best-selling products by units ordered.
///
/// Ties go to the lower product id. Products that are no longer in the
/// catalog are skipped.
#[must_use]
pub fn top_selling<'a>(orders: &[Order], catalog: &'a Catalog, limit: usize) -> Vec<TopSeller<'a>> {
    let mut units: HashMap<ProductId, u64> = HashMap::new();
    for line in orders.iter().flat_map(|order| &order.items) {
        *units.entry(line.product_id).or_default() += u64::from(line.quantity);
    }

    let mut ranked: Vec<TopSeller<'a>> = units
        .into_iter()
        .filter_map(|(product_id, units_sold)| {
            catalog
                .get(product_id)
                .map(|product| TopSeller { product, units_sold })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.units_sold
            .cmp(&a.units_sold)
            .then_with(|| a.product.id.cmp(&b.product.id))
    });
    ranked.truncate(limit);
    ranked
}

/// Everything the dashboard page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary<'a> {
    pub total_revenue: Decimal,
    pub total_orders: usize,
    pub low_stock: Vec<&'a Product>,
    pub top_selling: Vec<TopSeller<'a>>,
}

impl<'a> DashboardSummary<'a> {
    #[must_use]
    pub fn build(orders: &[Order], catalog: &'a Catalog) -> Self {
        Self {
            total_revenue: total_revenue(orders),
            total_orders: total_orders(orders),
            low_stock: low_stock(catalog),
            top_selling: top_selling(orders, catalog, TOP_SELLING_LIMIT),
        }
    }

    /// Revenue formatted for display.
    #[must_use]
    pub fn revenue_display(&self) -> String {
        Price::store(self.total_revenue).to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::DateTime;
    use medmart_core::{OrderId, OrderLine, OrderStatus, PaymentMethod, ShippingAddress};

    use super::*;

    fn order(id: i32, lines: &[(i32, u32)], total: i64) -> Order {
        Order {
            order_id: OrderId::new(id),
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            items: lines
                .iter()
                .map(|&(product_id, quantity)| OrderLine {
                    product_id: ProductId::new(product_id),
                    product_name: format!("Product {product_id}"),
                    quantity,
                    unit_price: Decimal::from(10),
                })
                .collect(),
            shipping: ShippingAddress::default(),
            payment_method: PaymentMethod::Cod,
            requires_prescription: false,
            status: OrderStatus::Confirmed,
            total: Decimal::from(total),
        }
    }

    #[test]
    fn test_revenue_and_count() {
        let orders = vec![order(1, &[(1, 1)], 100), order(2, &[(2, 1)], 250)];
        assert_eq!(total_revenue(&orders), Decimal::from(350));
        assert_eq!(total_orders(&orders), 2);
        assert_eq!(total_revenue(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_low_stock() {
        let mut products = Catalog::seed().products().to_vec();
        products[0].stock = 9;
        products[1].stock = 10;
        products[2].stock = 0;
        let catalog = Catalog::new(products);

        let ids: Vec<i32> = low_stock(&catalog).iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(low_stock(&Catalog::seed()).is_empty());
    }

    #[test]
    fn test_top_selling_ranks_by_units_then_id() {
        let catalog = Catalog::seed();
        let orders = vec![
            order(1, &[(3, 2), (1, 5)], 0),
            order(2, &[(3, 3), (2, 4), (99, 50)], 0),
            order(3, &[(4, 1), (5, 1), (6, 1)], 0),
        ];

        let top = top_selling(&orders, &catalog, 5);
        let ranked: Vec<(i32, u64)> = top
            .iter()
            .map(|t| (t.product.id.as_i32(), t.units_sold))
            .collect();
        assert_eq!(ranked, vec![(1, 5), (3, 5), (2, 4), (4, 1), (5, 1)]);
    }

    #[test]
    fn test_summary() {
        let catalog = Catalog::seed();
        let orders = vec![order(1, &[(1, 2)], 321)];
        let summary = DashboardSummary::build(&orders, &catalog);

        assert_eq!(summary.total_orders, 1);
        assert_eq!(summary.revenue_display(), "₹321.00");
        assert_eq!(summary.top_selling.len(), 1);
    }
}
