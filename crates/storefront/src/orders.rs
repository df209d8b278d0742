//! Order history.
//!
//! Orders live as one JSON array under the [`ORDERS_KEY`] key of a
//! [`KvStore`]. The array is read whole and rewritten whole on append; a
//! missing key means nothing has been ordered yet.

use medmart_core::{Order, OrderId, OrderLine, Price};
use tracing::instrument;

use crate::storage::{KvStore, StorageError};

/// Store key holding the order array.
pub const ORDERS_KEY: &str = "orders";

/// Repository for placed orders.
#[derive(Debug)]
pub struct OrderHistory<S> {
    store: S,
}

impl<S: KvStore> OrderHistory<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// All orders, in the order they were persisted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DataCorruption` if the stored value is not an
    /// order array, or any error the backing store raises.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<Order>, StorageError> {
        let Some(raw) = self.store.get(ORDERS_KEY)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw)
            .map_err(|e| StorageError::DataCorruption(format!("invalid order list: {e}")))
    }

    /// Look up a single order.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list`].
    pub fn find(&self, order_id: OrderId) -> Result<Option<Order>, StorageError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|order| order.order_id == order_id))
    }

    /// Append an order to the end of the list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if an order with the same id is
    /// already stored, or `StorageError` if the existing list cannot be read
    /// or the updated list cannot be written.
    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub fn append(&mut self, order: Order) -> Result<(), StorageError> {
        let mut orders = self.list()?;
        if orders.iter().any(|stored| stored.order_id == order.order_id) {
            return Err(StorageError::Conflict(format!(
                "order {} already exists",
                order.order_id
            )));
        }
        orders.push(order);

        let raw = serde_json::to_string(&orders)?;
        self.store.set(ORDERS_KEY, raw)?;

        tracing::info!(count = orders.len(), "Order saved");
        Ok(())
    }

    /// Next locally assigned id: highest stored id plus one, starting at 1.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list`].
    pub fn next_id(&self) -> Result<OrderId, StorageError> {
        Ok(self
            .list()?
            .iter()
            .map(|order| order.order_id)
            .max()
            .map_or(OrderId::new(1), OrderId::next))
    }
}

// =============================================================================
// Views
// =============================================================================

/// Display row for one order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineView {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&OrderLine> for OrderLineView {
    fn from(line: &OrderLine) -> Self {
        Self {
            name: line.product_name.clone(),
            quantity: line.quantity,
            unit_price: Price::store(line.unit_price).to_string(),
            line_total: Price::store(line.line_total()).to_string(),
        }
    }
}

/// Display model for an order in history listings.
///
/// Everything comes from the stored record; current catalog prices play no
/// part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderView {
    pub order_id: OrderId,
    pub placed_on: String,
    pub status: &'static str,
    pub payment_method: String,
    pub ship_to: String,
    pub lines: Vec<OrderLineView>,
    pub total: String,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        let shipping = &order.shipping;
        Self {
            order_id: order.order_id,
            placed_on: order.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            status: order.status.label(),
            payment_method: order.payment_method.to_string(),
            ship_to: format!(
                "{}, {}, {}, {} {}, {}",
                shipping.full_name,
                shipping.address,
                shipping.city,
                shipping.state,
                shipping.zip_code,
                shipping.country
            ),
            lines: order.items.iter().map(OrderLineView::from).collect(),
            total: Price::store(order.total).to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::DateTime;
    use medmart_core::{OrderStatus, PaymentMethod, ProductId, ShippingAddress};
    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::MemoryStore;

    fn order(id: i32, unit_price: i64) -> Order {
        Order {
            order_id: OrderId::new(id),
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            items: vec![OrderLine {
                product_id: ProductId::new(1),
                product_name: "Paracetamol 500mg".to_string(),
                quantity: 2,
                unit_price: Decimal::from(unit_price),
            }],
            shipping: ShippingAddress {
                full_name: "Asha Rao".to_string(),
                address: "12 MG Road".to_string(),
                city: "Bengaluru".to_string(),
                state: "KA".to_string(),
                zip_code: "560001".to_string(),
                country: "India".to_string(),
            },
            payment_method: PaymentMethod::Upi,
            requires_prescription: false,
            status: OrderStatus::Confirmed,
            total: Decimal::from(unit_price * 2),
        }
    }

    #[test]
    fn test_missing_key_is_empty() {
        let history = OrderHistory::new(MemoryStore::new());
        assert!(history.list().unwrap().is_empty());
        assert_eq!(history.next_id().unwrap(), OrderId::new(1));
    }

    #[test]
    fn test_append_keeps_persisted_order() {
        let mut history = OrderHistory::new(MemoryStore::new());
        history.append(order(5, 25)).unwrap();
        history.append(order(2, 30)).unwrap();

        let ids: Vec<i32> = history
            .list()
            .unwrap()
            .iter()
            .map(|o| o.order_id.as_i32())
            .collect();
        assert_eq!(ids, vec![5, 2]);
        assert_eq!(history.next_id().unwrap(), OrderId::new(6));
    }

    #[test]
    fn test_append_rejects_repeated_id() {
        let mut history = OrderHistory::new(MemoryStore::new());
        history.append(order(4, 25)).unwrap();

        assert!(matches!(
            history.append(order(4, 30)),
            Err(StorageError::Conflict(_))
        ));
        assert_eq!(history.list().unwrap(), vec![order(4, 25)]);
    }

    #[test]
    fn test_find() {
        let mut history = OrderHistory::new(MemoryStore::new());
        history.append(order(1, 25)).unwrap();

        assert!(history.find(OrderId::new(1)).unwrap().is_some());
        assert!(history.find(OrderId::new(9)).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_list_is_an_error() {
        let mut store = MemoryStore::new();
        store.set(ORDERS_KEY, "{\"not\": \"a list\"}".to_string()).unwrap();

        let history = OrderHistory::new(store);
        assert!(matches!(
            history.list(),
            Err(StorageError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_view_uses_stored_prices() {
        let view = OrderView::from(&order(3, 25));
        assert_eq!(view.lines[0].unit_price, "₹25.00");
        assert_eq!(view.lines[0].line_total, "₹50.00");
        assert_eq!(view.total, "₹50.00");
        assert_eq!(view.placed_on, "2023-11-14 22:13 UTC");
        assert_eq!(view.status, "Confirmed");
        assert_eq!(view.ship_to, "Asha Rao, 12 MG Road, Bengaluru, KA 560001, India");
    }
}
