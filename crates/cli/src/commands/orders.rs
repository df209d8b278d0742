//! Order history commands.

use medmart_core::OrderId;
use medmart_storefront::{AppError, OrderView, StorefrontConfig};
use tracing::info;

use super::open_history;

fn print_order(view: &OrderView) {
    info!(
        "Order #{} - {} - {} - {}",
        view.order_id, view.placed_on, view.status, view.total
    );
    for line in &view.lines {
        info!(
            "  {} x {} @ {} = {}",
            line.quantity, line.name, line.unit_price, line.line_total
        );
    }
}

/// List all orders in the order they were placed.
///
/// # Errors
///
/// Returns `AppError::Storage` if the store cannot be read.
pub fn list(config: &StorefrontConfig) -> Result<(), AppError> {
    let orders = open_history(config)?.list()?;
    if orders.is_empty() {
        info!("No orders yet");
        return Ok(());
    }

    info!("{} orders", orders.len());
    for order in &orders {
        print_order(&OrderView::from(order));
    }
    Ok(())
}

/// Show one order with its shipping details.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no such order exists, or
/// `AppError::Storage` if the store cannot be read.
pub fn show(config: &StorefrontConfig, id: OrderId) -> Result<(), AppError> {
    let order = open_history(config)?
        .find(id)?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let view = OrderView::from(&order);
    print_order(&view);
    info!("  Ship to: {}", view.ship_to);
    info!("  Payment: {}", view.payment_method);
    if order.requires_prescription {
        info!("  Prescription required");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use chrono::DateTime;
    use medmart_core::{Order, OrderLine, OrderStatus, PaymentMethod, ProductId, ShippingAddress};
    use rust_decimal::Decimal;

    use super::*;

    fn config(dir: &Path) -> StorefrontConfig {
        let data_file = dir.join("data.json").display().to_string();
        StorefrontConfig::from_vars(|key| (key == "MEDMART_DATA_FILE").then(|| data_file.clone()))
            .unwrap()
    }

    fn order(id: i32) -> Order {
        Order {
            order_id: OrderId::new(id),
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            items: vec![OrderLine {
                product_id: ProductId::new(5),
                product_name: "Cetirizine 10mg".to_string(),
                quantity: 1,
                unit_price: Decimal::from(45),
            }],
            shipping: ShippingAddress::default(),
            payment_method: PaymentMethod::Card,
            requires_prescription: false,
            status: OrderStatus::Confirmed,
            total: Decimal::new(10310, 2),
        }
    }

    #[test]
    fn test_list_and_show() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());

        list(&config).unwrap();

        open_history(&config).unwrap().append(order(1)).unwrap();
        list(&config).unwrap();
        show(&config, OrderId::new(1)).unwrap();
        assert!(matches!(
            show(&config, OrderId::new(2)),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_corrupt_store_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        std::fs::write(&config.data_file, r#"{"orders": "oops"}"#).unwrap();

        assert!(matches!(list(&config), Err(AppError::Storage(_))));
    }
}
