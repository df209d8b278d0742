//! Place an order from a YAML order file.
//!
//! # File format
//!
//! ```yaml
//! items:
//!   - product_id: 1
//!     quantity: 2
//!   - product_id: 3
//!     quantity: 1
//! address:
//!   full_name: Asha Rao
//!   address: 12 MG Road
//!   city: Bengaluru
//!   state: Karnataka
//!   zip_code: "560001"
//!   country: India
//! payment_method: upi
//! requires_prescription: false
//! ```

use std::path::Path;

use chrono::Utc;
use medmart_core::ProductId;
use medmart_storefront::error::add_breadcrumb;
use medmart_storefront::services::Placer;
use medmart_storefront::{AppError, Cart, Catalog, CheckoutForm, StorefrontConfig, submit};
use serde::Deserialize;
use tracing::info;

use super::open_history;

/// One requested line of an order file.
#[derive(Debug, Deserialize)]
pub struct OrderFileItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Parsed order file.
#[derive(Debug, Deserialize)]
pub struct OrderFile {
    pub items: Vec<OrderFileItem>,
    #[serde(flatten)]
    pub form: CheckoutForm,
}

impl OrderFile {
    /// Parse an order file.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the YAML is malformed.
    pub fn parse(content: &str) -> Result<Self, AppError> {
        serde_yaml::from_str(content)
            .map_err(|e| AppError::BadRequest(format!("invalid order file: {e}")))
    }
}

/// Fill a cart from order file lines.
///
/// # Errors
///
/// Returns `AppError::NotFound` for unknown products or `AppError::Cart` if
/// stock is insufficient.
pub fn build_cart(catalog: &Catalog, items: &[OrderFileItem]) -> Result<Cart, AppError> {
    let mut cart = Cart::new();
    for item in items {
        let product = catalog
            .get(item.product_id)
            .ok_or_else(|| AppError::NotFound(format!("product {}", item.product_id)))?;
        let quantity = cart.add(product, item.quantity)?;

        let product_id = item.product_id.to_string();
        let quantity = quantity.to_string();
        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[
                ("product_id", product_id.as_str()),
                ("quantity", quantity.as_str()),
            ]),
        );
    }
    Ok(cart)
}

/// Build the cart, show the summary and submit the order.
///
/// # Errors
///
/// Returns `AppError` if the file cannot be read, the cart cannot be built,
/// or checkout fails.
pub async fn run(config: &StorefrontConfig, path: &Path) -> Result<(), AppError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::BadRequest(format!("cannot read {}: {e}", path.display()))
    })?;
    let order_file = OrderFile::parse(&content)?;
    info!(path = %path.display(), lines = order_file.items.len(), "Loaded order file");

    let catalog = Catalog::seed();
    let mut cart = build_cart(&catalog, &order_file.items)?;

    for line in cart.lines() {
        info!("{} x {}", line.quantity, line.product.name);
    }
    let summary = config.pricing.summarize_cart(&cart);
    for (label, amount) in summary.display_lines() {
        info!("{label:<16} {amount:>10}");
    }
    if let Some(shortfall) = summary.free_delivery_shortfall {
        info!("Add {} more for free delivery", medmart_core::Price::store(shortfall));
    }

    let placer = Placer::from_config(config.order_api.as_ref())?;
    let mut history = open_history(config)?;

    let order = submit(
        &mut cart,
        &order_file.form,
        &mut history,
        &placer,
        &config.pricing,
        Utc::now(),
    )
    .await?;

    info!(order_id = %order.order_id, "Order placed successfully");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use medmart_core::PaymentMethod;
    use medmart_storefront::CartError;
    use rust_decimal::Decimal;

    use super::*;

    const ORDER: &str = r#"
items:
  - product_id: 1
    quantity: 2
  - product_id: 3
    quantity: 1
address:
  full_name: Asha Rao
  address: 12 MG Road
  city: Bengaluru
  state: Karnataka
  zip_code: "560001"
  country: India
payment_method: upi
"#;

    fn config(dir: &Path) -> StorefrontConfig {
        let data_file = dir.join("data.json").display().to_string();
        StorefrontConfig::from_vars(|key| (key == "MEDMART_DATA_FILE").then(|| data_file.clone()))
            .unwrap()
    }

    #[test]
    fn test_parse_order_file() {
        let file = OrderFile::parse(ORDER).unwrap();
        assert_eq!(file.items.len(), 2);
        assert_eq!(file.form.payment_method, PaymentMethod::Upi);
        assert_eq!(file.form.address.city, "Bengaluru");
        assert!(!file.form.requires_prescription);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(OrderFile::parse("items: 7"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_build_cart() {
        let file = OrderFile::parse(ORDER).unwrap();
        let cart = build_cart(&Catalog::seed(), &file.items).unwrap();
        assert_eq!(cart.total(), Decimal::from(230));
    }

    #[test]
    fn test_build_cart_errors() {
        let unknown = [OrderFileItem {
            product_id: ProductId::new(404),
            quantity: 1,
        }];
        assert!(matches!(
            build_cart(&Catalog::seed(), &unknown),
            Err(AppError::NotFound(_))
        ));

        let too_many = [OrderFileItem {
            product_id: ProductId::new(2),
            quantity: 76,
        }];
        assert!(matches!(
            build_cart(&Catalog::seed(), &too_many),
            Err(AppError::Cart(CartError::InsufficientStock { .. }))
        ));
    }

    #[tokio::test]
    async fn test_run_persists_offline_order() {
        let dir = tempfile::tempdir().unwrap();
        let order_path = dir.path().join("order.yaml");
        std::fs::write(&order_path, ORDER).unwrap();
        let config = config(dir.path());

        run(&config, &order_path).await.unwrap();

        let orders = open_history(&config).unwrap().list().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].total, Decimal::new(32140, 2));
    }

    #[tokio::test]
    async fn test_run_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&config(dir.path()), &dir.path().join("missing.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
