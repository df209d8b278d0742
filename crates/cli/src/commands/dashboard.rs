//! Admin dashboard command.

use medmart_storefront::dashboard::DashboardSummary;
use medmart_storefront::{AppError, Catalog, StorefrontConfig};
use tracing::info;

use super::open_history;

/// Print revenue, order count, low stock and top sellers.
///
/// # Errors
///
/// Returns `AppError::Storage` if the store cannot be read.
pub fn show(config: &StorefrontConfig) -> Result<(), AppError> {
    let orders = open_history(config)?.list()?;
    let catalog = Catalog::seed();
    let summary = DashboardSummary::build(&orders, &catalog);

    info!("Total revenue: {}", summary.revenue_display());
    info!("Total orders:  {}", summary.total_orders);

    if summary.low_stock.is_empty() {
        info!("Low stock:     none");
    } else {
        info!("Low stock:");
        for product in &summary.low_stock {
            info!("  #{} {} ({} left)", product.id, product.name, product.stock);
        }
    }

    if summary.top_selling.is_empty() {
        info!("Top selling:   no sales yet");
    } else {
        info!("Top selling:");
        for (rank, seller) in summary.top_selling.iter().enumerate() {
            info!(
                "  {}. {} - {} sold",
                rank + 1,
                seller.product.name,
                seller.units_sold
            );
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_on_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let data_file = dir.path().join("data.json").display().to_string();
        let config =
            StorefrontConfig::from_vars(|key| (key == "MEDMART_DATA_FILE").then(|| data_file.clone()))
                .unwrap();

        show(&config).unwrap();
    }
}
