//! Subcommand implementations.

pub mod catalog;
pub mod checkout;
pub mod dashboard;
pub mod orders;

use medmart_storefront::{JsonFileStore, OrderHistory, StorefrontConfig, StorageError};

/// Open the order history at the configured data file.
fn open_history(config: &StorefrontConfig) -> Result<OrderHistory<JsonFileStore>, StorageError> {
    Ok(OrderHistory::new(JsonFileStore::open(&config.data_file)?))
}
