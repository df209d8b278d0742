//! External services used by the storefront.
//!
//! # Services
//!
//! - `order_api` - Order placement (HTTP client and offline fallback)

pub mod order_api;

pub use order_api::{OfflinePlacer, OrderClient, OrderPlacer, PlacementError, Placer};
