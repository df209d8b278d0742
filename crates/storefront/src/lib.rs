//! MedMart storefront library.
//!
//! Catalog browsing, the cart ledger, pricing, checkout, order history and
//! the admin dashboard. Front ends (the `medmart` CLI, tests) own the state
//! and call into these modules; nothing here is global.
//!
//! # Modules
//!
//! - [`catalog`] - Product list with filter, sort, search and pagination
//! - [`cart`] - Per-session cart with stock checks
//! - [`pricing`] - Tax, delivery fee and totals
//! - [`checkout`] - Validation, placement and persistence of orders
//! - [`orders`] - Order history over a key-value store
//! - [`dashboard`] - Revenue, order count, low stock and top sellers
//! - [`storage`] - Key-value store trait with memory and file backends
//! - [`services`] - Order placement client
//! - [`config`] - Environment configuration
//! - [`error`] - Unified error type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod orders;
pub mod pricing;
pub mod services;
pub mod storage;

pub use cart::{Cart, CartError, CartLine};
pub use catalog::Catalog;
pub use checkout::{CheckoutError, CheckoutForm, ValidationError, submit};
pub use config::{ConfigError, OrderApiConfig, StorefrontConfig};
pub use error::{AppError, Result};
pub use orders::{OrderHistory, OrderView};
pub use pricing::{PriceSummary, PricingRules};
pub use storage::{JsonFileStore, KvStore, MemoryStore, StorageError};
