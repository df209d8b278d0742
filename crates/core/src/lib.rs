//! MedMart Core - Shared domain types.
//!
//! This crate provides the types used across all MedMart components:
//! - `storefront` - Catalog, cart, checkout and order history logic
//! - `cli` - Command-line front end for operators
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, products, orders, addresses and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
