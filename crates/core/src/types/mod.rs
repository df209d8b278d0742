//! Core types for MedMart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;

pub use address::{AddressError, AddressField, ShippingAddress};
pub use id::*;
pub use order::{Order, OrderLine};
pub use price::{CurrencyCode, Price};
pub use product::Product;
pub use status::*;
