//! Integration tests for MedMart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p medmart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_query` - Filter, search, sort and pagination over the seed catalog
//! - `cart_ledger` - Cart totals and stock policy
//! - `checkout_flow` - Checkout through persistence, history and dashboard
//!
//! Shared fixtures live here so each test file stays focused on behavior.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use medmart_core::{OrderId, PaymentMethod, ShippingAddress};
use medmart_storefront::services::order_api::{
    OrderPlacer, PlaceOrderRequest, PlacementError, PlacementReceipt,
};
use medmart_storefront::{CheckoutForm, JsonFileStore, OrderHistory, StorageError};
use tempfile::TempDir;

/// A complete, valid shipping address.
#[must_use]
pub fn shipping_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Asha Rao".to_string(),
        address: "12 MG Road".to_string(),
        city: "Bengaluru".to_string(),
        state: "Karnataka".to_string(),
        zip_code: "560001".to_string(),
        country: "India".to_string(),
    }
}

/// A valid checkout form paying cash on delivery.
#[must_use]
pub fn checkout_form() -> CheckoutForm {
    CheckoutForm {
        address: shipping_address(),
        payment_method: PaymentMethod::Cod,
        requires_prescription: false,
    }
}

/// Fixed timestamp for deterministic orders (2023-11-14 22:13:20 UTC).
#[must_use]
pub fn placed_at() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
}

/// A temporary data directory with a JSON file store inside.
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    /// Create an empty temporary store.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the temp directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Path of the backing JSON file.
    #[must_use]
    pub fn path(&self) -> std::path::PathBuf {
        self.dir.path().join("medmart-data.json")
    }

    /// Open a fresh history handle over the file, as a new process would.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file cannot be read.
    pub fn history(&self) -> Result<OrderHistory<JsonFileStore>, StorageError> {
        Ok(OrderHistory::new(JsonFileStore::open(self.path())?))
    }
}

/// Placer that accepts orders, optionally assigning ids, and counts calls.
#[derive(Debug, Default)]
pub struct CountingPlacer {
    assign_from: Option<i32>,
    calls: AtomicUsize,
}

impl CountingPlacer {
    /// Accept orders without assigning ids.
    #[must_use]
    pub fn offline() -> Self {
        Self::default()
    }

    /// Accept orders, assigning ids starting at `first`.
    #[must_use]
    pub fn assigning(first: i32) -> Self {
        Self {
            assign_from: Some(first),
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OrderPlacer for CountingPlacer {
    async fn place(&self, _request: &PlaceOrderRequest) -> Result<PlacementReceipt, PlacementError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let order_id = self.assign_from.map(|first| {
            OrderId::new(first.saturating_add(i32::try_from(call).unwrap_or(i32::MAX)))
        });
        Ok(PlacementReceipt {
            order_id,
            status: Some("confirmed".to_string()),
        })
    }
}

/// Placer that always rejects with the given message.
#[derive(Debug)]
pub struct RejectingPlacer {
    pub message: String,
}

impl OrderPlacer for RejectingPlacer {
    async fn place(&self, _request: &PlaceOrderRequest) -> Result<PlacementReceipt, PlacementError> {
        Err(PlacementError::Rejected {
            status: 422,
            message: self.message.clone(),
        })
    }
}
