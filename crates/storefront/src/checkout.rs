//! Checkout: turn the cart into a placed, persisted order.
//!
//! Submission runs validate, place, persist, clear in that order. Nothing is
//! retried. A validation or placement failure leaves the cart and the order
//! history untouched; a storage failure after placement leaves the cart
//! intact so the customer still sees what they ordered.

use chrono::{DateTime, Utc};
use medmart_core::{
    AddressError, Order, OrderLine, OrderStatus, PaymentMethod, ShippingAddress,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::cart::Cart;
use crate::orders::OrderHistory;
use crate::pricing::PricingRules;
use crate::services::order_api::{OrderPlacer, PlaceOrderRequest, PlacementError};
use crate::storage::{KvStore, StorageError};

/// Problems with the submission itself, reported before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("your cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Address(#[from] AddressError),
}

/// Errors from [`submit`].
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("order placement failed: {0}")]
    Placement(#[from] PlacementError),

    #[error("order could not be saved: {0}")]
    Storage(#[from] StorageError),
}

/// Shipping and payment details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub address: ShippingAddress,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Customer confirms they hold a prescription.
    #[serde(default)]
    pub requires_prescription: bool,
}

impl CheckoutForm {
    /// Check the form against the cart it will be submitted with.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCart`] for an empty cart, otherwise
    /// [`ValidationError::Address`] listing every missing address field.
    pub fn validate(&self, cart: &Cart) -> Result<(), ValidationError> {
        if cart.is_empty() {
            return Err(ValidationError::EmptyCart);
        }
        self.address.validate()?;
        Ok(())
    }
}

/// Submit the cart as an order.
///
/// On success the order is appended to `history`, the cart is cleared and
/// the stored order is returned. The order id comes from the placer's
/// receipt when it assigns one, otherwise from the local sequence.
///
/// # Errors
///
/// Returns [`CheckoutError::Validation`] if the cart is empty or the address
/// is incomplete, [`CheckoutError::Placement`] if the order service fails,
/// or [`CheckoutError::Storage`] if the order cannot be saved.
#[instrument(skip_all, fields(lines = cart.len(), payment_method = %form.payment_method))]
pub async fn submit<S, P>(
    cart: &mut Cart,
    form: &CheckoutForm,
    history: &mut OrderHistory<S>,
    placer: &P,
    rules: &PricingRules,
    placed_at: DateTime<Utc>,
) -> Result<Order, CheckoutError>
where
    S: KvStore,
    P: OrderPlacer,
{
    form.validate(cart)?;

    let address = form.address.trimmed();
    let requires_prescription = form.requires_prescription || cart.requires_prescription();
    let request = PlaceOrderRequest::from_cart(
        cart,
        address.clone(),
        form.payment_method,
        requires_prescription,
    );

    let receipt = placer.place(&request).await.inspect_err(|e| {
        tracing::error!(error = %e, "Order placement failed");
    })?;

    // Service ids can overlap ids assigned while offline; the remote order
    // exists either way, so keep it under a fresh local id.
    let order_id = match receipt.order_id {
        Some(id) if history.find(id)?.is_none() => id,
        Some(id) => {
            let local = history.next_id()?;
            tracing::warn!(service_id = %id, order_id = %local, "Service order id already in history");
            local
        }
        None => history.next_id()?,
    };

    let order = Order {
        order_id,
        created_at: placed_at,
        items: snapshot(cart),
        shipping: address,
        payment_method: form.payment_method,
        requires_prescription,
        status: OrderStatus::Confirmed,
        total: rules.summarize_cart(cart).total,
    };

    history.append(order.clone()).inspect_err(|e| {
        tracing::error!(error = %e, order_id = %order.order_id, "Failed to save placed order");
    })?;

    cart.clear();
    tracing::info!(order_id = %order.order_id, total = %order.total, "Checkout complete");
    Ok(order)
}

/// Copy cart lines into order lines at current prices.
fn snapshot(cart: &Cart) -> Vec<OrderLine> {
    cart.lines()
        .iter()
        .map(|line| OrderLine {
            product_id: line.product.id,
            product_name: line.product.name.clone(),
            quantity: line.quantity,
            unit_price: line.product.price,
        })
        .collect()
}
