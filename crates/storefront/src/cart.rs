//! Cart ledger.
//!
//! A [`Cart`] maps products to quantities for the current session. It is an
//! explicit value owned by the caller and passed by reference to whatever
//! handles user actions; there is no global cart.
//!
//! # Stock policy
//!
//! - Adding a product with zero stock fails with [`CartError::OutOfStock`].
//! - Any change that would push a line above the product's stock fails with
//!   [`CartError::InsufficientStock`].
//!
//! In both cases the cart is left exactly as it was.

use medmart_core::{Product, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from cart mutations. The cart is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The product has no stock at all.
    #[error("{name} is out of stock")]
    OutOfStock { product_id: ProductId, name: String },

    /// The requested quantity exceeds available stock.
    #[error("only {available} of {name} available (requested {requested})")]
    InsufficientStock {
        product_id: ProductId,
        name: String,
        available: u32,
        requested: u64,
    },

    /// A quantity was set for a product that is not in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),
}

/// One cart entry: a product snapshot and a quantity of at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// The session's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    ///
    /// Adding zero units is a no-op. Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutOfStock`] if the product has no stock, or
    /// [`CartError::InsufficientStock`] if the resulting quantity would
    /// exceed it.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<u32, CartError> {
        if product.stock == 0 {
            return Err(CartError::OutOfStock {
                product_id: product.id,
                name: product.name.clone(),
            });
        }

        let current = self.quantity_of(product.id);
        if quantity == 0 {
            return Ok(current);
        }

        let requested = u64::from(current) + u64::from(quantity);
        let new_quantity = check_stock(product, requested)?;

        match self.line_mut(product.id) {
            Some(line) => line.quantity = new_quantity,
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: new_quantity,
            }),
        }

        tracing::debug!(product_id = %product.id, quantity = new_quantity, "Cart line added");
        Ok(new_quantity)
    }

    /// Overwrite a line's quantity. Zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if `quantity > 0` and the product has
    /// no line, or [`CartError::InsufficientStock`] if `quantity` exceeds the
    /// product's stock.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> Result<(), CartError> {
        let Ok(requested) = u64::try_from(quantity) else {
            self.remove(product_id);
            return Ok(());
        };
        if requested == 0 {
            self.remove(product_id);
            return Ok(());
        }

        let line = self
            .line_mut(product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        line.quantity = check_stock(&line.product, requested)?;
        Ok(())
    }

    /// Remove a product's line. No-op if absent.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product.id != product_id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of unit price times quantity over every line.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities, for the cart badge.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line(product_id).is_some()
    }

    /// Quantity held for a product, zero if absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.line(product_id).map_or(0, |line| line.quantity)
    }

    /// Whether any line needs a prescription.
    #[must_use]
    pub fn requires_prescription(&self) -> bool {
        self.lines
            .iter()
            .any(|line| line.product.requires_prescription)
    }

    fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
    }
}

fn check_stock(product: &Product, requested: u64) -> Result<u32, CartError> {
    match u32::try_from(requested) {
        Ok(quantity) if quantity <= product.stock => Ok(quantity),
        _ => Err(CartError::InsufficientStock {
            product_id: product.id,
            name: product.name.clone(),
            available: product.stock,
            requested,
        }),
    }
}
