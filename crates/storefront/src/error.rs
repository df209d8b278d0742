//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for front ends. Call
//! [`AppError::report`] once at the boundary, then show
//! [`AppError::user_message`] to the customer.

use thiserror::Error;

use crate::cart::CartError;
use crate::checkout::{CheckoutError, ValidationError};
use crate::config::ConfigError;
use crate::services::order_api::PlacementError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A cart change was refused.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout input was incomplete.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The order service could not place the order.
    #[error("Placement error: {0}")]
    Placement(#[from] PlacementError),

    /// Persistence failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Validation(e) => Self::Validation(e),
            CheckoutError::Placement(e) => Self::Placement(e),
            CheckoutError::Storage(e) => Self::Storage(e),
        }
    }
}

impl AppError {
    /// Whether this is a fault on our side rather than a user mistake.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Storage(_)
                | Self::Placement(PlacementError::Http(_) | PlacementError::Parse(_))
        )
    }

    /// Capture internal faults to Sentry and log them.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::warn!(error = %self, "Request refused");
        }
    }

    /// Message safe to show the customer.
    ///
    /// Transport and storage details are hidden; validation, cart and
    /// order-service messages pass through.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(_) => "The store is not configured correctly".to_string(),
            Self::Cart(err) => err.to_string(),
            Self::Validation(err) => err.to_string(),
            Self::Placement(PlacementError::Rejected { message, .. }) => message.clone(),
            Self::Placement(_) => "Could not reach the order service".to_string(),
            Self::Storage(_) => "Could not save your order".to_string(),
            Self::NotFound(_) | Self::BadRequest(_) => self.to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
