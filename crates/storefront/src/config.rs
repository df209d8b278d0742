//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MEDMART_DATA_FILE` - JSON store path (default: medmart-data.json)
//! - `MEDMART_ORDER_ENDPOINT` - Order placement URL; orders are placed
//!   offline when unset
//! - `MEDMART_ORDER_API_TOKEN` - Bearer token sent to the order endpoint
//! - `MEDMART_ORDER_TIMEOUT_SECS` - Request timeout (default: 10)
//! - `MEDMART_TAX_RATE` - Tax rate as a fraction (default: 0.18)
//! - `MEDMART_FREE_DELIVERY_THRESHOLD` - Subtotal for free delivery (default: 500)
//! - `MEDMART_DELIVERY_FEE` - Delivery fee below the threshold (default: 50)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

use crate::pricing::PricingRules;

const DEFAULT_DATA_FILE: &str = "medmart-data.json";
const DEFAULT_TIMEOUT_SECS: &str = "10";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "example",
    "placeholder",
    "xxx",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Path of the JSON key-value store
    pub data_file: PathBuf,
    /// Remote order service; `None` places orders offline
    pub order_api: Option<OrderApiConfig>,
    /// Tax and delivery rules
    pub pricing: PricingRules,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Remote order service configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct OrderApiConfig {
    /// Endpoint orders are POSTed to
    pub endpoint: Url,
    /// Optional bearer token
    pub api_token: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for OrderApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderApiConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value or the
    /// API token looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_file = PathBuf::from(get_env_or_default(&vars, "MEDMART_DATA_FILE", DEFAULT_DATA_FILE));
        let order_api = OrderApiConfig::from_vars(&vars)?;
        let pricing = pricing_from_vars(&vars)?;
        let sentry_dsn = get_optional_env(&vars, "SENTRY_DSN");

        Ok(Self {
            data_file,
            order_api,
            pricing,
            sentry_dsn,
        })
    }
}

impl OrderApiConfig {
    fn from_vars(vars: &impl Fn(&str) -> Option<String>) -> Result<Option<Self>, ConfigError> {
        let timeout_secs = get_env_or_default(vars, "MEDMART_ORDER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("MEDMART_ORDER_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "MEDMART_ORDER_TIMEOUT_SECS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let Some(endpoint) = get_optional_env(vars, "MEDMART_ORDER_ENDPOINT") else {
            return Ok(None);
        };
        let endpoint = Url::parse(&endpoint).map_err(|e| {
            ConfigError::InvalidEnvVar("MEDMART_ORDER_ENDPOINT".to_string(), e.to_string())
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "MEDMART_ORDER_ENDPOINT".to_string(),
                format!("unsupported scheme '{}'", endpoint.scheme()),
            ));
        }

        let api_token = get_optional_env(vars, "MEDMART_ORDER_API_TOKEN")
            .map(SecretString::from)
            .map(|token| validate_token(&token, "MEDMART_ORDER_API_TOKEN").map(|()| token))
            .transpose()?;

        Ok(Some(Self {
            endpoint,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
        }))
    }
}

fn pricing_from_vars(vars: &impl Fn(&str) -> Option<String>) -> Result<PricingRules, ConfigError> {
    let defaults = PricingRules::default();

    let tax_rate = get_decimal(vars, "MEDMART_TAX_RATE")?.unwrap_or(defaults.tax_rate);
    if tax_rate > Decimal::ONE {
        return Err(ConfigError::InvalidEnvVar(
            "MEDMART_TAX_RATE".to_string(),
            "must be a fraction between 0 and 1".to_string(),
        ));
    }

    Ok(PricingRules {
        tax_rate,
        free_delivery_threshold: get_decimal(vars, "MEDMART_FREE_DELIVERY_THRESHOLD")?
            .unwrap_or(defaults.free_delivery_threshold),
        delivery_fee: get_decimal(vars, "MEDMART_DELIVERY_FEE")?
            .unwrap_or(defaults.delivery_fee),
    })
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating blank values as unset.
fn get_optional_env(vars: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    vars(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Get a variable with a default value.
fn get_env_or_default(vars: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get_optional_env(vars, key).unwrap_or_else(|| default.to_string())
}

/// Get an optional non-negative decimal.
fn get_decimal(vars: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<Decimal>, ConfigError> {
    let Some(raw) = get_optional_env(vars, key) else {
        return Ok(None);
    };
    let value = Decimal::from_str(&raw)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if value.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(Some(value))
}

/// Reject tokens that are obviously copied from a template.
fn validate_token(token: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let lower = token.expose_secret().to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(**p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("contains placeholder text '{pattern}'"),
        ));
    }
    Ok(())
}
