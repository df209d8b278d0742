//! Order placement.
//!
//! Checkout hands a [`PlaceOrderRequest`] to an [`OrderPlacer`]. The HTTP
//! implementation POSTs it as JSON to the configured endpoint; the offline
//! implementation accepts everything locally.

use std::future::Future;

use medmart_core::{OrderId, PaymentMethod, ProductId, ShippingAddress};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::cart::Cart;
use crate::config::OrderApiConfig;

/// Message used when the service rejects an order without saying why.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to place order";

/// Errors that can occur when placing an order.
#[derive(Debug, Error)]
pub enum PlacementError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Failed to parse a success response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// One requested line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Body of an order placement request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub items: Vec<RequestItem>,
    pub address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub requires_prescription: bool,
}

impl PlaceOrderRequest {
    /// Build a request from the cart's current lines.
    #[must_use]
    pub fn from_cart(
        cart: &Cart,
        address: ShippingAddress,
        payment_method: PaymentMethod,
        requires_prescription: bool,
    ) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| RequestItem {
                    product_id: line.product.id,
                    quantity: line.quantity,
                })
                .collect(),
            address,
            payment_method,
            requires_prescription,
        }
    }
}

/// What the order service returned for an accepted order.
///
/// Any 2xx response is an accepted order, so the fields are read leniently:
/// the status is whatever string the service reports.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PlacementReceipt {
    /// Id assigned by the service, if it assigns ids.
    #[serde(default)]
    pub order_id: Option<OrderId>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Submits orders somewhere.
pub trait OrderPlacer {
    /// Place an order. Called once per submission; never retried.
    fn place(
        &self,
        request: &PlaceOrderRequest,
    ) -> impl Future<Output = Result<PlacementReceipt, PlacementError>> + Send;
}

/// Placer used when no order endpoint is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflinePlacer;

impl OrderPlacer for OfflinePlacer {
    async fn place(&self, request: &PlaceOrderRequest) -> Result<PlacementReceipt, PlacementError> {
        tracing::debug!(items = request.items.len(), "Order accepted offline");
        Ok(PlacementReceipt::default())
    }
}

/// HTTP client for the remote order service.
#[derive(Debug, Clone)]
pub struct OrderClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl OrderClient {
    /// Create a new order service client.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &OrderApiConfig) -> Result<Self, PlacementError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.api_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| PlacementError::Parse(format!("Invalid API token format: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl OrderPlacer for OrderClient {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint, items = request.items.len()))]
    async fn place(&self, request: &PlaceOrderRequest) -> Result<PlacementReceipt, PlacementError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = rejection_message(&body);
            tracing::warn!(status = status.as_u16(), %message, "Order service rejected order");
            return Err(PlacementError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.unwrap_or_default();
        let receipt = parse_receipt(&body);
        tracing::info!(
            order_id = ?receipt.order_id,
            status = receipt.status.as_deref().unwrap_or("unknown"),
            "Order placed"
        );
        Ok(receipt)
    }
}

/// The placer selected by configuration.
#[derive(Debug, Clone)]
pub enum Placer {
    Remote(OrderClient),
    Offline(OfflinePlacer),
}

impl Placer {
    /// Remote when an endpoint is configured, offline otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn from_config(config: Option<&OrderApiConfig>) -> Result<Self, PlacementError> {
        match config {
            Some(config) => Ok(Self::Remote(OrderClient::new(config)?)),
            None => {
                tracing::info!("No order endpoint configured, placing orders offline");
                Ok(Self::Offline(OfflinePlacer))
            }
        }
    }
}

impl OrderPlacer for Placer {
    async fn place(&self, request: &PlaceOrderRequest) -> Result<PlacementReceipt, PlacementError> {
        match self {
            Self::Remote(client) => client.place(request).await,
            Self::Offline(offline) => offline.place(request).await,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Message from a failure body's `error` field, or the default message.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string())
}

/// Parse a success body.
///
/// The order already exists remotely, so a body that cannot be read is still
/// an accepted order, just without a service-assigned id.
fn parse_receipt(body: &str) -> PlacementReceipt {
    if body.trim().is_empty() {
        return PlacementReceipt::default();
    }
    serde_json::from_str(body).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Unreadable order service receipt, using local id");
        PlacementReceipt::default()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn request() -> PlaceOrderRequest {
        PlaceOrderRequest {
            items: vec![RequestItem {
                product_id: ProductId::new(1),
                quantity: 2,
            }],
            address: ShippingAddress {
                full_name: "Asha Rao".to_string(),
                address: "12 MG Road".to_string(),
                city: "Bengaluru".to_string(),
                state: "KA".to_string(),
                zip_code: "560001".to_string(),
                country: "India".to_string(),
            },
            payment_method: PaymentMethod::Cod,
            requires_prescription: false,
        }
    }

    fn config(endpoint: &str, token: Option<&str>) -> OrderApiConfig {
        OrderApiConfig {
            endpoint: Url::parse(endpoint).unwrap(),
            api_token: token.map(SecretString::from),
            timeout: Duration::from_secs(5),
        }
    }

    /// Accept one connection, answer with `status` and `body`, and hand back
    /// the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/orders", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0_u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(split) = text.find("\r\n\r\n") {
                    let content_length = text[..split]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= split + 4 + content_length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&raw).to_string()
        });

        (url, handle)
    }

    #[test]
    fn test_request_wire_shape() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "items": [{"product_id": 1, "quantity": 2}],
                "address": {
                    "full_name": "Asha Rao",
                    "address": "12 MG Road",
                    "city": "Bengaluru",
                    "state": "KA",
                    "zip_code": "560001",
                    "country": "India"
                },
                "payment_method": "cod",
                "requires_prescription": false
            })
        );
    }

    #[test]
    fn test_rejection_message() {
        assert_eq!(rejection_message(r#"{"error": "Out of stock"}"#), "Out of stock");
        assert_eq!(rejection_message(r#"{"detail": "nope"}"#), DEFAULT_FAILURE_MESSAGE);
        assert_eq!(rejection_message("<html>502</html>"), DEFAULT_FAILURE_MESSAGE);
        assert_eq!(rejection_message(""), DEFAULT_FAILURE_MESSAGE);
    }

    #[test]
    fn test_parse_receipt() {
        let receipt = parse_receipt(r#"{"order_id": 7, "status": "confirmed", "eta": "2d"}"#);
        assert_eq!(receipt.order_id, Some(OrderId::new(7)));
        assert_eq!(receipt.status.as_deref(), Some("confirmed"));

        assert_eq!(parse_receipt(""), PlacementReceipt::default());
        assert_eq!(parse_receipt("[1"), PlacementReceipt::default());
    }

    #[test]
    fn test_parse_receipt_accepts_unrecognised_status() {
        let receipt = parse_receipt(r#"{"order_id": 12, "status": "placed"}"#);
        assert_eq!(receipt.order_id, Some(OrderId::new(12)));
        assert_eq!(receipt.status.as_deref(), Some("placed"));
    }

    #[tokio::test]
    async fn test_offline_placer_accepts() {
        let receipt = OfflinePlacer.place(&request()).await.unwrap();
        assert_eq!(receipt, PlacementReceipt::default());
    }

    #[test]
    fn test_placer_from_config() {
        assert!(matches!(Placer::from_config(None).unwrap(), Placer::Offline(_)));

        let config = config("https://orders.medmart.test/api", None);
        let Placer::Remote(client) = Placer::from_config(Some(&config)).unwrap() else {
            panic!("expected remote placer");
        };
        assert_eq!(client.endpoint().host_str(), Some("orders.medmart.test"));
    }

    #[tokio::test]
    async fn test_client_posts_json_with_token() {
        let (url, server) = serve_once("200 OK", r#"{"order_id": 42, "status": "confirmed"}"#).await;
        let client = OrderClient::new(&config(&url, Some("tok_123"))).unwrap();

        let receipt = client.place(&request()).await.unwrap();
        assert_eq!(receipt.order_id, Some(OrderId::new(42)));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /orders "));
        assert!(raw.to_lowercase().contains("authorization: bearer tok_123"));
        assert!(raw.contains(r#""product_id":1"#));
    }

    #[tokio::test]
    async fn test_client_accepts_any_success_body() {
        let (url, _server) = serve_once("201 Created", r#"{"order_id": 12, "status": "placed"}"#).await;
        let client = OrderClient::new(&config(&url, None)).unwrap();

        let receipt = client.place(&request()).await.unwrap();
        assert_eq!(receipt.order_id, Some(OrderId::new(12)));
        assert_eq!(receipt.status.as_deref(), Some("placed"));
    }

    #[tokio::test]
    async fn test_client_surfaces_error_field() {
        let (url, server) = serve_once("422 Unprocessable Entity", r#"{"error": "Prescription required"}"#).await;
        let client = OrderClient::new(&config(&url, None)).unwrap();

        let err = client.place(&request()).await.unwrap_err();
        assert!(matches!(err, PlacementError::Rejected { status: 422, .. }));
        assert_eq!(err.to_string(), "Prescription required");

        let raw = server.await.unwrap();
        assert!(!raw.to_lowercase().contains("authorization:"));
    }

    #[tokio::test]
    async fn test_client_default_failure_message() {
        let (url, _server) = serve_once("500 Internal Server Error", "{}").await;
        let client = OrderClient::new(&config(&url, None)).unwrap();

        let err = client.place(&request()).await.unwrap_err();
        assert_eq!(err.to_string(), DEFAULT_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_client_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = OrderClient::new(&config(&format!("http://{addr}/orders"), None)).unwrap();
        let err = client.place(&request()).await.unwrap_err();
        assert!(matches!(err, PlacementError::Http(_)));
    }
}
