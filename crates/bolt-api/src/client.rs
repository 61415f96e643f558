//! # API Client
//!
//! HTTP client for the register server.
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Lookup Flow                                  │
//! │                                                                         │
//! │  barcode "8901030" (typed or decoded from a camera frame)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET {base_url}/api/scan-product/8901030                                │
//! │       │                                                                 │
//! │       ├── 200 { id, name, price: 20.0, stock: 5 }                       │
//! │       │        │                                                        │
//! │       │        ▼  decimal price → Money (minor units)                   │
//! │       │   Product { id, name, price_minor: 2000, stock: 5 }             │
//! │       │                                                                 │
//! │       ├── 404 { error } ────────────► ApiError::NotFound                │
//! │       ├── other non-200 ────────────► ApiError::Application             │
//! │       └── request never completed ──► ApiError::Transport               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use bolt_core::{Money, Product, TransactionRequest};

use crate::error::{ApiError, ApiResult};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the register server (no trailing slash needed).
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://localhost:5000".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

// =============================================================================
// Wire Payloads
// =============================================================================

/// Product payload as the server sends it (decimal price).
#[derive(Debug, Deserialize)]
struct ProductPayload {
    id: i64,
    name: String,
    price: f64,
    stock: i64,
}

impl From<ProductPayload> for Product {
    fn from(p: ProductPayload) -> Self {
        Product {
            id: p.id,
            name: p.name,
            // The only place a decimal price crosses into integer money
            price_minor: Money::from_decimal(p.price).minor(),
            stock: p.stock,
        }
    }
}

/// Error body the server attaches to non-200 responses.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: Option<String>,
}

/// The server issues integer transaction ids, but the contract only promises
/// "an identifier" - accept either shape and normalize to a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TransactionId {
    Number(i64),
    Text(String),
}

impl TransactionId {
    fn into_string(self) -> String {
        match self {
            TransactionId::Number(n) => n.to_string(),
            TransactionId::Text(s) => s,
        }
    }
}

/// Transaction outcome as the server sends it.
#[derive(Debug, Deserialize)]
struct TransactionOutcome {
    success: bool,
    #[serde(default)]
    transaction_id: Option<TransactionId>,
    #[serde(default)]
    error: Option<String>,
}

/// A successfully completed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Server-issued identifier, shown to the cashier on the confirmation.
    pub transaction_id: String,
}

// =============================================================================
// Api Client
// =============================================================================

/// Typed client for the register server API.
///
/// ## Usage
/// ```rust,ignore
/// let client = ApiClient::new(ClientConfig::default())?;
/// let product = client.lookup_product("8901030").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(ApiClient { config, http })
    }

    /// Resolves a barcode to a product.
    ///
    /// ## Returns
    /// - `Ok(Product)` on a 200 response
    /// - `ApiError::NotFound` on 404 (barcode unmatched)
    /// - `ApiError::Application` on any other non-200 body
    /// - `ApiError::Transport` when the request never completed
    pub async fn lookup_product(&self, barcode: &str) -> ApiResult<Product> {
        let url = format!("{}/api/scan-product/{}", self.base(), barcode);
        debug!(barcode = %barcode, "lookup_product request");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            let payload: ProductPayload = decode(response).await?;
            let product = Product::from(payload);
            info!(barcode = %barcode, product_id = product.id, name = %product.name, "product resolved");
            return Ok(product);
        }

        let message = error_message(response).await;
        warn!(barcode = %barcode, status = %status, message = %message, "lookup_product failed");

        if status == reqwest::StatusCode::NOT_FOUND {
            Err(ApiError::NotFound {
                barcode: barcode.to_string(),
            })
        } else {
            Err(ApiError::Application { message })
        }
    }

    /// Submits a finished transaction.
    ///
    /// ## Returns
    /// - `Ok(TransactionReceipt)` when the server reports `success: true`
    /// - `ApiError::Application` on `success: false` or a non-200 response
    /// - `ApiError::Transport` when the request never completed
    ///
    /// The caller keeps the cart on every error path so the cashier can
    /// retry without re-entering items.
    pub async fn complete_transaction(
        &self,
        request: &TransactionRequest,
    ) -> ApiResult<TransactionReceipt> {
        let url = format!("{}/api/complete-transaction", self.base());
        debug!(
            items = request.items.len(),
            total = request.total,
            payment_method = %request.payment_method,
            "complete_transaction request"
        );

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = error_message(response).await;
            warn!(status = %status, message = %message, "complete_transaction rejected");
            return Err(ApiError::Application { message });
        }

        let outcome: TransactionOutcome = decode(response).await?;
        if !outcome.success {
            let message = outcome
                .error
                .unwrap_or_else(|| "Transaction failed".to_string());
            warn!(message = %message, "complete_transaction unsuccessful");
            return Err(ApiError::Application { message });
        }

        let transaction_id = outcome
            .transaction_id
            .map(TransactionId::into_string)
            .ok_or_else(|| ApiError::Decode("missing transaction_id".to_string()))?;

        info!(transaction_id = %transaction_id, "transaction completed");
        Ok(TransactionReceipt { transaction_id })
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }
}

/// Decodes a JSON body, separating contract violations from transport loss.
async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Extracts the `{error}` message from a non-200 body, with a fallback.
async fn error_message(response: reqwest::Response) -> String {
    match response.json::<ErrorPayload>().await {
        Ok(ErrorPayload { error: Some(msg) }) => msg,
        _ => "Product not found".to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bolt_core::PaymentMethod;

    #[test]
    fn test_product_payload_converts_decimal_price() {
        let payload: ProductPayload =
            serde_json::from_str(r#"{"id": 1, "name": "Soap", "price": 20.0, "stock": 5}"#)
                .unwrap();
        let product = Product::from(payload);

        assert_eq!(product.id, 1);
        assert_eq!(product.price_minor, 2000);
        assert_eq!(product.stock, 5);
    }

    #[test]
    fn test_product_payload_rounds_fractional_price() {
        let payload: ProductPayload =
            serde_json::from_str(r#"{"id": 2, "name": "Tea", "price": 15.555, "stock": 3}"#)
                .unwrap();
        assert_eq!(Product::from(payload).price_minor, 1556);
    }

    #[test]
    fn test_transaction_outcome_with_numeric_id() {
        let outcome: TransactionOutcome =
            serde_json::from_str(r#"{"success": true, "transaction_id": 42}"#).unwrap();
        assert!(outcome.success);
        assert_eq!(
            outcome.transaction_id.unwrap().into_string(),
            "42".to_string()
        );
    }

    #[test]
    fn test_transaction_outcome_with_string_id() {
        let outcome: TransactionOutcome =
            serde_json::from_str(r#"{"success": true, "transaction_id": "tx-42"}"#).unwrap();
        assert_eq!(
            outcome.transaction_id.unwrap().into_string(),
            "tx-42".to_string()
        );
    }

    #[test]
    fn test_transaction_outcome_failure_has_no_id() {
        let outcome: TransactionOutcome =
            serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!outcome.success);
        assert!(outcome.transaction_id.is_none());
    }

    #[test]
    fn test_error_payload_parsing() {
        let payload: ErrorPayload =
            serde_json::from_str(r#"{"error": "Product not found"}"#).unwrap();
        assert_eq!(payload.error.as_deref(), Some("Product not found"));
    }

    #[test]
    fn test_outbound_request_serializes_server_contract() {
        let mut cart = bolt_core::Cart::new();
        cart.add_product(&Product {
            id: 1,
            name: "Soap".into(),
            price_minor: 2000,
            stock: 5,
        })
        .unwrap();

        let request = cart
            .to_transaction_request(PaymentMethod::Card, "Asha")
            .unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["items"][0]["id"], 1);
        assert_eq!(json["items"][0]["price"], 20.0);
        assert_eq!(json["payment_method"], "card");
        assert_eq!(json["total"], 20.0);
    }
}
