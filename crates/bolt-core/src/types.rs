//! # Domain Types
//!
//! Core domain types used throughout Bolt POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │    Product      │   │ TransactionRequest  │   │ PaymentMethod   │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  id (i64)       │   │  items (snapshots)  │   │  Cash           │   │
//! │  │  name           │   │  total              │   │  Card           │   │
//! │  │  price_minor    │   │  payment_method     │   │  Upi            │   │
//! │  │  stock          │   │  customer_name      │   └─────────────────┘   │
//! │  └─────────────────┘   └─────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Product` is what the server resolves a barcode to; `TransactionRequest`
//! is the immutable outbound snapshot built from the cart at checkout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product as resolved by the register server at scan time.
///
/// `stock` is the server-reported availability at the moment of the lookup.
/// The cart snapshots it on first add and never refreshes it; if another
/// register sells the same item concurrently, reconciliation is the server's
/// problem, not ours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identifier, unique per product.
    pub id: i64,

    /// Display name shown to the cashier.
    pub name: String,

    /// Price in minor units (paise).
    pub price_minor: i64,

    /// Available stock at lookup time.
    pub stock: i64,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_minor(self.price_minor)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays.
///
/// The set mirrors the register server's accepted values; it is serialized
/// lowercase because the server stores the method as a plain string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// UPI transfer.
    Upi,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Upi => write!(f, "upi"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

// =============================================================================
// Transaction Request
// =============================================================================

/// One cart line frozen into the outbound transaction payload.
///
/// Field names and the decimal `price` match the server contract for
/// `POST /api/complete-transaction` exactly; this type exists so the wire
/// shape is independent of how `CartLine` evolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionItem {
    pub id: i64,
    pub name: String,
    /// Unit price in decimal major units (wire format).
    pub price: f64,
    pub quantity: i64,
    /// Stock snapshot taken at scan time.
    pub stock: i64,
}

/// The outbound transaction payload. Immutable once built.
///
/// ## Wire Shape
/// ```json
/// {
///   "items": [{"id": 1, "name": "Soap", "price": 20.0, "quantity": 2, "stock": 5}],
///   "total": 40.0,
///   "payment_method": "cash",
///   "customer_name": ""
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub items: Vec<TransactionItem>,
    /// Computed cart total in decimal major units.
    pub total: f64,
    pub payment_method: PaymentMethod,
    /// Optional on the billing screen; the server accepts an empty string.
    pub customer_name: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cash).unwrap(),
            "\"cash\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Upi).unwrap(),
            "\"upi\""
        );
    }

    #[test]
    fn test_payment_method_from_str() {
        assert_eq!("cash".parse::<PaymentMethod>(), Ok(PaymentMethod::Cash));
        assert_eq!(" Card ".parse::<PaymentMethod>(), Ok(PaymentMethod::Card));
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_transaction_request_wire_shape() {
        let request = TransactionRequest {
            items: vec![TransactionItem {
                id: 1,
                name: "Soap".into(),
                price: 20.0,
                quantity: 2,
                stock: 5,
            }],
            total: 40.0,
            payment_method: PaymentMethod::Cash,
            customer_name: String::new(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["items"][0]["price"], 20.0);
        assert_eq!(json["total"], 40.0);
        assert_eq!(json["payment_method"], "cash");
        assert_eq!(json["customer_name"], "");
    }

    #[test]
    fn test_product_price_helper() {
        let product = Product {
            id: 7,
            name: "Tea".into(),
            price_minor: 1550,
            stock: 3,
        };
        assert_eq!(product.price(), Money::from_minor(1550));
    }
}
