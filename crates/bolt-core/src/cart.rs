//! # Cart State Machine
//!
//! The in-memory cart a cashier assembles between scans and checkout.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cart Operations                                     │
//! │                                                                         │
//! │  Cashier Action           Operation                State Change         │
//! │  ──────────────           ─────────                ────────────         │
//! │                                                                         │
//! │  Scan barcode ──────────► add_product() ─────────► push / qty += 1      │
//! │                                                                         │
//! │  Press "+" ─────────────► increase_quantity() ───► qty += 1 (≤ stock)   │
//! │                                                                         │
//! │  Press "-" ─────────────► decrease_quantity() ───► qty -= 1 (min 1)     │
//! │                                                                         │
//! │  Press "Remove" ────────► remove_line() ─────────► line deleted         │
//! │                                                                         │
//! │  Press "Clear" ─────────► clear() ───────────────► all lines deleted    │
//! │                                                                         │
//! │  Checkout ──────────────► to_transaction_request() (read only)          │
//! │                                                                         │
//! │  NOTE: The quantity of a line can never exceed the stock snapshot       │
//! │        taken when the product was first scanned.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id` (re-scanning increments quantity)
//! - `1 ≤ quantity ≤ stock_at_scan` for every line
//! - Insertion order is display order
//! - The total is always recomputed, never cached

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PaymentMethod, Product, TransactionItem, TransactionRequest};

// =============================================================================
// Cart Line
// =============================================================================

/// One product's presence in the cart.
///
/// ## Snapshot Pattern
/// `name`, `unit_price_minor`, and `stock_at_scan` are frozen copies of the
/// product record at first add. If the server updates the product afterwards,
/// the cart keeps displaying and charging what the cashier scanned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id (unique within the cart).
    pub product_id: i64,

    /// Product name at scan time (frozen).
    pub name: String,

    /// Unit price in minor units at scan time (frozen).
    pub unit_price_minor: i64,

    /// Quantity in cart. Always `1..=stock_at_scan`.
    pub quantity: i64,

    /// Server-reported stock at first add. Never refreshed.
    pub stock_at_scan: i64,

    /// When this line was first added.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new line with quantity 1 from a freshly looked-up product.
    fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price_minor: product.price_minor,
            quantity: 1,
            stock_at_scan: product.stock,
            added_at: Utc::now(),
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_minor(self.unit_price_minor)
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Freezes this line into the outbound transaction shape.
    fn to_transaction_item(&self) -> TransactionItem {
        TransactionItem {
            id: self.product_id,
            name: self.name.clone(),
            price: self.unit_price().to_decimal(),
            quantity: self.quantity,
            stock: self.stock_at_scan,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cashier's cart: an ordered list of lines, one per product.
///
/// Lines are kept private so every mutation path goes through the
/// stock-snapshot checks below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a freshly looked-up product to the cart.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increments if it is still below
    ///   the stock snapshot, otherwise `InsufficientStock` and no change.
    /// - Product not in cart: a new line with quantity 1 is appended,
    ///   provided the server reported stock above zero.
    pub fn add_product(&mut self, product: &Product) -> CoreResult<()> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            if line.quantity < line.stock_at_scan {
                line.quantity += 1;
                return Ok(());
            }
            return Err(CoreError::InsufficientStock {
                name: line.name.clone(),
                stock: line.stock_at_scan,
            });
        }

        // The server is not expected to resolve a barcode to a product with
        // zero stock, but a stale catalog can; the guard keeps the
        // quantity >= 1 invariant from ever meeting stock_at_scan = 0.
        if product.stock <= 0 {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                stock: product.stock,
            });
        }

        self.lines.push(CartLine::from_product(product));
        Ok(())
    }

    /// Increments the quantity of an existing line.
    ///
    /// Fails with `InsufficientStock` when the line already sits at its
    /// stock snapshot; the line is left unchanged.
    pub fn increase_quantity(&mut self, product_id: i64) -> CoreResult<()> {
        let line = self.line_mut(product_id)?;
        if line.quantity < line.stock_at_scan {
            line.quantity += 1;
            Ok(())
        } else {
            Err(CoreError::InsufficientStock {
                name: line.name.clone(),
                stock: line.stock_at_scan,
            })
        }
    }

    /// Decrements the quantity of an existing line.
    ///
    /// At quantity 1 this is an exact no-op, not a removal; the cashier has
    /// a separate remove action for that.
    pub fn decrease_quantity(&mut self, product_id: i64) -> CoreResult<()> {
        let line = self.line_mut(product_id)?;
        if line.quantity > 1 {
            line.quantity -= 1;
        }
        Ok(())
    }

    /// Removes a line unconditionally.
    pub fn remove_line(&mut self, product_id: i64) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);

        if self.lines.len() == initial_len {
            Err(CoreError::LineNotFound { product_id })
        } else {
            Ok(())
        }
    }

    /// Clears all lines from the cart.
    ///
    /// Interactive confirmation is the caller's responsibility; core stays
    /// prompt-free so it is testable without a terminal.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns the lines in display (insertion) order.
    #[inline]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the number of distinct lines.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Calculates the grand total. Recomputed on every call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Checks if the cart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Builds the immutable outbound transaction snapshot.
    ///
    /// Fails with `EmptyCart` before any network activity can happen; the
    /// API client never sees an empty request.
    pub fn to_transaction_request(
        &self,
        payment_method: PaymentMethod,
        customer_name: &str,
    ) -> CoreResult<TransactionRequest> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        Ok(TransactionRequest {
            items: self.lines.iter().map(CartLine::to_transaction_item).collect(),
            total: self.total().to_decimal(),
            payment_method,
            customer_name: customer_name.trim().to_string(),
        })
    }

    fn line_mut(&mut self, product_id: i64) -> CoreResult<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or(CoreError::LineNotFound { product_id })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, price_minor: i64, stock: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            price_minor,
            stock,
        }
    }

    #[test]
    fn test_add_product_appends_line_with_quantity_one() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, "Soap", 2000, 5)).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.lines()[0].stock_at_scan, 5);
    }

    #[test]
    fn test_add_same_product_twice_increments_not_duplicates() {
        let mut cart = Cart::new();
        let soap = product(1, "Soap", 2000, 5);

        cart.add_product(&soap).unwrap();
        cart.add_product(&soap).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total(), Money::from_minor(4000)); // ₹40.00
    }

    #[test]
    fn test_add_past_stock_snapshot_fails_without_state_change() {
        let mut cart = Cart::new();
        let soap = product(1, "Soap", 2000, 2);

        cart.add_product(&soap).unwrap();
        cart.add_product(&soap).unwrap();
        let err = cart.add_product(&soap).unwrap_err();

        assert_eq!(
            err,
            CoreError::InsufficientStock {
                name: "Soap".into(),
                stock: 2
            }
        );
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_zero_stock_product_rejected() {
        let mut cart = Cart::new();
        let err = cart.add_product(&product(1, "Soap", 2000, 0)).unwrap_err();

        assert!(matches!(err, CoreError::InsufficientStock { stock: 0, .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increase_quantity_bounded_by_snapshot() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, "Soap", 2000, 1)).unwrap();

        let err = cart.increase_quantity(1).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { stock: 1, .. }));
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_quantity_never_exceeds_snapshot_under_any_add_sequence() {
        let mut cart = Cart::new();
        let soap = product(1, "Soap", 2000, 3);
        let tea = product(2, "Tea", 1500, 1);

        for _ in 0..10 {
            let _ = cart.add_product(&soap);
            let _ = cart.add_product(&tea);
            let _ = cart.increase_quantity(1);
            let _ = cart.increase_quantity(2);
        }

        for line in cart.lines() {
            assert!(line.quantity >= 1);
            assert!(line.quantity <= line.stock_at_scan);
        }
    }

    #[test]
    fn test_decrease_quantity_at_one_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, "Soap", 2000, 5)).unwrap();

        cart.decrease_quantity(1).unwrap();

        // Line still present, quantity unchanged
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_decrease_quantity_above_one() {
        let mut cart = Cart::new();
        let soap = product(1, "Soap", 2000, 5);
        cart.add_product(&soap).unwrap();
        cart.add_product(&soap).unwrap();

        cart.decrease_quantity(1).unwrap();
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_remove_line() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, "Soap", 2000, 5)).unwrap();
        cart.add_product(&product(2, "Tea", 1500, 5)).unwrap();

        cart.remove_line(1).unwrap();
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].product_id, 2);

        assert_eq!(
            cart.remove_line(1).unwrap_err(),
            CoreError::LineNotFound { product_id: 1 }
        );
    }

    #[test]
    fn test_total_recomputed_after_every_mutation() {
        let mut cart = Cart::new();
        let soap = product(1, "Soap", 2000, 5);
        let tea = product(2, "Tea", 1550, 5);

        cart.add_product(&soap).unwrap();
        cart.add_product(&tea).unwrap();
        assert_eq!(cart.total(), Money::from_minor(3550));

        cart.increase_quantity(2).unwrap();
        assert_eq!(cart.total(), Money::from_minor(5100));

        cart.remove_line(1).unwrap();
        assert_eq!(cart.total(), Money::from_minor(3100));

        cart.clear();
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_insertion_order_is_display_order() {
        let mut cart = Cart::new();
        cart.add_product(&product(3, "C", 100, 5)).unwrap();
        cart.add_product(&product(1, "A", 100, 5)).unwrap();
        cart.add_product(&product(2, "B", 100, 5)).unwrap();

        let ids: Vec<i64> = cart.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_transaction_request_on_empty_cart_fails() {
        let cart = Cart::new();
        assert_eq!(
            cart.to_transaction_request(PaymentMethod::Cash, "")
                .unwrap_err(),
            CoreError::EmptyCart
        );
    }

    #[test]
    fn test_transaction_request_snapshot() {
        let mut cart = Cart::new();
        let soap = product(1, "Soap", 2000, 5);
        cart.add_product(&soap).unwrap();
        cart.add_product(&soap).unwrap();

        let request = cart
            .to_transaction_request(PaymentMethod::Upi, "  Asha  ")
            .unwrap();

        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].quantity, 2);
        assert!((request.items[0].price - 20.0).abs() < f64::EPSILON);
        assert!((request.total - 40.0).abs() < f64::EPSILON);
        assert_eq!(request.payment_method, PaymentMethod::Upi);
        assert_eq!(request.customer_name, "Asha");

        // Building the snapshot does not consume the cart
        assert_eq!(cart.line_count(), 1);
    }
}
