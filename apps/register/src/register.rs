//! # Register Orchestration
//!
//! The command layer between the cashier's input and the library crates.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Register Commands                                │
//! │                                                                         │
//! │  typed barcode ──► scan_entry() ───┐                                    │
//! │                                    ├──► lookup_product ──► add_product  │
//! │  camera decode ──► handle_decoded()┘         (bolt-api)    (bolt-core)  │
//! │                                                                         │
//! │  + / - / rm / clear ──► cart mutations (CartState)                      │
//! │                                                                         │
//! │  pay ──► complete_billing() ──► TransactionRequest ──► server           │
//! │              │                                          │               │
//! │              │ EmptyCart: notify, NO network call        │              │
//! │              │                             success ──► celebrate,       │
//! │              │                                         cart reset       │
//! │              │                             failure ──► notify,          │
//! │              │                                         cart UNTOUCHED   │
//! │                                                                         │
//! │  Every command returns the freshly recomputed CartView; the caller      │
//! │  applies it to the terminal.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors never propagate past this layer: each becomes a transient
//! notification and the register stays usable.

use std::sync::{Arc, Mutex};

use tracing::debug;

use bolt_api::ApiClient;
use bolt_core::PaymentMethod;
use bolt_scan::parse_manual_entry;

use crate::error::RegisterError;
use crate::notify::{Notifier, Severity};
use crate::state::CartState;
use crate::view::CartView;

/// The register: cart state, server client, and cashier feedback.
pub struct Register {
    cart: CartState,
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    customer_name: Mutex<String>,
}

impl Register {
    /// Creates a register with an empty cart.
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Register {
            cart: CartState::new(),
            api,
            notifier,
            customer_name: Mutex::new(String::new()),
        }
    }

    /// Recomputes the current cart view.
    pub fn view(&self) -> CartView {
        self.cart.with_cart(|cart| CartView::from(cart))
    }

    /// Stores the optional customer name for the next transaction.
    pub fn set_customer_name(&self, name: &str) {
        *self.customer_name.lock().expect("customer name poisoned") = name.trim().to_string();
    }

    fn take_customer_name(&self) -> String {
        self.customer_name
            .lock()
            .expect("customer name poisoned")
            .clone()
    }

    // =========================================================================
    // Scan Paths
    // =========================================================================

    /// Manual entry path: committed text field content.
    pub async fn scan_entry(&self, raw: &str) -> CartView {
        debug!(raw = %raw, "scan_entry command");

        match self.resolve_and_add(raw).await {
            Ok(_) => self.notifier.notify("Added to cart", Severity::Success),
            Err(e) => self.notifier.notify(&e.user_message(), Severity::Error),
        }
        self.view()
    }

    /// Camera path: a barcode decoded from a video frame.
    pub async fn handle_decoded(&self, barcode: &str) -> CartView {
        debug!(barcode = %barcode, "handle_decoded command");

        match self.resolve_and_add(barcode).await {
            Ok(name) => self
                .notifier
                .notify(&format!("{name} added to cart"), Severity::Success),
            Err(e) => self.notifier.notify(&e.user_message(), Severity::Error),
        }
        self.view()
    }

    /// Both paths converge here: barcode → product lookup → cart add.
    /// Returns the product name for the camera path's notification.
    async fn resolve_and_add(&self, raw: &str) -> Result<String, RegisterError> {
        let barcode = parse_manual_entry(raw)?;
        let product = self.api.lookup_product(&barcode).await?;
        let name = product.name.clone();
        self.cart.with_cart_mut(|cart| cart.add_product(&product))?;
        Ok(name)
    }

    // =========================================================================
    // Cart Mutations
    // =========================================================================

    /// Increments a line's quantity, bounded by its stock snapshot.
    pub fn increase(&self, product_id: i64) -> CartView {
        debug!(product_id, "increase command");
        if let Err(e) = self.cart.with_cart_mut(|c| c.increase_quantity(product_id)) {
            self.notifier
                .notify(&RegisterError::from(e).user_message(), Severity::Error);
        }
        self.view()
    }

    /// Decrements a line's quantity; a no-op at quantity 1.
    pub fn decrease(&self, product_id: i64) -> CartView {
        debug!(product_id, "decrease command");
        if let Err(e) = self.cart.with_cart_mut(|c| c.decrease_quantity(product_id)) {
            self.notifier
                .notify(&RegisterError::from(e).user_message(), Severity::Error);
        }
        self.view()
    }

    /// Removes a line unconditionally.
    pub fn remove(&self, product_id: i64) -> CartView {
        debug!(product_id, "remove command");
        if let Err(e) = self.cart.with_cart_mut(|c| c.remove_line(product_id)) {
            self.notifier
                .notify(&RegisterError::from(e).user_message(), Severity::Error);
        }
        self.view()
    }

    /// Empties the cart. Interactive confirmation happens in the REPL
    /// before this is called.
    pub fn clear(&self) -> CartView {
        debug!("clear command");
        self.cart.with_cart_mut(|c| c.clear());
        self.view()
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Submits the transaction.
    ///
    /// Empty cart fails before any network activity. On success the cart
    /// and customer name reset; on any failure both are left untouched so
    /// the cashier can retry without re-scanning.
    pub async fn complete_billing(&self, payment_method: PaymentMethod) -> CartView {
        debug!(payment_method = %payment_method, "complete_billing command");

        let customer_name = self.take_customer_name();
        let request = match self
            .cart
            .with_cart(|c| c.to_transaction_request(payment_method, &customer_name))
        {
            Ok(request) => request,
            Err(e) => {
                self.notifier
                    .notify(&RegisterError::from(e).user_message(), Severity::Error);
                return self.view();
            }
        };

        self.notifier.notify("Processing payment...", Severity::Info);

        match self.api.complete_transaction(&request).await {
            Ok(receipt) => {
                self.notifier.notify(
                    &format!("Transaction completed! ID: {}", receipt.transaction_id),
                    Severity::Success,
                );
                self.notifier.celebrate();
                self.cart.with_cart_mut(|c| c.clear());
                self.set_customer_name("");
            }
            Err(e) => {
                self.notifier
                    .notify(&RegisterError::from(e).user_message(), Severity::Error);
            }
        }
        self.view()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
