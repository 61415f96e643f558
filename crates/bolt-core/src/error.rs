//! # Error Types
//!
//! Domain-specific error types for bolt-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bolt-core errors (this file)                                           │
//! │  └── CoreError      - Cart rule violations                              │
//! │                                                                         │
//! │  bolt-api errors (separate crate)                                       │
//! │  └── ApiError       - Lookup / transaction call failures                │
//! │                                                                         │
//! │  bolt-scan errors (separate crate)                                      │
//! │  └── ScanError      - Input and camera failures                         │
//! │                                                                         │
//! │  Register errors (in app)                                               │
//! │  └── RegisterError  - What the cashier sees (notification)              │
//! │                                                                         │
//! │  Flow: CoreError / ApiError / ScanError → RegisterError → Notification  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, id)
//! 3. Errors are enum variants, never String
//! 4. Every variant maps to a user-facing message; none is fatal

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart rule violations.
///
/// All of these are recovered locally: the register surfaces a transient
/// notification and leaves the cart untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The stock snapshot taken at scan time does not cover the requested
    /// quantity.
    ///
    /// ## When This Occurs
    /// - Adding a product whose line already sits at its stock snapshot
    /// - Explicitly increasing quantity past the snapshot
    /// - First add of a product the server reported with zero stock
    #[error("Not enough stock for {name}: only {stock} available")]
    InsufficientStock { name: String, stock: i64 },

    /// Quantity change or removal targeted a product with no cart line.
    #[error("Product {product_id} is not in the cart")]
    LineNotFound { product_id: i64 },

    /// Checkout was attempted on an empty cart. No network call is made.
    #[error("Cart is empty")]
    EmptyCart,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
