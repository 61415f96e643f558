//! # bolt-core: Pure Business Logic for Bolt POS
//!
//! This crate is the **heart** of Bolt POS. It contains the cart state
//! machine and all monetary math as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bolt POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  apps/register (Terminal UI)                    │   │
//! │  │     Scan prompt ──► Cart view ──► Payment ──► Receipt           │   │
//! │  └──────────────┬───────────────────────────────┬──────────────────┘   │
//! │                 │                               │                      │
//! │  ┌──────────────▼──────────────┐  ┌─────────────▼──────────────────┐   │
//! │  │         bolt-scan           │  │          bolt-api              │   │
//! │  │  manual entry, camera loop  │  │  product lookup, transactions  │   │
//! │  └──────────────┬──────────────┘  └─────────────┬──────────────────┘   │
//! │                 │                               │                      │
//! │  ┌──────────────▼───────────────────────────────▼──────────────────┐   │
//! │  │                 ★ bolt-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌────────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │   error    │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ CoreError  │  │   │
//! │  │   │  Payment  │  │           │  │ CartLine  │  │            │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO HARDWARE • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, PaymentMethod, TransactionRequest)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart state machine with stock-snapshot bounds
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic
//! 2. **No I/O**: Network, hardware, and terminal access are FORBIDDEN here
//! 3. **Integer Money**: Monetary values are minor units (i64); floats exist
//!    only at the wire boundary
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use bolt_core::{Cart, Product, Money};
//!
//! let soap = Product {
//!     id: 1,
//!     name: "Soap".into(),
//!     price_minor: 2000, // ₹20.00
//!     stock: 5,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_product(&soap).unwrap();
//! cart.add_product(&soap).unwrap(); // same id: quantity becomes 2
//!
//! assert_eq!(cart.line_count(), 1);
//! assert_eq!(cart.total(), Money::from_minor(4000)); // ₹40.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bolt_core::Money` instead of
// `use bolt_core::money::Money`

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use types::*;
