//! # Cart State
//!
//! Shared ownership wrapper around the cart.
//!
//! ## Thread Safety
//! The cart lives behind `Arc<Mutex<_>>` because the REPL task and the
//! camera-barcode consumer both mutate it; the mutex serializes every
//! mutation, so no cart invariant can be observed mid-update.

use std::sync::{Arc, Mutex};

use bolt_core::Cart;

/// Shared cart state.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let view = cart_state.with_cart(CartView::from);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_product(&product))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("cart mutex poisoned");
        f(&mut cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bolt_core::Product;

    #[test]
    fn test_mutations_are_visible_across_clones() {
        let state = CartState::new();
        let other = state.clone();

        state
            .with_cart_mut(|cart| {
                cart.add_product(&Product {
                    id: 1,
                    name: "Soap".into(),
                    price_minor: 2000,
                    stock: 5,
                })
            })
            .unwrap();

        assert_eq!(other.with_cart(|cart| cart.line_count()), 1);
    }
}
