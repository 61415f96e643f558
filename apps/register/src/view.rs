//! # Cart View
//!
//! Rendering is split in two, so the view logic is testable without a
//! terminal:
//!
//! 1. [`CartView::from`] - a pure function from cart state to a view model
//! 2. [`print_cart`] - the side-effecting step that applies it to the
//!    terminal
//!
//! The view is recomputed from scratch after every mutation; nothing in it
//! is cached.

use bolt_core::Cart;

// =============================================================================
// View Model
// =============================================================================

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineView {
    pub product_id: i64,
    pub name: String,
    /// e.g. "₹20.00"
    pub unit_price: String,
    pub quantity: i64,
    /// e.g. "₹40.00"
    pub line_total: String,
}

/// The whole cart, ready to display. Pure data, no behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub lines: Vec<LineView>,
    /// Grand total, e.g. "₹40.00". Always the recomputed sum.
    pub total: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            lines: cart
                .lines()
                .iter()
                .map(|line| LineView {
                    product_id: line.product_id,
                    name: line.name.clone(),
                    unit_price: line.unit_price().to_string(),
                    quantity: line.quantity,
                    line_total: line.line_total().to_string(),
                })
                .collect(),
            total: cart.total().to_string(),
        }
    }
}

// =============================================================================
// Terminal Apply
// =============================================================================

/// Applies a view model to the terminal.
pub fn print_cart(view: &CartView) {
    println!("┌─ CART ─────────────────────────────────────");
    if view.lines.is_empty() {
        println!("│ (empty)");
    }
    for line in &view.lines {
        println!(
            "│ [{}] {}  {} x {} = {}",
            line.product_id, line.name, line.unit_price, line.quantity, line.line_total
        );
    }
    println!("└─ TOTAL: {}", view.total);
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bolt_core::Product;

    fn product(id: i64, name: &str, price_minor: i64, stock: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            price_minor,
            stock,
        }
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::new());
        assert!(view.lines.is_empty());
        assert_eq!(view.total, "₹0.00");
    }

    #[test]
    fn test_view_formats_lines_and_total() {
        let mut cart = Cart::new();
        let soap = product(1, "Soap", 2000, 5);
        cart.add_product(&soap).unwrap();
        cart.add_product(&soap).unwrap();
        cart.add_product(&product(2, "Tea", 1550, 3)).unwrap();

        let view = CartView::from(&cart);
        assert_eq!(
            view.lines[0],
            LineView {
                product_id: 1,
                name: "Soap".into(),
                unit_price: "₹20.00".into(),
                quantity: 2,
                line_total: "₹40.00".into(),
            }
        );
        assert_eq!(view.lines[1].line_total, "₹15.50");
        assert_eq!(view.total, "₹55.50");
    }

    #[test]
    fn test_view_is_recomputed_not_stale() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, "Soap", 2000, 5)).unwrap();
        let before = CartView::from(&cart);

        cart.increase_quantity(1).unwrap();
        let after = CartView::from(&cart);

        assert_eq!(before.total, "₹20.00");
        assert_eq!(after.total, "₹40.00");
    }
}
