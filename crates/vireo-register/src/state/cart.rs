//! # Cart State
//!
//! Manages the active cart behind a lock, plus the view DTOs the shell
//! renders. The cart logic itself lives in `vireo_core::cart`; this file
//! only adds shared ownership and presentation shapes.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may access/modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. The embedding shell may invoke commands from a thread pool
//!
//! ## Why Not RwLock?
//! Cart operations are quick, and most operations modify state.
//! A RwLock would add complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use vireo_core::{Cart, CartLine};

// =============================================================================
// View DTOs
// =============================================================================

/// One cart line as the shell renders it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: i64,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub line_total_cents: i64,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        CartLineView {
            product_id: line.product_id,
            name: line.name.clone(),
            unit_price_cents: line.unit_price_cents,
            quantity: line.quantity,
            line_total_cents: line.line_total_cents(),
        }
    }
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            total_cents: cart.total_cents(),
        }
    }
}

/// Full cart response including lines and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            lines: cart.lines.iter().map(CartLineView::from).collect(),
            totals: CartTotals::from(cart),
        }
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// Managed cart state.
///
/// Cloning is cheap and shares the same underlying cart.
#[derive(Debug, Clone)]
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
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_item(snapshot));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vireo_core::{Money, ProductSnapshot};

    fn snapshot(product_id: i64, name: &str, cents: i64) -> ProductSnapshot {
        ProductSnapshot::new(product_id, name, Money::from_cents(cents)).unwrap()
    }

    #[test]
    fn test_view_mapping() {
        let state = CartState::new();
        state.with_cart_mut(|cart| {
            cart.add_item(snapshot(1, "Cola", 299));
            cart.add_item(snapshot(1, "Cola", 299));
            cart.add_item(snapshot(2, "Chips", 150));
        });

        let view = state.with_cart(|c| CartView::from(c));
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.lines[0].quantity, 2);
        assert_eq!(view.lines[0].line_total_cents, 598);
        assert_eq!(view.totals.line_count, 2);
        assert_eq!(view.totals.total_quantity, 3);
        assert_eq!(view.totals.total_cents, 748);
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let state = CartState::new();
        state.with_cart_mut(|cart| cart.add_item(snapshot(1, "Cola", 299)));

        let json = serde_json::to_value(state.with_cart(|c| CartView::from(c))).unwrap();
        assert_eq!(json["lines"][0]["productId"], 1);
        assert_eq!(json["lines"][0]["unitPriceCents"], 299);
        assert_eq!(json["totals"]["totalCents"], 299);
    }

    #[test]
    fn test_state_clones_share_the_cart() {
        let state = CartState::new();
        let clone = state.clone();
        state.with_cart_mut(|cart| cart.add_item(snapshot(1, "Cola", 299)));
        assert_eq!(clone.with_cart(|cart| cart.line_count()), 1);
    }
}
