//! # Cart Module
//!
//! The live cart for an in-progress sale, plus held bills.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                    │
//! │                                                                         │
//! │  Screen Action            Operation               Cart Change           │
//! │  ─────────────            ─────────               ───────────           │
//! │                                                                         │
//! │  Click Product ──────────► add_item() ──────────► qty += 1 or new line │
//! │                                                                         │
//! │  +/- Buttons ────────────► update_quantity() ───► qty = max(1, qty+Δ)  │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ───────► line deleted         │
//! │                                                                         │
//! │  Checkout ───────────────► finalize() ──────────► Order (cart intact)  │
//! │                                                                         │
//! │  Hold Bill ──────────────► suspend() ───────────► PendingBill + clear  │
//! │                                                                         │
//! │  Resume Bill ────────────► restore() ───────────► lines replaced       │
//! │                                                                         │
//! │  NOTE: finalize does NOT clear. The caller clears only after the       │
//! │        sale-recording gateway confirms, so a failed checkout leaves    │
//! │        the cart exactly as it was for a retry.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id`. Repeat adds accumulate quantity.
//! - Quantity never drops below 1 through `update_quantity`. Lines leave
//!   the cart only via explicit `remove_item`, `clear`, or a confirmed
//!   checkout.
//! - Line order is insertion order. No re-sorting, ever.
//! - Totals are derived on demand from the lines, never cached.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Order, OrderLine, PaymentMethod, ProductSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Cart Line
// =============================================================================

/// One product entry in the live cart.
///
/// ## Design Notes
/// Name and unit price are frozen copies from the `ProductSnapshot` at
/// add-time. A catalog price change after the product was rung up must
/// not reprice this line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product_id: i64,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Quantity in cart. Always >= 1.
    pub quantity: i64,
}

impl CartLine {
    /// Creates a new line from a catalog snapshot with quantity 1.
    pub fn from_snapshot(snapshot: ProductSnapshot) -> Self {
        CartLine {
            product_id: snapshot.product_id,
            name: snapshot.name,
            unit_price_cents: snapshot.unit_price_cents,
            quantity: 1,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents())
    }

    fn to_order_line(&self) -> OrderLine {
        OrderLine {
            product_id: self.product_id,
            name: self.name.clone(),
            unit_price_cents: self.unit_price_cents,
            quantity: self.quantity,
            line_total_cents: self.line_total_cents(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The live cart for the sale currently being rung up.
///
/// Pure in-memory state. Mutations cannot fail; the only fallible
/// operations are the terminal ones (`finalize`, `restore`) and those
/// fail without changing anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// Lines in insertion order.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Rings up a product.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity goes up by 1. The line
    ///   keeps the name and price frozen at first add; the new snapshot's
    ///   values are ignored.
    /// - Otherwise: a new line with quantity 1 is appended.
    pub fn add_item(&mut self, snapshot: ProductSnapshot) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == snapshot.product_id)
        {
            line.quantity = line.quantity.saturating_add(1);
            return;
        }
        self.lines.push(CartLine::from_snapshot(snapshot));
    }

    /// Adjusts a line's quantity by a signed delta.
    ///
    /// ## Behavior
    /// - New quantity is `max(1, quantity + delta)`, saturating at the
    ///   `i64` limits. Decrementing at 1 stays at 1; only `remove_item`
    ///   deletes a line.
    /// - Unknown `product_id`: no-op. Not an error; the line may have
    ///   been removed by the time a queued click lands.
    pub fn update_quantity(&mut self, product_id: i64, delta: i64) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            line.quantity = line.quantity.saturating_add(delta).max(1);
        }
    }

    /// Removes a line outright, regardless of quantity.
    ///
    /// Unknown `product_id` is a no-op.
    pub fn remove_item(&mut self, product_id: i64) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of distinct lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Calculates the cart total in cents.
    ///
    /// ## Behavior
    /// Recomputed from the lines on every call; nothing is cached.
    /// Accumulation is exact integer arithmetic. Rounding to two decimal
    /// places happens once, at display time, never here.
    pub fn total_cents(&self) -> i64 {
        self.lines.iter().map(|line| line.line_total_cents()).sum()
    }

    /// Returns the cart total as Money.
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents())
    }

    /// Materializes the cart into an immutable `Order`.
    ///
    /// ## Behavior
    /// The cart is NOT cleared. Checkout is a two-step handshake:
    /// finalize here, hand the order to the sale-recording gateway, and
    /// clear only once it confirms. A recording failure therefore leaves
    /// every line intact for retry.
    ///
    /// The id and timestamp come from the caller; this crate never
    /// touches the clock or a random source.
    ///
    /// ## Errors
    /// - `CoreError::EmptyCart` if there is nothing to finalize
    pub fn finalize(
        &self,
        order_id: String,
        placed_at: DateTime<Utc>,
        payment_method: PaymentMethod,
    ) -> CoreResult<Order> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        Ok(Order {
            id: order_id,
            lines: self.lines.iter().map(CartLine::to_order_line).collect(),
            total_cents: self.total_cents(),
            payment_method,
            created_at: placed_at,
        })
    }

    /// Archives the cart as a held bill and clears it.
    ///
    /// ## Behavior
    /// - Empty cart: nothing happens and `None` is returned. Holding an
    ///   empty cart must not create an empty pending entry.
    /// - Otherwise the lines and total are frozen into a `PendingBill`
    ///   whose id is derived from the hold timestamp, and the active
    ///   cart becomes empty.
    pub fn suspend(&mut self, held_at: DateTime<Utc>) -> Option<PendingBill> {
        if self.is_empty() {
            return None;
        }
        let bill = PendingBill {
            id: held_at.timestamp_millis().to_string(),
            lines: std::mem::take(&mut self.lines),
            held_at,
        };
        Some(bill)
    }

    /// Loads a held bill back into the cart.
    ///
    /// Takes the bill by reference so the caller can keep it queued
    /// until the restore is known to have succeeded.
    ///
    /// ## Errors
    /// - `CoreError::SaleInProgress` if the cart already holds lines.
    ///   The cart is left unchanged.
    pub fn restore(&mut self, bill: &PendingBill) -> CoreResult<()> {
        if !self.is_empty() {
            return Err(CoreError::SaleInProgress);
        }
        self.lines = bill.lines.clone();
        Ok(())
    }
}

// =============================================================================
// Pending Bill
// =============================================================================

/// A cart snapshot deliberately deferred rather than finalized.
///
/// Created by `Cart::suspend`, consumed by `Cart::restore`. The id is
/// the hold timestamp in milliseconds, which doubles as a stable sort
/// key for the pending list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PendingBill {
    pub id: String,
    pub lines: Vec<CartLine>,
    #[ts(as = "String")]
    pub held_at: DateTime<Utc>,
}

impl PendingBill {
    /// Returns the bill total as Money.
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents())
    }

    /// Calculates the bill total in cents.
    pub fn total_cents(&self) -> i64 {
        self.lines.iter().map(|line| line.line_total_cents()).sum()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(product_id: i64, name: &str, cents: i64) -> ProductSnapshot {
        ProductSnapshot::new(product_id, name, Money::from_cents(cents)).unwrap()
    }

    fn stocked_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, "Cola", 299));
        cart.add_item(snapshot(1, "Cola", 299));
        cart.add_item(snapshot(1, "Cola", 299));
        cart.add_item(snapshot(2, "Chips", 150));
        cart.add_item(snapshot(2, "Chips", 150));
        cart
    }

    #[test]
    fn test_add_accumulates_quantity() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, "Cola", 500));
        cart.add_item(snapshot(1, "Cola", 500));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines[0].quantity, 2);
    }

    #[test]
    fn test_add_keeps_first_snapshot() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, "Cola", 500));
        // Same product arrives again with a changed catalog price
        cart.add_item(snapshot(1, "Cola Zero", 599));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines[0].name, "Cola");
        assert_eq!(cart.lines[0].unit_price_cents, 500);
        assert_eq!(cart.lines[0].quantity, 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(10, "Bread", 250));
        cart.add_item(snapshot(20, "Milk", 180));
        cart.add_item(snapshot(10, "Bread", 250));

        let ids: Vec<i64> = cart.lines.iter().map(|line| line.product_id).collect();
        assert_eq!(ids, vec![10, 20]);
    }

    #[test]
    fn test_update_quantity_floors_at_one() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, "Cola", 500));
        cart.add_item(snapshot(1, "Cola", 500));

        cart.update_quantity(1, -5);

        assert_eq!(cart.line_count(), 1, "decrement must never remove a line");
        assert_eq!(cart.lines[0].quantity, 1);
    }

    #[test]
    fn test_update_quantity_applies_delta() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, "Cola", 500));
        cart.update_quantity(1, 4);
        assert_eq!(cart.lines[0].quantity, 5);
        cart.update_quantity(1, -2);
        assert_eq!(cart.lines[0].quantity, 3);
    }

    #[test]
    fn test_update_quantity_unknown_is_noop() {
        let mut cart = stocked_cart();
        let before = cart.clone();
        cart.update_quantity(999, 3);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_quantity_extreme_delta_saturates() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, "Cola", 500));

        cart.update_quantity(1, i64::MAX);
        assert_eq!(cart.lines[0].quantity, i64::MAX);

        // A repeat ring-up at the ceiling must stay put, not wrap
        cart.add_item(snapshot(1, "Cola", 500));
        assert_eq!(cart.lines[0].quantity, i64::MAX);

        cart.update_quantity(1, i64::MIN);
        assert_eq!(cart.lines[0].quantity, 1, "huge decrement still floors at one");
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, "Cola", 500));
        cart.remove_item(1);

        assert!(cart.is_empty());
        assert_eq!(cart.total_cents(), 0);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut cart = stocked_cart();
        let before = cart.clone();
        cart.remove_item(999);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_total_is_exact() {
        // 2.99 * 3 + 1.50 * 2 = 11.97, no float drift
        let cart = stocked_cart();
        assert_eq!(cart.total_cents(), 1197);
        assert_eq!(cart.total(), Money::from_cents(1197));
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_total_recomputed_after_mutation() {
        let mut cart = stocked_cart();
        cart.update_quantity(2, 1);
        assert_eq!(cart.total_cents(), 897 + 450);
        cart.remove_item(1);
        assert_eq!(cart.total_cents(), 450);
    }

    #[test]
    fn test_finalize_builds_order_without_clearing() {
        let cart = stocked_cart();
        let placed_at = Utc::now();
        let order = cart
            .finalize("order-1".into(), placed_at, PaymentMethod::Card)
            .unwrap();

        assert_eq!(order.id, "order-1");
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[0].line_total_cents, 897);
        assert_eq!(order.total_cents, 1197);
        assert_eq!(order.payment_method, PaymentMethod::Card);
        assert_eq!(order.created_at, placed_at);

        // The cart still holds everything until the caller clears it
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total_cents(), 1197);
    }

    #[test]
    fn test_finalize_empty_cart_fails() {
        let cart = Cart::new();
        let result = cart.finalize("order-1".into(), Utc::now(), PaymentMethod::Cash);
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_suspend_empty_is_noop() {
        let mut cart = Cart::new();
        assert!(cart.suspend(Utc::now()).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_suspend_freezes_and_clears() {
        let mut cart = stocked_cart();
        let held_at = Utc::now();
        let bill = cart.suspend(held_at).unwrap();

        assert_eq!(bill.id, held_at.timestamp_millis().to_string());
        assert_eq!(bill.lines.len(), 2);
        assert_eq!(bill.total_cents(), 1197);
        assert_eq!(bill.total_quantity(), 5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_restore_into_empty_cart() {
        let mut cart = stocked_cart();
        let bill = cart.suspend(Utc::now()).unwrap();

        cart.restore(&bill).unwrap();
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total_cents(), 1197);
    }

    #[test]
    fn test_restore_refused_mid_sale() {
        let mut cart = stocked_cart();
        let bill = cart.suspend(Utc::now()).unwrap();

        // A new sale starts before the bill is resumed
        cart.add_item(snapshot(7, "Gum", 99));
        let before = cart.clone();

        let result = cart.restore(&bill);
        assert!(matches!(result, Err(CoreError::SaleInProgress)));
        assert_eq!(cart, before, "failed restore must not touch the cart");
        // The bill itself is untouched and can be retried later
        assert_eq!(bill.lines.len(), 2);
    }
}
