//! # Domain Types
//!
//! Shared types for the selling flow.
//!
//! ## Type Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Type Relationships                                │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                         │
//! │  │ ProductSnapshot │───────►│    CartLine     │  (cart module)          │
//! │  │  (from catalog) │  add   │  (live, mutable)│                         │
//! │  └─────────────────┘        └────────┬────────┘                         │
//! │                                      │ finalize                        │
//! │                                      ▼                                 │
//! │  ┌─────────────────┐        ┌─────────────────┐                         │
//! │  │  PaymentMethod  │───────►│  Order + Lines  │  (immutable record)    │
//! │  └─────────────────┘        └─────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Monetary fields are stored as integer cents with `Money` accessors,
//! so serialized payloads stay plain integers.

use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::{validate_product_name, validate_unit_price_cents};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product Snapshot
// =============================================================================

/// What the catalog hands over when a product is picked for sale.
///
/// Uses the snapshot pattern: name and price are frozen at add-time.
/// A later catalog price change must not reprice lines already in a cart,
/// a held bill, or a recorded order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSnapshot {
    pub product_id: i64,
    /// Product name at time of selection (frozen).
    pub name: String,
    /// Unit price in cents at time of selection (frozen).
    pub unit_price_cents: i64,
}

impl ProductSnapshot {
    /// Creates a validated snapshot.
    ///
    /// ## Rules
    /// - Name must be non-empty and at most 200 characters (trimmed)
    /// - Unit price must not be negative
    pub fn new(product_id: i64, name: &str, unit_price: Money) -> CoreResult<Self> {
        validate_product_name(name)?;
        validate_unit_price_cents(unit_price.cents())?;
        Ok(ProductSnapshot {
            product_id,
            name: name.trim().to_string(),
            unit_price_cents: unit_price.cents(),
        })
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a finalized order was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal.
    Card,
    /// Digital wallet / UPI payment.
    Digital,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl PaymentMethod {
    /// Returns the method as a lowercase string (matches serialization).
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Digital => "digital",
        }
    }

    /// Parses a payment method from UI input.
    ///
    /// ## Behavior
    /// - Case-insensitive, surrounding whitespace ignored
    /// - `"upi"` is accepted as an alias for `Digital` (the wallet button
    ///   in some storefront builds is labelled UPI)
    /// - Anything else is rejected with `None`. An unrecognized method
    ///   must never be silently coerced to cash.
    pub fn parse(input: &str) -> Option<PaymentMethod> {
        match input.trim().to_ascii_lowercase().as_str() {
            "cash" => Some(PaymentMethod::Cash),
            "card" => Some(PaymentMethod::Card),
            "digital" | "upi" => Some(PaymentMethod::Digital),
            _ => None,
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A line item in a finalized order.
///
/// Everything here is frozen. The live, mutable counterpart is
/// `cart::CartLine`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLine {
    pub product_id: i64,
    /// Product name at time of sale (frozen).
    pub name: String,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    /// Quantity sold.
    pub quantity: i64,
    /// Line total (unit_price × quantity).
    pub line_total_cents: i64,
}

impl OrderLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

/// An immutable, finalized order, ready for the sale-recording gateway.
///
/// Built by `Cart::finalize`. The id and timestamp are supplied by the
/// caller so this crate stays free of clock and randomness concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub lines: Vec<OrderLine>,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Total number of units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
