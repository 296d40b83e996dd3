//! # Pending Bills State
//!
//! The hold list: carts a cashier parked with "save pending" to serve the
//! next customer, waiting to be resumed.
//!
//! ## Hold / Resume Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Hold / Resume Flow                                   │
//! │                                                                         │
//! │  suspend_sale ──► Cart::suspend ──► PendingState::push                 │
//! │                                                                         │
//! │  resume_sale(id) ──► find(id) ──► Cart::restore ──► remove(id)         │
//! │                                       │                                 │
//! │                                       └── on error the bill is never   │
//! │                                           removed, so nothing is lost  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Held bills live only as long as the app window, like the cart itself.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use vireo_core::PendingBill;

// =============================================================================
// View DTO
// =============================================================================

/// One held bill as the shell lists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingBillView {
    pub id: String,
    pub line_count: usize,
    pub total_quantity: i64,
    pub total_cents: i64,
    pub held_at: String,
}

impl From<&PendingBill> for PendingBillView {
    fn from(bill: &PendingBill) -> Self {
        PendingBillView {
            id: bill.id.clone(),
            line_count: bill.lines.len(),
            total_quantity: bill.total_quantity(),
            total_cents: bill.total_cents(),
            held_at: bill.held_at.to_rfc3339(),
        }
    }
}

// =============================================================================
// Pending State
// =============================================================================

/// Managed hold list.
///
/// Cloning is cheap and shares the same underlying list.
#[derive(Debug, Clone, Default)]
pub struct PendingState {
    bills: Arc<Mutex<Vec<PendingBill>>>,
}

impl PendingState {
    /// Creates an empty hold list.
    pub fn new() -> Self {
        PendingState::default()
    }

    /// Appends a held bill. Bills keep hold order, oldest first.
    pub fn push(&self, bill: PendingBill) {
        self.bills
            .lock()
            .expect("Pending list mutex poisoned")
            .push(bill);
    }

    /// Returns copies of all held bills, oldest first.
    pub fn bills(&self) -> Vec<PendingBill> {
        self.bills
            .lock()
            .expect("Pending list mutex poisoned")
            .clone()
    }

    /// Returns a copy of one held bill by id.
    pub fn find(&self, id: &str) -> Option<PendingBill> {
        self.bills
            .lock()
            .expect("Pending list mutex poisoned")
            .iter()
            .find(|bill| bill.id == id)
            .cloned()
    }

    /// Removes a held bill by id, returning it if present.
    ///
    /// Callers remove only after a successful restore, so a refused
    /// resume leaves the bill queued.
    pub fn remove(&self, id: &str) -> Option<PendingBill> {
        let mut bills = self.bills.lock().expect("Pending list mutex poisoned");
        let index = bills.iter().position(|bill| bill.id == id)?;
        Some(bills.remove(index))
    }

    /// Number of held bills.
    pub fn len(&self) -> usize {
        self.bills.lock().expect("Pending list mutex poisoned").len()
    }

    /// Whether the hold list is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
