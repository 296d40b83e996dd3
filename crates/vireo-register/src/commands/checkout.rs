//! # Checkout Commands
//!
//! Finalizing, holding, and resuming sales.
//!
//! ## Checkout Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Ordering                                    │
//! │                                                                         │
//! │  parse method ──► finalize (cart NOT cleared) ──► recorder.record()    │
//! │                                                        │                │
//! │                          ┌─────────────────────────────┤                │
//! │                          ▼                             ▼                │
//! │                       Err(e)                         Ok(())             │
//! │                          │                             │                │
//! │                 cart left intact,              cart cleared,            │
//! │                 error surfaced                 receipt returned         │
//! │                                                                         │
//! │  The cart is cleared only after the sale service confirms. A failed    │
//! │  record never loses the ticket; the cashier retries or holds it.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::gateway::SaleRecorder;
use crate::state::{CartState, CartView, ConfigState, PendingBillView, PendingState, SessionState};
use vireo_core::access::{Action, Section};
use vireo_core::{Order, OrderLine};

use super::require;

// =============================================================================
// Response DTOs
// =============================================================================

/// One line on a printed receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

impl From<&OrderLine> for ReceiptLine {
    fn from(line: &OrderLine) -> Self {
        ReceiptLine {
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price_cents: line.unit_price_cents,
            line_total_cents: line.line_total_cents,
        }
    }
}

/// Everything the shell needs to render a receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptView {
    pub order_id: String,
    pub store_name: String,
    pub placed_at: String,
    pub lines: Vec<ReceiptLine>,
    pub total_cents: i64,
    /// Total formatted with the configured currency, e.g. `"$11.97"`.
    pub total_display: String,
    pub payment_method: String,
}

impl ReceiptView {
    fn build(order: &Order, config: &ConfigState) -> Self {
        ReceiptView {
            order_id: order.id.clone(),
            store_name: config.store_name.clone(),
            placed_at: order.created_at.to_rfc3339(),
            lines: order.lines.iter().map(ReceiptLine::from).collect(),
            total_cents: order.total_cents,
            total_display: config.format_currency(order.total_cents),
            payment_method: order.payment_method.as_str().to_string(),
        }
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// Finalizes the cart into an order, records it, and returns the receipt.
///
/// ## Behavior
/// - An empty cart fails with a cart error before anything else happens
/// - An unrecognized payment method is rejected, never coerced to cash
/// - The cart is cleared only after [`SaleRecorder::record`] succeeds;
///   on failure the cart is left intact so nothing is lost
pub async fn checkout(
    session: &SessionState,
    cart: &CartState,
    config: &ConfigState,
    recorder: &dyn SaleRecorder,
    method: &str,
) -> Result<ReceiptView, ApiError> {
    require(session, Section::Pos, Action::Create)?;
    debug!(method = %method, "checkout command");

    let payment_method = vireo_core::PaymentMethod::parse(method)
        .ok_or_else(|| ApiError::payment(format!("Unknown payment method: {}", method)))?;

    let order_id = Uuid::new_v4().to_string();
    let order = cart.with_cart(|c| c.finalize(order_id, Utc::now(), payment_method))?;

    if let Err(err) = recorder.record(&order).await {
        warn!(order_id = %order.id, error = %err, "Sale recording failed; cart left intact");
        return Err(err.into());
    }

    cart.with_cart_mut(|c| c.clear());

    info!(
        order_id = %order.id,
        total = order.total_cents,
        lines = order.lines.len(),
        "Sale recorded"
    );

    Ok(ReceiptView::build(&order, config))
}

// =============================================================================
// Hold / Resume
// =============================================================================

/// Parks the current cart as a pending bill and empties it.
///
/// Suspending an empty cart is a no-op and returns `Ok(None)`.
pub fn suspend_sale(
    session: &SessionState,
    cart: &CartState,
    pending: &PendingState,
) -> Result<Option<PendingBillView>, ApiError> {
    require(session, Section::Pos, Action::Create)?;
    debug!("suspend_sale command");

    let Some(bill) = cart.with_cart_mut(|c| c.suspend(Utc::now())) else {
        return Ok(None);
    };

    let view = PendingBillView::from(&bill);
    info!(bill_id = %bill.id, total = bill.total_cents(), "Sale held");
    pending.push(bill);

    Ok(Some(view))
}

/// Lists held bills, oldest first.
pub fn pending_bills(
    session: &SessionState,
    pending: &PendingState,
) -> Result<Vec<PendingBillView>, ApiError> {
    require(session, Section::Pos, Action::View)?;

    Ok(pending
        .bills()
        .iter()
        .map(PendingBillView::from)
        .collect())
}

/// Restores a held bill into the cart.
///
/// ## Behavior
/// - Unknown bill id fails with not found
/// - A non-empty cart refuses the restore; the bill stays queued either
///   way until the restore succeeds
pub fn resume_sale(
    session: &SessionState,
    cart: &CartState,
    pending: &PendingState,
    bill_id: &str,
) -> Result<CartView, ApiError> {
    require(session, Section::Pos, Action::Create)?;
    debug!(bill_id = %bill_id, "resume_sale command");

    let bill = pending
        .find(bill_id)
        .ok_or_else(|| ApiError::not_found("Pending bill", bill_id))?;

    cart.with_cart_mut(|c| c.restore(&bill))?;
    pending.remove(bill_id);

    info!(bill_id = %bill_id, "Sale resumed");
    Ok(cart.with_cart(|c| CartView::from(c)))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::gateway::{GatewayError, MemorySaleRecorder};
    use vireo_core::access::{Role, UserPermissions};
    use vireo_core::{Money, ProductSnapshot, SessionUser};

    fn admin_session() -> SessionState {
        let session = SessionState::new();
        session.sign_in(SessionUser {
            id: 1,
            username: "admin".into(),
            full_name: "Admin".into(),
            role: Role::Admin,
            permissions: UserPermissions::none(),
            phone_number: None,
            email: None,
        });
        session
    }

    fn loaded_cart() -> CartState {
        let cart = CartState::new();
        cart.with_cart_mut(|c| {
            let cola = ProductSnapshot::new(1, "Cola", Money::from_cents(299)).unwrap();
            let chips = ProductSnapshot::new(2, "Chips", Money::from_cents(150)).unwrap();
            c.add_item(cola.clone());
            c.add_item(cola.clone());
            c.add_item(cola);
            c.add_item(chips.clone());
            c.add_item(chips);
        });
        cart
    }

    #[tokio::test]
    async fn test_checkout_records_then_clears() {
        let session = admin_session();
        let cart = loaded_cart();
        let config = ConfigState::default();
        let recorder = MemorySaleRecorder::new();

        let receipt = checkout(&session, &cart, &config, &recorder, "cash")
            .await
            .unwrap();

        assert_eq!(receipt.total_cents, 1197);
        assert_eq!(receipt.total_display, "$11.97");
        assert_eq!(receipt.lines.len(), 2);
        assert_eq!(receipt.payment_method, "cash");

        assert_eq!(recorder.record_count(), 1);
        assert!(cart.with_cart(|c| c.is_empty()));
    }

    #[tokio::test]
    async fn test_checkout_failure_keeps_cart() {
        let session = admin_session();
        let cart = loaded_cart();
        let config = ConfigState::default();
        let recorder = MemorySaleRecorder::new();
        recorder.fail_next(GatewayError::unavailable("connection refused"));

        let err = checkout(&session, &cart, &config, &recorder, "card")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::GatewayError);

        // Nothing recorded, nothing lost
        assert_eq!(recorder.record_count(), 0);
        assert_eq!(cart.with_cart(|c| c.total_cents()), 1197);

        // The failure was one-shot; a retry goes through
        let receipt = checkout(&session, &cart, &config, &recorder, "card")
            .await
            .unwrap();
        assert_eq!(receipt.total_cents, 1197);
        assert!(cart.with_cart(|c| c.is_empty()));
    }

    #[tokio::test]
    async fn test_checkout_rejects_unknown_method() {
        let session = admin_session();
        let cart = loaded_cart();
        let config = ConfigState::default();
        let recorder = MemorySaleRecorder::new();

        let err = checkout(&session, &cart, &config, &recorder, "cheque")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert_eq!(recorder.record_count(), 0);
        assert!(!cart.with_cart(|c| c.is_empty()));
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_fails() {
        let session = admin_session();
        let cart = CartState::new();
        let config = ConfigState::default();
        let recorder = MemorySaleRecorder::new();

        let err = checkout(&session, &cart, &config, &recorder, "cash")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(recorder.record_count(), 0);
    }

    #[test]
    fn test_suspend_and_resume_round_trip() {
        let session = admin_session();
        let cart = loaded_cart();
        let pending = PendingState::new();

        let view = suspend_sale(&session, &cart, &pending).unwrap().unwrap();
        assert_eq!(view.total_cents, 1197);
        assert!(cart.with_cart(|c| c.is_empty()));
        assert_eq!(pending.len(), 1);

        let listed = pending_bills(&session, &pending).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, view.id);

        let restored = resume_sale(&session, &cart, &pending, &view.id).unwrap();
        assert_eq!(restored.totals.total_cents, 1197);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_suspend_empty_cart_is_noop() {
        let session = admin_session();
        let cart = CartState::new();
        let pending = PendingState::new();

        assert!(suspend_sale(&session, &cart, &pending).unwrap().is_none());
        assert!(pending.is_empty());
    }

    #[test]
    fn test_resume_refused_mid_sale_keeps_bill() {
        let session = admin_session();
        let cart = loaded_cart();
        let pending = PendingState::new();

        let view = suspend_sale(&session, &cart, &pending).unwrap().unwrap();

        // New sale starts before the held bill comes back
        cart.with_cart_mut(|c| {
            c.add_item(ProductSnapshot::new(9, "Gum", Money::from_cents(99)).unwrap());
        });

        let err = resume_sale(&session, &cart, &pending, &view.id).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);

        // Bill still queued, in-progress sale untouched
        assert_eq!(pending.len(), 1);
        assert_eq!(cart.with_cart(|c| c.total_cents()), 99);
    }

    #[test]
    fn test_resume_unknown_bill_is_not_found() {
        let session = admin_session();
        let cart = CartState::new();
        let pending = PendingState::new();

        let err = resume_sale(&session, &cart, &pending, "nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
