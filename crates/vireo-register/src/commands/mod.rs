//! # Commands Module
//!
//! The command surface the storefront shell invokes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports + the permission gate)
//! ├── session.rs   ◄─── Sign-in/out, session restore
//! ├── access.rs    ◄─── Permission queries for rendering
//! ├── cart.rs      ◄─── Cart manipulation
//! └── checkout.rs  ◄─── Checkout, hold, resume
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Storefront Shell                                                       │
//! │  ────────────────                                                       │
//! │  const cart = await invoke('add_to_cart', { productId: 42 });           │
//! │         │                                                               │
//! │         │ (IPC / direct call)                                           │
//! │         ▼                                                               │
//! │  Register Library                                                       │
//! │  ────────────────                                                       │
//! │  pub async fn add_to_cart(                                              │
//! │      session: &SessionState,   ◄── gate: (pos, create)                 │
//! │      catalog: &dyn ProductCatalog,                                      │
//! │      cart: &CartState,                                                  │
//! │      product_id: i64,                                                   │
//! │  ) -> Result<CartView, ApiError>                                        │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Shell receives: { lines: [...], totals: {...} }                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection (Option B)
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the session
//! pub fn visible_sections(session: &SessionState) -> Vec<Section>
//!
//! // Needs session + cart
//! pub fn get_cart(session: &SessionState, cart: &CartState) -> Result<CartView, ApiError>
//!
//! // Needs session + cart + a gateway
//! pub async fn add_to_cart(session: &SessionState, catalog: &dyn ProductCatalog, ...)
//! ```
//!
//! ## Gating Policy
//! Reading the POS screen gates on (`pos`, `view`); every cart mutation
//! and terminal operation gates on (`pos`, `create`). A gate miss is an
//! `ApiError`: `UNAUTHORIZED` when signed out, `FORBIDDEN` otherwise.
//! The evaluator itself only ever answers booleans; refusal happens here.

pub mod access;
pub mod cart;
pub mod checkout;
pub mod session;

use vireo_core::access::{Action, Section};

use crate::error::ApiError;
use crate::state::SessionState;

/// The command-side permission gate.
///
/// Distinguishes "nobody is signed in" from "signed in but denied" so the
/// shell can redirect to sign-in for the former.
pub(crate) fn require(
    session: &SessionState,
    section: Section,
    action: Action,
) -> Result<(), ApiError> {
    match session.with_user(|user| user.has_permission(section, action)) {
        None => Err(ApiError::unauthorized()),
        Some(false) => Err(ApiError::forbidden(section, action)),
        Some(true) => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
