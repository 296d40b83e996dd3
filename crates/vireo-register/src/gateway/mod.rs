//! # Gateway Module
//!
//! Trait contracts for the remote collaborators this client depends on.
//! Everything durable (users, products, sales) lives behind a remote API
//! that is out of scope here; these traits are the seam.
//!
//! ## Gateway Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Gateway Boundary                                  │
//! │                                                                         │
//! │  Commands layer                     Remote collaborators                │
//! │  ──────────────                     ────────────────────                │
//! │                                                                         │
//! │  restore_session ────► SessionStore ────► browser sessionStorage /     │
//! │  sign_in/sign_out      (sync)             OS keychain                   │
//! │                                                                         │
//! │  add_to_cart ────────► ProductCatalog ──► GET /products/:id            │
//! │                        (async)                                          │
//! │                                                                         │
//! │  checkout ───────────► SaleRecorder ────► POST /sales                  │
//! │                        (async)                                          │
//! │                                                                         │
//! │  Failure policy: gateway failures PROPAGATE. Nothing here retries,     │
//! │  swallows, or times out on its own; the collaborator owns its          │
//! │  timeout and the command layer owns the user-facing reaction.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Traits?
//! The shell wires real HTTP-backed implementations; tests and dev builds
//! wire the in-memory doubles from [`memory`]. Commands only ever see
//! `&dyn Trait`, so the two are interchangeable.

use async_trait::async_trait;
use thiserror::Error;
use vireo_core::{Order, ProductSnapshot};

mod memory;

pub use memory::{MemoryCatalog, MemorySaleRecorder, MemorySessionStore};

// =============================================================================
// Gateway Error
// =============================================================================

/// Remote collaborator failures.
///
/// These wrap whatever the transport reported, categorized enough for the
/// UI to pick a message. They convert to `ApiError` at the command layer.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The collaborator could not be reached.
    ///
    /// ## When This Occurs
    /// - Network down
    /// - Backend not running
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The collaborator was reached and refused the request.
    ///
    /// ## When This Occurs
    /// - Backend validation rejected the payload
    /// - The record conflicts with server-side state
    #[error("Request rejected: {reason}")]
    Rejected { reason: String },

    /// The collaborator did not answer in time.
    ///
    /// Timeouts are the collaborator's concern; this variant only reports
    /// the outcome.
    #[error("Request timed out")]
    Timeout,
}

impl GatewayError {
    /// Creates an Unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        GatewayError::Unavailable(message.into())
    }

    /// Creates a Rejected error.
    pub fn rejected(reason: impl Into<String>) -> Self {
        GatewayError::Rejected {
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results with GatewayError.
pub type GatewayResult<T> = Result<T, GatewayError>;

// =============================================================================
// Session Store
// =============================================================================

/// Client-side session persistence, one slot per app window.
///
/// The analog of browser sessionStorage: synchronous, string-valued,
/// and infallible. What goes in the slot is the serialized session user;
/// reading it back goes through the tolerant `SessionUser::decode`, so a
/// corrupted slot degrades to signed-out rather than an error.
pub trait SessionStore: Send + Sync {
    /// Returns the stored session payload, if any.
    fn load(&self) -> Option<String>;

    /// Replaces the stored session payload.
    fn store(&self, payload: &str);

    /// Clears the stored session payload.
    fn clear(&self);
}

// =============================================================================
// Product Catalog
// =============================================================================

/// Supplies product snapshots for the cart.
///
/// The cart trusts the snapshot at add-time (stock levels and pricing are
/// the backend's problem); `Ok(None)` means the product does not exist.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Looks up a product by id.
    async fn lookup(&self, product_id: i64) -> GatewayResult<Option<ProductSnapshot>>;
}

// =============================================================================
// Sale Recorder
// =============================================================================

/// Records finalized orders with the backend.
#[async_trait]
pub trait SaleRecorder: Send + Sync {
    /// Persists a finalized order.
    ///
    /// ## Behavior
    /// Failure must reach the caller unchanged. The checkout command
    /// keeps the cart intact until this returns `Ok`, which is what makes
    /// a failed checkout retryable.
    async fn record(&self, order: &Order) -> GatewayResult<()>;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GatewayError::unavailable("connection refused").to_string(),
            "Service unavailable: connection refused"
        );
        assert_eq!(
            GatewayError::rejected("duplicate receipt").to_string(),
            "Request rejected: duplicate receipt"
        );
        assert_eq!(GatewayError::Timeout.to_string(), "Request timed out");
    }
}
